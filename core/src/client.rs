//! Stateless HTTP request builder and response parser for the Contentful
//! Management API.
//!
//! # Design
//! `ContentfulClient` holds only immutable configuration. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. The round-trip itself
//! happens elsewhere (see [`crate::Contentful`]), keeping this type free of
//! I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ContentType, Entry, Fields, Page};

pub const CONTENT_TYPE_ID_HEADER: &str = "X-Contentful-Content-Type";
pub const VERSION_HEADER: &str = "X-Contentful-Version";
pub const MANAGEMENT_MEDIA_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Wire body of an entry write. Only `fields` is ever sent; `sys` belongs to
/// the backend.
#[derive(Serialize)]
struct EntryPayload<'a> {
    fields: &'a Fields,
}

/// Synchronous, stateless client for the Contentful Management API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Base URL, token and page size come from the
/// `ClientConfig` it was created with.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    config: ClientConfig,
}

impl ContentfulClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(mut config: ClientConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base}/spaces/{space_id}{suffix}`.
    pub fn new_path(&self, space_id: &str, suffix: &str) -> Result<String, ApiError> {
        path_segment("space id", space_id)?;
        Ok(format!("{}/spaces/{space_id}{suffix}", self.config.base_url))
    }

    /// Assemble a request for `path`, appending `query` form-encoded and
    /// attaching the authorization and media-type headers.
    pub fn new_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> HttpRequest {
        let mut url = path.to_string();
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }

        let mut headers = Vec::new();
        if let Some(token) = &self.config.access_token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), MANAGEMENT_MEDIA_TYPE.to_string()));
        }

        HttpRequest {
            method,
            path: url,
            headers,
            body,
        }
    }

    /// Copy of a list request template addressing one page.
    pub fn paged(&self, template: &HttpRequest, skip: u64, limit: u64) -> HttpRequest {
        let mut request = template.clone();
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string())
            .finish();
        request.path.push(if request.path.contains('?') { '&' } else { '?' });
        request.path.push_str(&query);
        request
    }

    // -- entries --------------------------------------------------------------

    /// Template for listing entries; page through it with [`Self::paged`].
    pub fn build_list_entries(&self, space_id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.new_path(space_id, "/entries")?;
        Ok(self.new_request(HttpMethod::Get, &path, &[], None))
    }

    pub fn build_get_entry(&self, space_id: &str, entry_id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.entry_path(space_id, entry_id, "")?;
        Ok(self.new_request(HttpMethod::Get, &path, &[], None))
    }

    /// Create an entry with a server-assigned id.
    pub fn build_create_entry(
        &self,
        space_id: &str,
        content_type_id: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        if content_type_id.is_empty() {
            return Err(ApiError::InvalidRequest("content type id is empty".to_string()));
        }
        let path = self.new_path(space_id, "/entries")?;
        let body = entry_body(fields)?;
        let mut request = self.new_request(HttpMethod::Post, &path, &[], Some(body));
        request.set_header(CONTENT_TYPE_ID_HEADER, content_type_id);
        Ok(request)
    }

    /// Create or replace `entry` at its own id. The body carries only the
    /// fields; the content type and version travel as headers.
    pub fn build_update_entry(&self, space_id: &str, entry: &Entry) -> Result<HttpRequest, ApiError> {
        let path = self.entry_path(space_id, required_id(entry)?, "")?;
        let content_type_id = entry
            .content_type_id()
            .ok_or_else(|| ApiError::InvalidRequest("entry has no content type".to_string()))?;
        let body = entry_body(&entry.fields)?;

        let mut request = self.new_request(HttpMethod::Put, &path, &[], Some(body));
        request.set_header(CONTENT_TYPE_ID_HEADER, content_type_id);
        request.set_header(VERSION_HEADER, entry.version().to_string());
        Ok(request)
    }

    pub fn build_publish_entry(&self, space_id: &str, entry: &Entry) -> Result<HttpRequest, ApiError> {
        let path = self.entry_path(space_id, required_id(entry)?, "/published")?;
        let mut request = self.new_request(HttpMethod::Put, &path, &[], None);
        request.set_header(VERSION_HEADER, entry.version().to_string());
        Ok(request)
    }

    pub fn build_unpublish_entry(&self, space_id: &str, entry: &Entry) -> Result<HttpRequest, ApiError> {
        let path = self.entry_path(space_id, required_id(entry)?, "/published")?;
        let mut request = self.new_request(HttpMethod::Delete, &path, &[], None);
        request.set_header(VERSION_HEADER, entry.version().to_string());
        Ok(request)
    }

    pub fn build_delete_entry(&self, space_id: &str, entry_id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.entry_path(space_id, entry_id, "")?;
        Ok(self.new_request(HttpMethod::Delete, &path, &[], None))
    }

    pub fn parse_get_entry(&self, response: HttpResponse) -> Result<Entry, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_create_entry(&self, response: HttpResponse) -> Result<Entry, ApiError> {
        check_status(&response, &[201])?;
        decode(&response.body)
    }

    /// 201 when the PUT created the entry, 200 when it replaced one.
    pub fn parse_update_entry(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 201])
    }

    pub fn parse_publish_entry(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200])
    }

    pub fn parse_unpublish_entry(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])
    }

    pub fn parse_delete_entry(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204])
    }

    // -- content types --------------------------------------------------------

    pub fn build_list_content_types(&self, space_id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.new_path(space_id, "/content_types")?;
        Ok(self.new_request(HttpMethod::Get, &path, &[], None))
    }

    pub fn build_get_content_type(
        &self,
        space_id: &str,
        content_type_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        path_segment("content type id", content_type_id)?;
        let path = self.new_path(space_id, &format!("/content_types/{content_type_id}"))?;
        Ok(self.new_request(HttpMethod::Get, &path, &[], None))
    }

    pub fn parse_get_content_type(&self, response: HttpResponse) -> Result<ContentType, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    /// Decode one page of any array response.
    pub fn parse_page<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Page<T>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    fn entry_path(&self, space_id: &str, entry_id: &str, suffix: &str) -> Result<String, ApiError> {
        path_segment("entry id", entry_id)?;
        self.new_path(space_id, &format!("/entries/{entry_id}{suffix}"))
    }
}

/// Ids are spliced into the path verbatim, so anything that would start a
/// new segment, query or fragment is refused.
fn path_segment(kind: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::InvalidRequest(format!("{kind} is empty")));
    }
    if value.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidRequest(format!("{kind} {value:?} is not a path segment")));
    }
    Ok(())
}

fn required_id(entry: &Entry) -> Result<&str, ApiError> {
    entry
        .id()
        .ok_or_else(|| ApiError::InvalidRequest("entry has no sys.id".to_string()))
}

fn entry_body(fields: &Fields) -> Result<String, ApiError> {
    serde_json::to_string(&EntryPayload { fields }).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        409 => Err(ApiError::VersionMismatch(response.body.clone())),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
