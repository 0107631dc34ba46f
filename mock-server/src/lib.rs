//! In-memory stand-in for the Contentful Management API entries and content
//! types resources.
//!
//! Writes are guarded by `X-Contentful-Version` the way the real backend
//! guards them: a stale or missing version on an existing entry yields 409.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const CONTENT_TYPE_ID_HEADER: &str = "x-contentful-content-type";
pub const VERSION_HEADER: &str = "x-contentful-version";

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "linkType")]
    pub link_type: String,
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub sys: LinkSys,
}

impl Link {
    fn new(link_type: &str, id: &str) -> Self {
        Self {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: link_type.to_string(),
                id: id.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: u64,
    pub space: Link,
    pub content_type: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    pub sys: EntrySys,
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentTypeSys {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub localized: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub sys: ContentTypeSys,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeInput {
    pub name: String,
    #[serde(default)]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Serialize)]
struct ArraySys {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize, Deserialize)]
pub struct PageQuery {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ArrayResponse<T> {
    sys: ArraySys,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub items: Vec<T>,
}

impl<T: Clone> ArrayResponse<T> {
    fn page<'a>(all: impl Iterator<Item = &'a T>, query: &PageQuery) -> Self
    where
        T: 'a,
    {
        let all: Vec<&T> = all.collect();
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self {
            sys: ArraySys { kind: "Array" },
            total: all.len(),
            skip,
            limit,
            items: all.into_iter().skip(skip).take(limit).cloned().collect(),
        }
    }
}

/// Error body shaped like the backend's: `{"sys":{"type":"Error","id":...},"message":...}`.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    id: &'static str,
    message: String,
}

impl Failure {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            id: "NotFound",
            message: "The resource could not be found.".to_string(),
        }
    }

    fn version_mismatch(expected: u64) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            id: "VersionMismatch",
            message: format!("expected version {expected}"),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            id: "BadRequest",
            message: message.to_string(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "sys": {"type": "Error", "id": self.id},
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Default)]
pub struct Store {
    entries: BTreeMap<(String, String), Entry>,
    content_types: BTreeMap<(String, String), ContentType>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/spaces/{space}/entries", get(list_entries).post(create_entry))
        .route(
            "/spaces/{space}/entries/{id}",
            get(get_entry).put(put_entry).delete(delete_entry),
        )
        .route(
            "/spaces/{space}/entries/{id}/published",
            put(publish_entry).delete(unpublish_entry),
        )
        .route("/spaces/{space}/content_types", get(list_content_types))
        .route(
            "/spaces/{space}/content_types/{id}",
            get(get_content_type).put(put_content_type),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).filter(|v| !v.is_empty())
}

fn check_version(headers: &HeaderMap, current: u64) -> Result<(), Failure> {
    let sent = header(headers, VERSION_HEADER).and_then(|v| v.parse::<u64>().ok());
    if sent == Some(current) {
        Ok(())
    } else {
        Err(Failure::version_mismatch(current))
    }
}

async fn list_entries(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<ArrayResponse<Entry>> {
    let store = db.read().await;
    let in_space = store
        .entries
        .iter()
        .filter(|((s, _), _)| *s == space)
        .map(|(_, entry)| entry);
    Json(ArrayResponse::page(in_space, &query))
}

async fn create_entry(
    State(db): State<Db>,
    Path(space): Path<String>,
    headers: HeaderMap,
    Json(input): Json<EntryInput>,
) -> Result<(StatusCode, Json<Entry>), Failure> {
    let content_type = header(&headers, CONTENT_TYPE_ID_HEADER)
        .ok_or_else(|| Failure::bad_request("missing content type header"))?;
    let id = Uuid::new_v4().simple().to_string();
    let entry = new_entry(&space, &id, content_type, input.fields);
    db.write().await.entries.insert((space, id), entry.clone());
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entry(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<Json<Entry>, Failure> {
    let store = db.read().await;
    store
        .entries
        .get(&(space, id))
        .cloned()
        .map(Json)
        .ok_or_else(Failure::not_found)
}

async fn put_entry(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<EntryInput>,
) -> Result<(StatusCode, Json<Entry>), Failure> {
    let mut store = db.write().await;
    if let Some(entry) = store.entries.get_mut(&(space.clone(), id.clone())) {
        check_version(&headers, entry.sys.version)?;
        entry.fields = input.fields;
        entry.sys.version += 1;
        debug!(%space, %id, version = entry.sys.version, "entry updated");
        return Ok((StatusCode::OK, Json(entry.clone())));
    }

    let content_type = header(&headers, CONTENT_TYPE_ID_HEADER)
        .ok_or_else(|| Failure::bad_request("missing content type header"))?;
    let entry = new_entry(&space, &id, content_type, input.fields);
    store.entries.insert((space, id), entry.clone());
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_entry(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    let key = (space, id);
    let entry = store.entries.get(&key).ok_or_else(Failure::not_found)?;
    if entry.sys.published_version.is_some() {
        return Err(Failure::bad_request("cannot delete a published entry"));
    }
    store.entries.remove(&key);
    Ok(StatusCode::NO_CONTENT)
}

async fn publish_entry(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Entry>, Failure> {
    let mut store = db.write().await;
    let entry = store.entries.get_mut(&(space, id)).ok_or_else(Failure::not_found)?;
    check_version(&headers, entry.sys.version)?;
    entry.sys.published_version = Some(entry.sys.version);
    entry.sys.version += 1;
    Ok(Json(entry.clone()))
}

async fn unpublish_entry(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Entry>, Failure> {
    let mut store = db.write().await;
    let entry = store.entries.get_mut(&(space, id)).ok_or_else(Failure::not_found)?;
    check_version(&headers, entry.sys.version)?;
    if entry.sys.published_version.take().is_none() {
        return Err(Failure::bad_request("entry is not published"));
    }
    entry.sys.version += 1;
    Ok(Json(entry.clone()))
}

async fn list_content_types(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<ArrayResponse<ContentType>> {
    let store = db.read().await;
    let in_space = store
        .content_types
        .iter()
        .filter(|((s, _), _)| *s == space)
        .map(|(_, ct)| ct);
    Json(ArrayResponse::page(in_space, &query))
}

async fn get_content_type(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<Json<ContentType>, Failure> {
    let store = db.read().await;
    store
        .content_types
        .get(&(space, id))
        .cloned()
        .map(Json)
        .ok_or_else(Failure::not_found)
}

async fn put_content_type(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    Json(input): Json<ContentTypeInput>,
) -> (StatusCode, Json<ContentType>) {
    let mut store = db.write().await;
    let key = (space, id.clone());
    let (status, version) = match store.content_types.get(&key) {
        Some(existing) => (StatusCode::OK, existing.sys.version + 1),
        None => (StatusCode::CREATED, 1),
    };
    let content_type = ContentType {
        sys: ContentTypeSys {
            id,
            kind: "ContentType".to_string(),
            version,
        },
        name: input.name,
        display_field: input.display_field,
        fields: input.fields,
    };
    store.content_types.insert(key, content_type.clone());
    (status, Json(content_type))
}

fn new_entry(space: &str, id: &str, content_type: &str, fields: Map<String, Value>) -> Entry {
    Entry {
        sys: EntrySys {
            id: id.to_string(),
            kind: "Entry".to_string(),
            version: 1,
            space: Link::new("Space", space),
            content_type: Link::new("ContentType", content_type),
            published_version: None,
        },
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_camel_case_sys() {
        let entry = new_entry("s1", "e1", "blogPost", Map::new());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sys"]["contentType"]["sys"]["id"], "blogPost");
        assert_eq!(json["sys"]["space"]["sys"]["linkType"], "Space");
        assert_eq!(json["sys"]["version"], 1);
        assert!(json["sys"].get("publishedVersion").is_none());
    }

    #[test]
    fn entry_input_defaults_fields() {
        let input: EntryInput = serde_json::from_str("{}").unwrap();
        assert!(input.fields.is_empty());
    }

    #[test]
    fn page_applies_skip_and_limit() {
        let items: Vec<u32> = (0..5).collect();
        let query = PageQuery {
            skip: Some(1),
            limit: Some(2),
        };
        let page = ArrayResponse::page(items.iter(), &query);
        assert_eq!(page.total, 5);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn page_clamps_limit() {
        let items: Vec<u32> = (0..3).collect();
        let query = PageQuery {
            skip: None,
            limit: Some(0),
        };
        let page = ArrayResponse::page(items.iter(), &query);
        assert_eq!(page.limit, 1);
        assert_eq!(page.items, vec![0]);
    }

    #[test]
    fn version_must_match_exactly() {
        let mut headers = HeaderMap::new();
        assert!(check_version(&headers, 1).is_err());
        headers.insert(VERSION_HEADER, "2".parse().unwrap());
        assert!(check_version(&headers, 2).is_ok());
        assert!(check_version(&headers, 3).is_err());
    }

    #[test]
    fn content_type_input_accepts_backend_shape() {
        let input: ContentTypeInput = serde_json::from_str(
            r#"{"name":"Blog post","displayField":"title","fields":[{"id":"title","name":"Title","type":"Symbol"}]}"#,
        )
        .unwrap();
        assert_eq!(input.display_field.as_deref(), Some("title"));
        assert_eq!(input.fields[0].kind, "Symbol");
    }
}
