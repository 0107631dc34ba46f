//! Content type listing and schema resolution.

use tracing::debug;

use crate::collection::Collection;
use crate::contentful::Contentful;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::ContentType;

/// Supplies the content types of a space so entry fields can be typed.
///
/// [`ContentTypes`] resolves over the network; a pre-fetched
/// `[ContentType]` slice resolves locally and ignores the space id.
pub trait SchemaResolver {
    fn content_types(&self, space_id: &str) -> Result<Vec<ContentType>, ApiError>;
}

impl SchemaResolver for [ContentType] {
    fn content_types(&self, _space_id: &str) -> Result<Vec<ContentType>, ApiError> {
        Ok(self.to_vec())
    }
}

impl SchemaResolver for Vec<ContentType> {
    fn content_types(&self, space_id: &str) -> Result<Vec<ContentType>, ApiError> {
        self.as_slice().content_types(space_id)
    }
}

/// Facade over `/spaces/{space}/content_types`.
pub struct ContentTypes<'a, T> {
    api: &'a Contentful<T>,
}

impl<'a, T: Transport> ContentTypes<'a, T> {
    pub fn new(api: &'a Contentful<T>) -> Self {
        Self { api }
    }

    pub fn list(&self, space_id: &str) -> Collection<'a, T, ContentType> {
        match self.api.client().build_list_content_types(space_id) {
            Ok(template) => Collection::new(self.api, template),
            Err(err) => {
                debug!(error = %err, "content type listing is inert");
                Collection::inert()
            }
        }
    }

    pub fn get(&self, space_id: &str, content_type_id: &str) -> Result<ContentType, ApiError> {
        let client = self.api.client();
        let request = client.build_get_content_type(space_id, content_type_id)?;
        client.parse_get_content_type(self.api.execute(request)?)
    }
}

impl<T: Transport> SchemaResolver for ContentTypes<'_, T> {
    /// First page only.
    fn content_types(&self, space_id: &str) -> Result<Vec<ContentType>, ApiError> {
        Ok(self.list(space_id).next_page()?.items)
    }
}
