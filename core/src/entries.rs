//! Facade over `/spaces/{space}/entries`.
//!
//! Every method is one request built by `ContentfulClient`, one round-trip
//! through the handle's transport, and one parse.

use tracing::{info, warn};

use crate::collection::Collection;
use crate::content_types::SchemaResolver;
use crate::contentful::Contentful;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Entry, EntryField, Fields};

pub struct Entries<'a, T> {
    api: &'a Contentful<T>,
}

impl<'a, T: Transport> Entries<'a, T> {
    pub fn new(api: &'a Contentful<T>) -> Self {
        Self { api }
    }

    /// All entries of a space, fetched lazily.
    ///
    /// If the listing request cannot be built the error is logged and an
    /// inert, empty collection is returned instead.
    pub fn list(&self, space_id: &str) -> Collection<'a, T, Entry> {
        match self.api.client().build_list_entries(space_id) {
            Ok(template) => Collection::new(self.api, template),
            Err(err) => {
                warn!(space_id, error = %err, "cannot list entries, returning empty collection");
                Collection::inert()
            }
        }
    }

    pub fn get(&self, space_id: &str, entry_id: &str) -> Result<Entry, ApiError> {
        let client = self.api.client();
        let request = client.build_get_entry(space_id, entry_id)?;
        client.parse_get_entry(self.api.execute(request)?)
    }

    /// Create an entry and let the backend pick its id.
    pub fn create(&self, space_id: &str, content_type_id: &str, fields: &Fields) -> Result<Entry, ApiError> {
        let client = self.api.client();
        let request = client.build_create_entry(space_id, content_type_id, fields)?;
        let entry = client.parse_create_entry(self.api.execute(request)?)?;
        info!(space_id, entry_id = entry.id().unwrap_or_default(), "entry created");
        Ok(entry)
    }

    /// Write `entry.fields` at the entry's id, guarded by its version.
    pub fn update(&self, space_id: &str, entry: &Entry) -> Result<(), ApiError> {
        let client = self.api.client();
        let request = client.build_update_entry(space_id, entry)?;
        client.parse_update_entry(self.api.execute(request)?)?;
        info!(space_id, entry_id = entry.id().unwrap_or_default(), version = entry.version(), "entry updated");
        Ok(())
    }

    pub fn publish(&self, space_id: &str, entry: &Entry) -> Result<(), ApiError> {
        let client = self.api.client();
        let request = client.build_publish_entry(space_id, entry)?;
        client.parse_publish_entry(self.api.execute(request)?)?;
        info!(space_id, entry_id = entry.id().unwrap_or_default(), version = entry.version(), "entry published");
        Ok(())
    }

    pub fn unpublish(&self, space_id: &str, entry: &Entry) -> Result<(), ApiError> {
        let client = self.api.client();
        let request = client.build_unpublish_entry(space_id, entry)?;
        client.parse_unpublish_entry(self.api.execute(request)?)?;
        info!(space_id, entry_id = entry.id().unwrap_or_default(), "entry unpublished");
        Ok(())
    }

    pub fn delete(&self, space_id: &str, entry_id: &str) -> Result<(), ApiError> {
        let client = self.api.client();
        let request = client.build_delete_entry(space_id, entry_id)?;
        client.parse_delete_entry(self.api.execute(request)?)?;
        info!(space_id, entry_id, "entry deleted");
        Ok(())
    }

    /// Value of `key` in `entry` together with its declared type, looked up
    /// in the first page of content types of the entry's space.
    pub fn get_entry_key(&self, entry: &Entry, key: &str) -> Result<EntryField, ApiError> {
        resolve_entry_key(entry, key, &self.api.content_types())
    }
}

/// Resolve `key` against whatever schema `resolver` supplies. A missing
/// field or content type yields an empty data type, not an error.
pub fn resolve_entry_key<R>(entry: &Entry, key: &str, resolver: &R) -> Result<EntryField, ApiError>
where
    R: SchemaResolver + ?Sized,
{
    let space_id = entry.space_id().unwrap_or_default();
    let content_types = resolver.content_types(space_id)?;
    Ok(EntryField::resolve(entry, key, &content_types))
}
