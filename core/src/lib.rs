//! Synchronous client core for the Contentful Management API entries
//! resource.
//!
//! # Overview
//! Lists, fetches, creates, updates, publishes, unpublishes and deletes
//! entries, and resolves an entry field's declared type from its content
//! type. The core builds `HttpRequest` values and parses `HttpResponse`
//! values; a caller-supplied [`Transport`] performs the round-trip
//! (host-does-IO pattern).
//!
//! # Design
//! - `ContentfulClient` is stateless: configuration in, requests out,
//!   responses parsed. No I/O.
//! - `Contentful` pairs that client with a transport. The `Entries` and
//!   `ContentTypes` facades borrow it, one round-trip per call.
//! - Optimistic concurrency: writes echo the entry's version in
//!   `X-Contentful-Version`; a stale version surfaces as
//!   `ApiError::VersionMismatch`.
//! - Field-type resolution goes through [`SchemaResolver`], so a pre-fetched
//!   schema can stand in for the network lookup.
//!
//! ```no_run
//! use contentful_core::{ApiError, Contentful, ContentfulClient, HttpRequest, HttpResponse, Transport};
//!
//! struct MyTransport;
//!
//! impl Transport for MyTransport {
//!     fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
//!         unimplemented!("send with your HTTP library of choice")
//!     }
//! }
//!
//! let api = Contentful::new(ContentfulClient::new("https://api.contentful.com"), MyTransport);
//! let entry = api.entries().get("space", "entry")?;
//! let title = api.entries().get_entry_key(&entry, "title")?;
//! println!("{} = {}", title.data_type(), title.value());
//! # Ok::<(), ApiError>(())
//! ```

pub mod client;
pub mod collection;
pub mod config;
pub mod content_types;
pub mod contentful;
pub mod entries;
pub mod error;
pub mod http;
pub mod types;

pub use client::{ContentfulClient, CONTENT_TYPE_ID_HEADER, MANAGEMENT_MEDIA_TYPE, VERSION_HEADER};
pub use collection::Collection;
pub use config::ClientConfig;
pub use content_types::{ContentTypes, SchemaResolver};
pub use contentful::Contentful;
pub use entries::{resolve_entry_key, Entries};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{ContentType, ContentTypeField, Entry, EntryField, Fields, Link, LinkSys, Page, Sys};
