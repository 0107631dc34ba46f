//! Domain DTOs for the Contentful Management API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Entry fields are
//! heterogeneous JSON whose shape is only known from the entry's content
//! type, so they are kept as `serde_json::Value` rather than a fixed struct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field key to raw JSON value.
pub type Fields = BTreeMap<String, Value>;

/// Reference to another resource, e.g. `{"sys":{"type":"Link","linkType":"Space","id":"abc"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    pub id: String,
    #[serde(rename = "type", default = "link_type_name")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

fn link_type_name() -> String {
    "Link".to_string()
}

impl Link {
    pub fn new(link_type: &str, id: &str) -> Self {
        Self {
            sys: LinkSys {
                id: id.to_string(),
                kind: link_type_name(),
                link_type: Some(link_type.to_string()),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

/// System metadata owned by the backend. The client reads it and echoes the
/// version back on mutating calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One content record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Locale the caller is working in. Client-side only, never sent.
    #[serde(skip)]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    #[serde(default)]
    pub fields: Fields,
}

impl Entry {
    /// An unsaved entry addressed by `id` in `space_id`, typed as `content_type_id`.
    pub fn new(space_id: &str, content_type_id: &str, id: &str) -> Self {
        Self {
            locale: None,
            sys: Some(Sys {
                id: id.to_string(),
                kind: Some("Entry".to_string()),
                version: 1,
                space: Some(Link::new("Space", space_id)),
                content_type: Some(Link::new("ContentType", content_type_id)),
                ..Sys::default()
            }),
            fields: Fields::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    /// Current version, or 1 for an entry that has never been saved.
    pub fn version(&self) -> u64 {
        self.sys.as_ref().map_or(1, |sys| sys.version)
    }

    pub fn id(&self) -> Option<&str> {
        self.sys
            .as_ref()
            .map(|sys| sys.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn space_id(&self) -> Option<&str> {
        self.sys.as_ref()?.space.as_ref().map(Link::id)
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.as_ref()?.content_type.as_ref().map(Link::id)
    }

    pub fn is_published(&self) -> bool {
        self.sys
            .as_ref()
            .is_some_and(|sys| sys.published_version.is_some())
    }
}

/// A single field of an entry together with its declared type.
///
/// `data_type` is empty when the entry's content type, or the field within
/// it, could not be found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryField {
    value: Value,
    data_type: String,
}

impl EntryField {
    /// Look up `key` in `entry.fields` and its declared type in
    /// `content_types`. Absence at any level is not an error.
    pub fn resolve(entry: &Entry, key: &str, content_types: &[ContentType]) -> Self {
        let value = entry.fields.get(key).cloned().unwrap_or(Value::Null);
        let data_type = entry
            .content_type_id()
            .and_then(|ct_id| content_types.iter().find(|ct| ct.sys.id == ct_id))
            .and_then(|ct| ct.field(key))
            .map(|field| field.kind.clone())
            .unwrap_or_default();
        Self { value, data_type }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }
}

/// Schema definition for entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<ContentTypeField>,
}

impl ContentType {
    pub fn field(&self, id: &str) -> Option<&ContentTypeField> {
        self.fields.iter().find(|field| field.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeField {
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

/// One page of an array response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            skip: 0,
            limit: 0,
            items: Vec::new(),
        }
    }
}
