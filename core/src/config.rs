//! Client configuration.

pub const DEFAULT_BASE_URL: &str = "https://api.contentful.com";

/// Page size used by collections when none is configured. The Management
/// API caps `limit` at 1000.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Immutable settings shared by every request a client builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Management token sent as `Authorization: Bearer ...`. Omitted when empty.
    pub access_token: Option<String>,
    pub page_limit: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string()).filter(|t| !t.is_empty());
        self
    }

    pub fn with_page_limit(mut self, limit: u64) -> Self {
        self.page_limit = limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    /// Read `CONTENTFUL_BASE_URL`, `CONTENTFUL_ACCESS_TOKEN` and
    /// `CONTENTFUL_PAGE_LIMIT`, falling back to defaults for unset or
    /// unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("CONTENTFUL_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url);
        if let Some(token) = lookup("CONTENTFUL_ACCESS_TOKEN") {
            config = config.with_access_token(&token);
        }
        if let Some(limit) = lookup("CONTENTFUL_PAGE_LIMIT").and_then(|v| v.parse().ok()) {
            config = config.with_page_limit(limit);
        }
        config
    }
}
