/// Public bucket used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "https://pub-061bd6f37c9346439c19d31155bf1f96.r2.dev";
pub const DEFAULT_IMAGE_PREFIX: &str = "placeholders";

/// Resolves object-storage keys to public URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStorage {
    base_url: String,
    prefix: String,
}

impl ObjectStorage {
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let prefix = prefix.into().trim_matches('/').to_string();
        Self { base_url, prefix }
    }

    /// Reads `GATORSLIST_OBJECT_BASE_URL` and `GATORSLIST_OBJECT_PREFIX`,
    /// falling back to the public defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GATORSLIST_OBJECT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let prefix = std::env::var("GATORSLIST_OBJECT_PREFIX")
            .unwrap_or_else(|_| DEFAULT_IMAGE_PREFIX.into());
        Self::new(base_url, prefix)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Absolute `http(s)://` URLs come back unchanged. A key that already
    /// names a path (`uploads/a.jpg`) is joined to the base directly; a bare
    /// key is placed under the configured prefix.
    pub fn build_object_url(&self, key: &str) -> String {
        if is_absolute(key) {
            return key.to_string();
        }

        let key = key.trim_start_matches('/');
        if key.contains('/') || self.prefix.is_empty() {
            format!("{}/{}", self.base_url, key)
        } else {
            format!("{}/{}/{}", self.base_url, self.prefix, key)
        }
    }
}

impl Default for ObjectStorage {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_IMAGE_PREFIX)
    }
}

fn is_absolute(key: &str) -> bool {
    let has_scheme = |scheme: &str| {
        key.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    };
    has_scheme("http://") || has_scheme("https://")
}
