use serde::Deserialize;

/// Main configuration structure for EFTA-Locator
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub search: SearchConfig,
    pub index: IndexConfig,
}

/// Where the remote catalog lives and how requests to it look
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RemoteConfig {
    /// Scheme and host of the catalog site
    pub base_url: String,

    /// Path of a data set listing; `{id}` is replaced by the data set number
    pub dataset_path: String,

    /// Only links starting with this prefix are treated as catalog files
    pub file_url_prefix: String,

    /// Full-text search endpoint
    pub search_url: String,

    /// Transport timeout applied to every request (seconds)
    pub timeout_secs: u64,

    pub fingerprint: FingerprintConfig,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.justice.gov".to_string(),
            dataset_path: "/epstein/doj-disclosures/data-set-{id}-files".to_string(),
            file_url_prefix: "https://www.justice.gov/epstein/files/".to_string(),
            search_url: "https://www.justice.gov/multimedia-search".to_string(),
            timeout_secs: 30,
            fingerprint: FingerprintConfig::default(),
        }
    }
}

/// Browser-like request headers sent with every remote fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,

    /// `name=value` pairs joined into a single Cookie header
    pub cookies: Vec<String>,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,\
                     application/json;q=0.9,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            cookies: vec!["justiceGovAgeVerified=true".to_string()],
        }
    }
}

/// Remote full-text search behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Hits per remote search page
    pub page_size: u32,

    /// Upper bound on remote pages fetched for one search window
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_pages: 1000,
        }
    }
}

/// Local index store location
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IndexConfig {
    /// Path to the SQLite index database
    pub database_path: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            database_path: "./efta-index.db".to_string(),
        }
    }
}
