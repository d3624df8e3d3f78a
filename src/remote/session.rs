//! Scoped remote session handle
//!
//! A [`RemoteSession`] bundles a fetcher with the remote configuration and
//! attaches the browser fingerprint to every request. Resolver calls take one
//! by reference; the [`crate::Catalog`] facade opens a fresh session per
//! operation and drops it on every exit path.

use crate::config::RemoteConfig;
use crate::remote::fetcher::{build_http_client, Fetch, FetchRequest, FetchResponse, HttpFetcher};
use crate::{LocatorError, Result};
use url::Url;

/// Remote catalog access for the duration of one operation
#[derive(Debug)]
pub struct RemoteSession<F: Fetch = HttpFetcher> {
    fetcher: F,
    config: RemoteConfig,
}

impl RemoteSession<HttpFetcher> {
    /// Opens a session backed by a new HTTP client
    pub fn open(config: &RemoteConfig) -> Result<Self> {
        let client = build_http_client(config.timeout_secs)?;
        Ok(Self::with_fetcher(HttpFetcher::new(client), config.clone()))
    }
}

impl<F: Fetch> RemoteSession<F> {
    /// Builds a session around an arbitrary fetcher
    pub fn with_fetcher(fetcher: F, config: RemoteConfig) -> Self {
        tracing::trace!("Remote session opened for {}", config.base_url);
        Self { fetcher, config }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Listing page URL for one data set and page number
    pub fn dataset_page_url(&self, set_id: u32, page: u32) -> Result<Url> {
        let mut url = self.dataset_url(set_id)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Base listing URL for a data set, without a page parameter
    pub fn dataset_url(&self, set_id: u32) -> Result<Url> {
        let path = self
            .config
            .dataset_path
            .replace("{id}", &set_id.to_string());
        Ok(Url::parse(&self.config.base_url)?.join(&path)?)
    }

    /// Search endpoint URL for a term list, optional filter and 1-based page
    pub fn search_page_url(
        &self,
        keys: &[String],
        filter: Option<&str>,
        page: u64,
    ) -> Result<Url> {
        let mut url = Url::parse(&self.config.search_url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("keys", &keys.join(" "));
            if let Some(filter) = filter {
                query.append_pair("filter", filter);
            }
            query.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// Fetches a URL and requires its status to be one of `expected`
    ///
    /// # Returns
    ///
    /// * `Ok(FetchResponse)` - Status was in the whitelist
    /// * `Err(LocatorError::Transport)` - Any other status
    /// * `Err(LocatorError::Http)` - The request itself failed
    pub async fn get(&self, url: Url, expected: &[u16]) -> Result<FetchResponse> {
        let response = self.fetch(url).await?;

        if !expected.contains(&response.status) {
            tracing::debug!(
                "Rejecting status {} from {} (expected {:?})",
                response.status,
                response.final_url,
                expected
            );
            return Err(LocatorError::Transport {
                url: response.final_url,
                status: response.status,
            });
        }

        Ok(response)
    }

    /// Fetches a URL without judging the status
    pub async fn fetch(&self, url: Url) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);
        let request = FetchRequest {
            url,
            headers: self.fingerprint_headers(),
        };
        self.fetcher.fetch(request).await
    }

    fn fingerprint_headers(&self) -> Vec<(String, String)> {
        let fingerprint = &self.config.fingerprint;
        let mut headers = vec![
            ("User-Agent".to_string(), fingerprint.user_agent.clone()),
            ("Accept".to_string(), fingerprint.accept.clone()),
            (
                "Accept-Language".to_string(),
                fingerprint.accept_language.clone(),
            ),
        ];

        if !fingerprint.cookies.is_empty() {
            headers.push(("Cookie".to_string(), fingerprint.cookies.join("; ")));
        }

        headers.retain(|(_, value)| !value.is_empty());
        headers
    }
}

impl<F: Fetch> Drop for RemoteSession<F> {
    fn drop(&mut self) {
        tracing::trace!("Remote session closed for {}", self.config.base_url);
    }
}
