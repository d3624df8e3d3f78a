//! HTTP fetcher implementation
//!
//! This module issues the raw requests against the remote catalog:
//! - Building the HTTP client (redirects followed, no retries)
//! - GET requests with caller-supplied headers
//! - Collecting status, headers and body for the caller to judge
//!
//! Status codes are not interpreted here. Each call site decides which codes
//! it accepts, see [`crate::remote::RemoteSession::get`].

use crate::{LocatorError, Result};
use reqwest::{redirect::Policy, Client};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed before the request fails
const MAX_REDIRECTS: usize = 10;

/// A single outgoing request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,

    /// Header name/value pairs, sent in order
    pub headers: Vec<(String, String)>,
}

/// Raw response from the remote side
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status: u16,

    /// Response headers, names lowercased
    pub headers: HashMap<String, String>,

    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Looks up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport seam between the resolvers and the network
///
/// Implementations must follow redirects and must not retry.
pub trait Fetch {
    fn fetch(&self, request: FetchRequest) -> impl Future<Output = Result<FetchResponse>> + Send;
}

/// `reqwest`-backed fetcher used against the real catalog
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Builds an HTTP client for catalog requests
///
/// Identification headers are attached per request by the session, not
/// baked into the client.
///
/// # Arguments
///
/// * `timeout_secs` - Whole-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout_secs: u64) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let url = request.url.to_string();

        let mut builder = self.client.get(request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|source| LocatorError::Http {
            url: url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|source| LocatorError::Http { url, source })?
            .to_vec();

        Ok(FetchResponse {
            final_url,
            status,
            headers,
            body,
        })
    }
}
