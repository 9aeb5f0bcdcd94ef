use std::time::Duration;

use crate::board::RawClueList;
use crate::fetch::{CategorySource, FetchError};

/// Pulls clue lists from `GET <base_url>?category=<n>`.
pub struct HttpSource {
    base_url: String,
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn category_url(&self, category: u32) -> String {
        let sep = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{sep}category={category}", self.base_url)
    }
}

#[cfg(feature = "network")]
impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[cfg(not(feature = "network"))]
impl HttpSource {
    pub fn new(base_url: impl Into<String>, _timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: base_url.into(),
        })
    }
}

#[cfg(feature = "network")]
impl CategorySource for HttpSource {
    fn fetch_category(&self, category: u32) -> Result<RawClueList, FetchError> {
        let url = self.category_url(category);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Request { category, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                category,
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .map_err(|source| FetchError::Request { category, source })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { category, source })
    }
}

#[cfg(not(feature = "network"))]
impl CategorySource for HttpSource {
    fn fetch_category(&self, _category: u32) -> Result<RawClueList, FetchError> {
        Err(FetchError::NetworkDisabled)
    }
}
