//! HTTP client for the upstream catalog API.
//!
//! The catalog paginates with absolute `info.next` URLs, so after the first
//! request the client just follows links until `next` is null.

use serde::Deserialize;

use crate::error::EtlError;

/// One page of upstream results.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// Pagination envelope of the upstream catalog.
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    /// Absolute URL of the next page, if any.
    pub next: Option<String>,
}

/// An upstream character record. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ApiCharacter {
    pub id: i64,
    pub name: String,
    pub species: String,
}

/// An upstream episode record.
#[derive(Debug, Deserialize)]
pub struct ApiEpisode {
    pub id: i64,
    pub name: String,
    /// Season/episode code, e.g. `S01E07`.
    pub episode: String,
}

/// Thin reqwest wrapper over the catalog endpoints.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch a page of characters; `url` is `None` for the first page.
    pub async fn characters_page(&self, url: Option<&str>) -> Result<Page<ApiCharacter>, EtlError> {
        let first = format!("{}/character", self.base_url);
        self.fetch_page(url.unwrap_or(&first)).await
    }

    /// Fetch a page of episodes; `url` is `None` for the first page.
    pub async fn episodes_page(&self, url: Option<&str>) -> Result<Page<ApiEpisode>, EtlError> {
        let first = format!("{}/episode", self.base_url);
        self.fetch_page(url.unwrap_or(&first)).await
    }

    async fn fetch_page<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Page<T>, EtlError> {
        let page = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Page<T>>()
            .await?;
        Ok(page)
    }
}
