//! HTTP client for the ESB store-catalog API.
//!
//! Fetching the catalog is a two-step protocol: a count query filtered to the
//! active region discovers the total record count, then every page is fetched
//! concurrently with `skip`/`top` paging under the same filter.

use std::time::Duration;

use futures::future;
use reqwest::{Client, Url};

use storesync_core::{clean_string, EsbConfig};

use crate::error::EsbError;
use crate::types::{RawStore, StoresPage};

/// Fixed predicate restricting both the count and the page queries to the
/// active geographic region.
const REGION_FILTER: &str = "primaryCountryRegionId eq 'RUS'";

/// Client for the ESB store-catalog endpoints.
///
/// Carries the bearer credential and the page size; request timeouts are
/// enforced by the underlying `reqwest::Client`, not by callers.
pub struct EsbClient {
    client: Client,
    stores_url: Url,
    count_url: Url,
    api_key: String,
    page_size: usize,
}

impl EsbClient {
    /// Creates a client from the ESB section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EsbError::InvalidBaseUrl`] if the configured base URL does
    /// not parse, or [`EsbError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &EsbConfig) -> Result<Self, EsbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storesync/0.1 (store-catalog-sync)")
            .build()?;

        // Ensure the base ends with exactly one slash so join() appends the
        // endpoint segments instead of replacing the last path segment.
        let normalized = format!("{}/", config.base_url.trim_end_matches('/'));
        let invalid = |reason: String| EsbError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };
        let base_url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
        let stores_url = base_url.join("stores").map_err(|e| invalid(e.to_string()))?;
        let count_url = base_url
            .join("stores/count")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            stores_url,
            count_url,
            api_key: config.api_key.clone(),
            page_size: config.page_size.max(1),
        })
    }

    /// Fetches the complete store catalog: discovers the page count, fetches
    /// every page concurrently, and merges the results.
    ///
    /// All pages are always attempted — a failing page does not cancel its
    /// siblings. The call still fails as a whole if any page failed, with
    /// every page failure joined into [`EsbError::PageFetches`]; partial
    /// results are never returned.
    ///
    /// # Errors
    ///
    /// - Any error from the count query, as-is.
    /// - [`EsbError::NoPageToFetch`] if the computed page count is zero.
    /// - [`EsbError::PageFetches`] if one or more page fetches failed.
    /// - [`EsbError::NoStoresData`] if every page succeeded but returned
    ///   zero records in total.
    pub async fn fetch_all_stores(&self) -> Result<Vec<RawStore>, EsbError> {
        let pages = self.stores_page_count().await?;
        if pages < 1 {
            tracing::error!("{}", EsbError::NoPageToFetch);
            return Err(EsbError::NoPageToFetch);
        }

        let results = future::join_all(
            (0..pages).map(|page| async move { (page, self.fetch_stores_page(page).await) }),
        )
        .await;

        let mut stores: Vec<RawStore> = Vec::with_capacity(pages * self.page_size);
        let mut failures: Vec<EsbError> = Vec::new();
        for (page, result) in results {
            match result {
                Ok(records) => stores.extend(records),
                Err(source) => {
                    tracing::error!(page, error = %source, "store page fetch failed");
                    failures.push(EsbError::PageFetch {
                        page,
                        source: Box::new(source),
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(EsbError::PageFetches(failures));
        }
        if stores.is_empty() {
            tracing::error!("{}", EsbError::NoStoresData);
            return Err(EsbError::NoStoresData);
        }

        tracing::info!(
            count = stores.len(),
            pages,
            limit = self.page_size,
            "fetched store catalog"
        );
        Ok(stores)
    }

    /// Issues the count query and returns the total number of matching
    /// stores.
    ///
    /// The body is cleaned before parsing — the endpoint has been observed
    /// returning the number wrapped in a BOM and trailing whitespace.
    ///
    /// # Errors
    ///
    /// - [`EsbError::UnexpectedStatus`] on any non-2xx response.
    /// - [`EsbError::InvalidStoresCount`] if the cleaned body is not an
    ///   integer.
    /// - [`EsbError::Http`] on network failure.
    pub async fn count_stores(&self) -> Result<i64, EsbError> {
        let mut url = self.count_url.clone();
        url.query_pairs_mut().append_pair("filter", REGION_FILTER);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "non-2xx response from store count endpoint");
            return Err(EsbError::UnexpectedStatus {
                status: status.to_string(),
            });
        }

        let body = clean_string(&response.text().await?);
        body.parse::<i64>()
            .map_err(|_| EsbError::InvalidStoresCount { body })
    }

    /// Fetches a single zero-indexed catalog page.
    ///
    /// An empty or null `value` in the envelope yields an empty vec, which is
    /// not an error at the page level.
    ///
    /// # Errors
    ///
    /// - [`EsbError::UnexpectedStatus`] on any non-2xx response.
    /// - [`EsbError::Deserialize`] if the body is not a valid page envelope.
    /// - [`EsbError::Http`] on network failure.
    pub async fn fetch_stores_page(&self, page: usize) -> Result<Vec<RawStore>, EsbError> {
        let skip = page * self.page_size;
        let mut url = self.stores_url.clone();
        url.query_pairs_mut()
            .append_pair("filter", REGION_FILTER)
            .append_pair("skip", &skip.to_string())
            .append_pair("top", &self.page_size.to_string());

        tracing::debug!(page, skip, limit = self.page_size, "fetching stores page");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, page, "non-2xx response from stores endpoint");
            return Err(EsbError::UnexpectedStatus {
                status: status.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: StoresPage =
            serde_json::from_str(&body).map_err(|e| EsbError::Deserialize {
                context: format!("stores page {page}"),
                source: e,
            })?;

        let records = envelope.value.unwrap_or_default();
        tracing::debug!(count = records.len(), page, skip, "got stores page");
        Ok(records)
    }

    /// Computes the number of pages to fetch from the discovered count.
    /// Non-positive counts produce zero pages.
    async fn stores_page_count(&self) -> Result<usize, EsbError> {
        let count = self.count_stores().await?;
        let pages = usize::try_from(count).map_or(0, |c| c.div_ceil(self.page_size));
        tracing::info!(
            count,
            pages,
            limit = self.page_size,
            "discovered store count"
        );
        Ok(pages)
    }
}
