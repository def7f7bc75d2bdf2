mod request;

pub use request::{browser_headers, RequestFetcher};

use crate::error::ImportError;
use async_trait::async_trait;

/// Fetches the raw HTML of a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Return the response body, or an error for network failures and
    /// non-success HTTP statuses
    async fn fetch(&self, url: &str) -> Result<String, ImportError>;
}
