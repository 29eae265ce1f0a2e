use crate::model::{FetchError, Record};

/// Anything that can deliver the full listing set in one go.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>, FetchError>;
}
