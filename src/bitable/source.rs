use crate::bitable::client::{BitableClient, TableRef};
use crate::bitable::types::{RecordPage, TenantToken};
use crate::utils::Result;
use async_trait::async_trait;

/// A paginated supply of record pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `cursor`, or the first page when `cursor` is `None`.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<RecordPage>;
}

/// Record pages of one bitable table, read with a fixed token and column set.
pub struct TableSource<'a> {
    client: &'a BitableClient,
    table: TableRef,
    languages: Vec<String>,
    token: TenantToken,
}

impl<'a> TableSource<'a> {
    pub fn new(
        client: &'a BitableClient,
        table: TableRef,
        languages: Vec<String>,
        token: TenantToken,
    ) -> Self {
        Self {
            client,
            table,
            languages,
            token,
        }
    }
}

#[async_trait]
impl PageFetcher for TableSource<'_> {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<RecordPage> {
        self.client
            .list_records(&self.table, &self.languages, &self.token, cursor)
            .await
    }
}
