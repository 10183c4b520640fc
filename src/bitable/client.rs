use crate::bitable::types::{RecordPage, RecordsResponse, TenantToken, TokenResponse};
use crate::utils::{ApiError, I18nError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Largest page the records endpoint serves.
pub const PAGE_SIZE: usize = 500;

const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Location of the translation table and the name of its key column.
#[derive(Debug, Clone)]
pub struct TableRef {
    pub app_token: String,
    pub table_id: String,
    pub key_field: String,
}

impl TableRef {
    pub fn new(
        app_token: impl Into<String>,
        table_id: impl Into<String>,
        key_field: impl Into<String>,
    ) -> Self {
        Self {
            app_token: app_token.into(),
            table_id: table_id.into(),
            key_field: key_field.into(),
        }
    }

    /// Columns requested from the table: the key column, then one per language.
    pub fn field_names(&self, languages: &[String]) -> Vec<String> {
        std::iter::once(self.key_field.clone())
            .chain(languages.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

pub struct BitableClient {
    client: Client,
    base_url: String,
}

impl BitableClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| I18nError::ConfigError(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchanges the app credentials for a tenant access token.
    pub async fn tenant_access_token(&self, app_id: &str, app_secret: &str) -> Result<TenantToken> {
        if app_id.is_empty() || app_secret.is_empty() {
            return Err(I18nError::AuthFailure(ApiError::MissingCredentials(
                "app_id and app_secret are required",
            )));
        }

        self.request_token(app_id, app_secret)
            .await
            .map_err(I18nError::AuthFailure)
    }

    async fn request_token(
        &self,
        app_id: &str,
        app_secret: &str,
    ) -> std::result::Result<TenantToken, ApiError> {
        let url = format!("{}/auth/v3/tenant_access_token/internal", self.base_url);
        debug!(url = %url, "Requesting tenant access token");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", CONTENT_TYPE)
            .json(&TokenRequest { app_id, app_secret })
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let token_response: TokenResponse = serde_json::from_str(&body)?;
        token_response.into_token()
    }

    /// Fetches one page of at most [`PAGE_SIZE`] records, restricted to the
    /// key column and the language columns. `cursor` is passed back verbatim.
    pub async fn list_records(
        &self,
        table: &TableRef,
        languages: &[String],
        token: &TenantToken,
        cursor: Option<&str>,
    ) -> Result<RecordPage> {
        if token.is_expired() {
            warn!(
                expires_in_secs = token.expires_in().map_or(0, |d| d.as_secs()),
                "Tenant access token has expired, the request will likely be rejected"
            );
        }

        self.request_records(table, languages, token, cursor)
            .await
            .map_err(I18nError::FetchFailure)
    }

    async fn request_records(
        &self,
        table: &TableRef,
        languages: &[String],
        token: &TenantToken,
        cursor: Option<&str>,
    ) -> std::result::Result<RecordPage, ApiError> {
        let url = format!(
            "{}/bitable/v1/apps/{}/tables/{}/records",
            self.base_url, table.app_token, table.table_id
        );

        let mut query = vec![
            (
                "field_names",
                serde_json::to_string(&table.field_names(languages))?,
            ),
            ("page_size", PAGE_SIZE.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push(("page_token", cursor.to_string()));
        }

        debug!(url = %url, cursor = ?cursor, "Requesting bitable records");

        let response = self
            .client
            .get(&url)
            .header("Content-Type", CONTENT_TYPE)
            .bearer_auth(token.value())
            .query(&query)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let records_response: RecordsResponse = serde_json::from_str(&body)?;
        records_response.into_page()
    }
}

async fn read_success_body(response: reqwest::Response) -> std::result::Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::StatusError { status, body });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_start_with_the_key_column() {
        let table = TableRef::new("app", "tbl", "key");
        let languages = vec!["en".to_string(), "zh".to_string()];
        let names = table.field_names(&languages);
        assert_eq!(names, vec!["key", "en", "zh"]);
        assert_eq!(
            serde_json::to_string(&names).unwrap(),
            r#"["key","en","zh"]"#
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client =
            BitableClient::new("https://open.feishu.cn/open-apis/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://open.feishu.cn/open-apis");
    }

    #[tokio::test]
    async fn empty_credentials_fail_before_any_request() {
        let client = BitableClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = client.tenant_access_token("", "secret").await.unwrap_err();
        assert!(matches!(err, I18nError::AuthFailure(ApiError::MissingCredentials(_))));
    }

    #[tokio::test]
    async fn transport_errors_surface_as_fetch_failures() {
        // Port 9 (discard) is closed on test machines, so the connect fails.
        let client = BitableClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let table = TableRef::new("app", "tbl", "key");
        let token = TenantToken::new("t-abc", Duration::from_secs(7200));
        let err = client
            .list_records(&table, &["en".to_string()], &token, None)
            .await
            .unwrap_err();
        assert!(matches!(err, I18nError::FetchFailure(ApiError::HttpError(_))));
    }
}
