pub mod collector;
pub mod table;

pub use collector::collect_all;
pub use table::{LanguageMap, MergeStats, TranslationTable};

use crate::bitable::{BitableClient, PageFetcher, TableRef, TableSource};
use crate::output::JsonFileWriter;
use crate::utils::{I18nConfig, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Full run against the live service: token, every page, then the files.
pub async fn generate_files(config: &I18nConfig) -> Result<Vec<PathBuf>> {
    let client = BitableClient::new(&config.base_url, Duration::from_secs(config.timeout_seconds))?;

    let token = client
        .tenant_access_token(&config.app_id, &config.app_secret)
        .await?;
    tracing::info!(
        expires_in_secs = ?token.expires_in().map(|d| d.as_secs()),
        "Get token success"
    );

    let source = TableSource::new(
        &client,
        TableRef::new(&config.app_token, &config.table_id, &config.key_field),
        config.languages(),
        token,
    );

    generate_files_from(&source, config).await
}

/// Collects from `fetcher` and writes the files described by `config`.
/// Nothing is written unless every page was fetched.
pub async fn generate_files_from<F>(fetcher: &F, config: &I18nConfig) -> Result<Vec<PathBuf>>
where
    F: PageFetcher + ?Sized,
{
    let table = collect_all(fetcher, &config.key_field, config.languages(), config.max_pages).await?;

    let written = JsonFileWriter::from_config(config).write_all(&table).await?;
    tracing::info!(
        files = written.len(),
        output_dir = %config.output_dir.display(),
        "Generate file success"
    );

    Ok(written)
}
