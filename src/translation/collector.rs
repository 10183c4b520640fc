use crate::bitable::PageFetcher;
use crate::translation::table::TranslationTable;
use crate::utils::{ApiError, I18nError, Result};
use tracing::{info, warn};

/// Pages through the whole table and folds every row into a
/// [`TranslationTable`].
///
/// The loop stops on the first page that either carries no continuation
/// cursor or explicitly reports `has_more: false`; a page that leaves
/// `has_more` out is judged by its cursor alone. Any fetch error aborts the
/// run and nothing collected so far is returned. `max_pages` caps the number of
/// requests for a service that never stops handing out cursors.
pub async fn collect_all<F>(
    fetcher: &F,
    key_field: &str,
    languages: Vec<String>,
    max_pages: usize,
) -> Result<TranslationTable>
where
    F: PageFetcher + ?Sized,
{
    let mut table = TranslationTable::new(key_field, languages);
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if pages >= max_pages {
            return Err(I18nError::FetchFailure(ApiError::PageLimitExceeded(max_pages)));
        }

        let page = fetcher.fetch_page(cursor.as_deref()).await?;
        pages += 1;

        let stats = table.merge_page(&page);
        info!(
            page = pages,
            rows = stats.rows,
            skipped = stats.skipped,
            total = ?page.total,
            "Fetched bitable records"
        );

        match (page.next_cursor, page.has_more) {
            (Some(_), Some(false)) => {
                warn!(page = pages, "Page returned a page_token with has_more=false, stopping");
                break;
            }
            (Some(next), _) => cursor = Some(next),
            (None, Some(true)) => {
                warn!(page = pages, "Page reported has_more=true without a page_token, stopping");
                break;
            }
            (None, _) => break,
        }
    }

    info!(pages, languages = table.languages().len(), "Collected translations");
    Ok(table)
}
