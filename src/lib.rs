pub mod bitable;
pub mod output;
pub mod translation;
pub mod utils;

pub use bitable::{
    BitableClient, PageFetcher, RecordPage, RecordRow, TableRef, TableSource, TenantToken,
};
pub use output::JsonFileWriter;
pub use translation::{collect_all, generate_files, generate_files_from, TranslationTable};
pub use utils::{ApiError, I18nConfig, I18nError, Result};
