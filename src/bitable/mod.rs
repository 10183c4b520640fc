pub mod client;
pub mod source;
pub mod types;

pub use client::{BitableClient, TableRef, PAGE_SIZE};
pub use source::{PageFetcher, TableSource};
pub use types::{RecordPage, RecordRow, TenantToken};
