// src/fetch/mod.rs
//! Source page scraping and document download.

pub mod document;
pub mod urls;

pub use document::download_document;
pub use urls::{fetch_document_links, file_stem, select_link};
