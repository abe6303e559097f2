use reqwest::Client;
use tracing::info;

use crate::error::{EtlError, Result};

/// Download the document at `url` into memory.
pub async fn download_document(client: &Client, url: &str) -> Result<Vec<u8>> {
    info!(url, "reading source data");
    let fetch_err = |source: reqwest::Error| EtlError::Fetch {
        url: url.to_string(),
        source,
    };

    let bytes = client
        .get(url)
        .send()
        .await
        .map_err(fetch_err)?
        .error_for_status()
        .map_err(fetch_err)?
        .bytes()
        .await
        .map_err(fetch_err)?;

    info!(url, size_bytes = bytes.len(), "downloaded document");
    Ok(bytes.to_vec())
}
