// src/fetch/urls.rs
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::error::{EtlError, Result};

/// Every `<a href>` on `page_url`, resolved to an absolute URL, in page order.
pub async fn fetch_document_links(client: &Client, page_url: &str) -> Result<Vec<String>> {
    info!(page = page_url, "obtaining document links");
    let base = Url::parse(page_url)
        .map_err(|e| EtlError::Config(format!("invalid page url {}: {}", page_url, e)))?;
    let fetch_err = |source: reqwest::Error| EtlError::Fetch {
        url: page_url.to_string(),
        source,
    };

    let html = client
        .get(page_url)
        .send()
        .await
        .map_err(fetch_err)?
        .error_for_status()
        .map_err(fetch_err)?
        .text()
        .await
        .map_err(fetch_err)?;

    let links = extract_links(&html, &base);
    debug!(count = links.len(), "links on page");
    Ok(links)
}

pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("CSS selector for links should be valid");
    Html::parse_document(html)
        .select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|u| u.to_string())
        .collect()
}

/// First link containing `marker`.
pub fn select_link(links: &[String], marker: &str) -> Result<String> {
    let link = links
        .iter()
        .find(|l| l.contains(marker))
        .cloned()
        .ok_or_else(|| EtlError::NoLinkFound {
            marker: marker.to_string(),
        })?;
    info!(link = %link, "retrieved document url");
    Ok(link)
}

/// Original file name of a document link: last path segment without its
/// extension.
pub fn file_stem(link: &str) -> String {
    let path = Url::parse(link)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| link.to_string());
    let name = path.rsplit('/').next().unwrap_or_default();
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <a href="/government/statistics">Statistics</a>
          <a href="https://assets.publishing.service.gov.uk/media/abc/ET_3.1_DEC_24.xlsx">ET 3.1</a>
          <a href="https://assets.publishing.service.gov.uk/media/def/ET_3.1_SEP_24.xlsx">old</a>
          <a>no href</a>
        </body></html>"#;

    fn base() -> Url {
        Url::parse("https://www.gov.uk/government/statistics/oil-and-oil-products-section-3-energy-trends")
            .unwrap()
    }

    #[test]
    fn extracts_and_resolves_links() {
        let links = extract_links(PAGE, &base());
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], "https://www.gov.uk/government/statistics");
    }

    #[test]
    fn selects_first_marker_link() {
        let links = extract_links(PAGE, &base());
        let link = select_link(&links, "ET_3.1_").unwrap();
        assert!(link.ends_with("ET_3.1_DEC_24.xlsx"));
    }

    #[test]
    fn missing_marker_is_an_error() {
        let links = extract_links(PAGE, &base());
        match select_link(&links, "ET_9.9_") {
            Err(EtlError::NoLinkFound { marker }) => assert_eq!(marker, "ET_9.9_"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stem_drops_path_and_extension() {
        assert_eq!(
            file_stem("https://assets.publishing.service.gov.uk/media/abc/ET_3.1_DEC_24.xlsx"),
            "ET_3.1_DEC_24"
        );
        assert_eq!(file_stem("https://example.com/a/b/report.tar.gz"), "report.tar");
        assert_eq!(file_stem("https://example.com/a/README"), "README");
        assert_eq!(file_stem("local/dir/ET_3.1_MAR_25.xlsx"), "ET_3.1_MAR_25");
    }
}
