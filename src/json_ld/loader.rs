use std::sync::LazyLock;

use log::debug;
use scraper::{Html, Selector};

use crate::error::ImportError;
use crate::fetchers::RequestFetcher;

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("Invalid JSON-LD selector")
});

/// Text content of one `<script type="application/ld+json">` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataNode {
    /// Position among the document's JSON-LD scripts
    pub index: usize,
    pub content: String,
}

/// Collect every JSON-LD script of an HTML document, in document order.
pub fn load_from_html(html: &str) -> Result<Vec<MetadataNode>, ImportError> {
    let document = Html::parse_document(html);
    let nodes: Vec<MetadataNode> = document
        .select(&JSON_LD_SELECTOR)
        .enumerate()
        .map(|(index, script)| MetadataNode {
            index,
            content: script.text().collect(),
        })
        .collect();

    debug!("Found {} JSON-LD script tags", nodes.len());
    if nodes.is_empty() {
        return Err(ImportError::NoMetadataFound);
    }
    Ok(nodes)
}

/// Fetch `url` and collect its JSON-LD scripts.
///
/// A document that cannot be retrieved is a [`ImportError::Fetch`], one that
/// loads but has no scripts is [`ImportError::NoMetadataFound`].
pub async fn load_from_url(
    fetcher: &RequestFetcher,
    url: &str,
) -> Result<Vec<MetadataNode>, ImportError> {
    let html = fetcher.fetch(url).await?;
    load_from_html(&html)
}
