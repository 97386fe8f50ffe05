use scraper::{Html, Selector};

use crate::error::NormalizeError;
use crate::normalization::heading_text;
use crate::rewrite;

/// Selectors for every managed head tag kind, parsed once per run.
///
/// Managed tags are matched as direct children of `<head>` only, the same
/// scope the rewriter works in.
pub struct HeadSelectors {
    title: Selector,
    description: Selector,
    canonical: Selector,
    og_title: Selector,
    og_description: Selector,
    og_url: Selector,
    og_image: Selector,
    favicon: Selector,
    heading: Selector,
}

impl HeadSelectors {
    pub fn new() -> Result<Self, NormalizeError> {
        Ok(Self {
            title: parse_selector(rewrite::TITLE)?,
            description: parse_selector(rewrite::DESCRIPTION)?,
            canonical: parse_selector(rewrite::CANONICAL)?,
            og_title: parse_selector(rewrite::OG_TITLE)?,
            og_description: parse_selector(rewrite::OG_DESCRIPTION)?,
            og_url: parse_selector(rewrite::OG_URL)?,
            og_image: parse_selector(rewrite::OG_IMAGE)?,
            favicon: parse_selector(rewrite::FAVICON)?,
            heading: parse_selector("h1")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, NormalizeError> {
    Selector::parse(selector).map_err(|e| NormalizeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Read-only facts about a document's head, taken before rewriting.
///
/// Values are entity-decoded text as the HTML5 parser sees it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadSnapshot {
    /// Text of the first head `<title>`, trimmed; `None` if missing or blank.
    pub title: Option<String>,
    /// `content` of the first `meta[name=description]`, verbatim.
    pub description: Option<String>,
    /// Text of the first `<h1>`, whitespace-collapsed; `None` if missing or blank.
    pub heading: Option<String>,
    pub title_count: usize,
    pub description_count: usize,
    pub canonical_count: usize,
    pub og_title_count: usize,
    pub og_description_count: usize,
    pub og_url_count: usize,
    pub og_image_count: usize,
    /// `href` of every head `link[rel~=icon]`, in document order.
    pub favicon_hrefs: Vec<String>,
}

impl HeadSnapshot {
    /// Parse `html` and collect the facts derivation and upsert rely on.
    pub fn from_html(html: &str, selectors: &HeadSelectors) -> Self {
        let document = Html::parse_document(html);

        let title = document
            .select(&selectors.title)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let description = document
            .select(&selectors.description)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string);

        let heading = document
            .select(&selectors.heading)
            .next()
            .map(|el| heading_text(&el.text().collect::<String>()))
            .filter(|h| !h.is_empty());

        let favicon_hrefs = document
            .select(&selectors.favicon)
            .map(|el| el.value().attr("href").unwrap_or_default().to_string())
            .collect();

        Self {
            title,
            description,
            heading,
            title_count: document.select(&selectors.title).count(),
            description_count: document.select(&selectors.description).count(),
            canonical_count: document.select(&selectors.canonical).count(),
            og_title_count: document.select(&selectors.og_title).count(),
            og_description_count: document.select(&selectors.og_description).count(),
            og_url_count: document.select(&selectors.og_url).count(),
            og_image_count: document.select(&selectors.og_image).count(),
            favicon_hrefs,
        }
    }

    /// True when at least one favicon link survives placeholder removal.
    pub fn has_usable_favicon(&self, is_placeholder: impl Fn(&str) -> bool) -> bool {
        self.favicon_hrefs.iter().any(|href| !is_placeholder(href))
    }
}

