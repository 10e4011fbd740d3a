//! Listing page layouts
//!
//! A layout knows how one generation of the listing site marks up its search
//! result cards and detail pages. Layouts are pure: they read a parsed
//! document and return records, leaving all fetching to the crawl driver.

mod dates;
mod rent;
mod rent_2018;
mod sale;

pub use dates::{archive_date, created_at_stamp};
pub use rent::RentLayout;
pub use rent_2018::Rent2018Layout;
pub use sale::SaleLayout;

use crate::config::LayoutKind;
use crate::record::Record;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Errors raised while extracting records
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid detail base URL '{0}'")]
    BaseUrl(String),
}

/// A listing card found on a search result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Fields read from the card itself
    pub record: Record,

    /// Absolute URL of the listing's detail page, if the card links one
    pub detail_url: Option<String>,
}

/// Extraction rules for one page layout
pub trait Layout: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extracts every listing card of a search result page, in document order
    fn listings(&self, document: &Html, page_url: &str) -> Result<Vec<Listing>, ExtractError>;

    /// Extracts the fields read from a listing's detail page
    fn details(&self, document: &Html) -> Record;

    /// Fields produced by [`Layout::details`]
    fn detail_fields(&self) -> &'static [&'static str];

    /// Detail fields with no values, used when the detail page is unavailable
    fn blank_details(&self) -> Record {
        self.detail_fields()
            .iter()
            .fold(Record::new(), |record, field| record.with(field, None))
    }
}

/// Builds the layout selected in configuration
pub fn layout_for(kind: LayoutKind, detail_base_url: &str) -> Result<Arc<dyn Layout>, ExtractError> {
    Ok(match kind {
        LayoutKind::Sale => Arc::new(SaleLayout::new(detail_base_url)?),
        LayoutKind::Rent => Arc::new(RentLayout::new(detail_base_url)?),
        LayoutKind::Rent2018 => Arc::new(Rent2018Layout::new(detail_base_url)?),
    })
}

/// Compiles a CSS selector
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

pub(crate) fn parse_base_url(base: &str) -> Result<Url, ExtractError> {
    Url::parse(base).map_err(|_| ExtractError::BaseUrl(base.to_string()))
}

/// Trimmed text content of an element
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match of `selector` under `element`
pub(crate) fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(text_of)
}

/// Trimmed text of the first match of `selector` in the whole document
pub(crate) fn document_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(text_of)
}

/// Texts of every match of `selector` in the document
pub(crate) fn document_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document.select(selector).map(text_of).collect()
}

/// Joins list values for a single cell; no items means no value
pub(crate) fn join_list(items: Vec<String>) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

/// Resolves a card link against the detail base URL
pub(crate) fn resolve_detail(base: &Url, href: Option<&str>) -> Option<String> {
    let href = href?.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(|url| url.to_string())
}

/// Keeps only the characters accepted by `keep`
pub(crate) fn retain_chars(value: &str, keep: impl Fn(char) -> bool) -> String {
    value.chars().filter(|c| keep(*c)).collect()
}

pub(crate) fn digits(value: &str) -> String {
    retain_chars(value, |c| c.is_ascii_digit())
}

/// Numeric part of the first detail item mentioning any of `labels`
pub(crate) fn labelled_number(items: &[String], labels: &[&str]) -> Option<String> {
    items
        .iter()
        .find(|item| labels.iter().any(|label| item.contains(label)))
        .map(|item| retain_chars(item, |c| c.is_ascii_digit() || c == '-'))
}
