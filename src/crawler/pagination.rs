//! Page URL composition for a seed

/// URL of result page `page` (1-based) of `seed`
///
/// Page 1 is the seed itself. Later pages append `<param>=<page>` to the
/// query, keeping any fragment at the end.
///
/// # Example
///
/// ```
/// use listing_harvest::crawler::page_url;
///
/// assert_eq!(page_url("https://a.b/venda/", 1, "pagina"), "https://a.b/venda/");
/// assert_eq!(page_url("https://a.b/venda/", 3, "pagina"), "https://a.b/venda/?pagina=3");
/// ```
pub fn page_url(seed: &str, page: u32, param: &str) -> String {
    if page <= 1 {
        return seed.to_string();
    }

    let (base, fragment) = match seed.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (seed, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    let mut url = format!("{}{}{}={}", base, separator, param, page);
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// Every page URL of a seed, in crawl order
pub fn page_urls(seed: &str, pages: u32, param: &str) -> Vec<String> {
    (1..=pages).map(|page| page_url(seed, page, param)).collect()
}
