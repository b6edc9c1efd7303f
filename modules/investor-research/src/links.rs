use investor_common::CrawledPage;

/// Format crawled sub-pages as `[title](url)` citations. Pages without a URL
/// are dropped; a missing or blank title falls back to the URL.
pub fn format_links(pages: &[CrawledPage]) -> Vec<String> {
    pages
        .iter()
        .filter_map(|page| {
            let url = page.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
            let title = page
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(url);
            Some(format!("[{title}]({url})"))
        })
        .collect()
}
