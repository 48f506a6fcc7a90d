//! URL resolution utilities.
//!
//! [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
//! [URL Standard](https://url.spec.whatwg.org/)

use url::Url;

/// [§ 2.4 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative URL against a base URL.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// Without a base (or with a base that is not itself a valid URL) the href is
/// returned unchanged, which keeps local relative paths usable by a
/// filesystem fetcher.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    // STEP 1
    if let Ok(absolute) = Url::parse(href) {
        return absolute.to_string();
    }

    // STEP 2
    let Some(base) = base_url.and_then(|b| Url::parse(b).ok()) else {
        return href.to_string();
    };
    base.join(href)
        .map_or_else(|_| href.to_string(), |resolved| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_href_is_kept() {
        assert_eq!(
            resolve_url("https://example.com/a.css", Some("https://other.org/")),
            "https://example.com/a.css"
        );
    }

    #[test]
    fn test_relative_href_joins_base_directory() {
        assert_eq!(
            resolve_url("style.css", Some("https://example.com/docs/index.html")),
            "https://example.com/docs/style.css"
        );
        assert_eq!(
            resolve_url("/root.css", Some("https://example.com/docs/index.html")),
            "https://example.com/root.css"
        );
    }

    #[test]
    fn test_file_base() {
        assert_eq!(
            resolve_url("../a.css", Some("file:///srv/site/pages/index.html")),
            "file:///srv/site/a.css"
        );
    }

    #[test]
    fn test_no_base_returns_href() {
        assert_eq!(resolve_url("style.css", None), "style.css");
    }
}
