//! Document session.
//!
//! A [`Document`] owns one parsed page and everything derived from it: the
//! stylesheet set, the font cache, the laid-out box tree, the display list and
//! the scroll offset. Every change to the tree re-runs the whole pipeline.
//!
//! ```text
//! HTML ─parse─▶ DomTree ─style─▶ styled DomTree ─layout─▶ LayoutTree ─paint─▶ DisplayList
//!                  ▲                                                              │
//!                  └──────────── set_inner_html / set_attribute / focus ◀─────────┘
//! ```

use ember_common::url::resolve_url;
use ember_common::warning::{clear_warnings, warn_once};
use ember_css::{
    CssParseError, DisplayList, DrawCommand, FontCache, LayoutConfig, LayoutTree, Stylesheet,
    default_stylesheet, layout, paint, parse, parse_selector, style_with_font_size,
};
use ember_dom::{DomTree, NodeId, StyleMap};
use thiserror::Error;

use crate::fetch::{FetchError, ResourceFetcher};

/// Errors reported by a [`Document`].
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The main document could not be fetched.
    #[error("failed to load '{url}': {source}")]
    Load {
        /// The URL that was requested.
        url: String,
        /// Why the fetch failed.
        #[source]
        source: FetchError,
    },

    /// A DOM call that needs an element was given a text node or a
    /// node that does not exist.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// A selector string did not parse.
    #[error("invalid selector '{selector}': {source}")]
    InvalidSelector {
        /// The selector text as given.
        selector: String,
        /// The parse failure.
        #[source]
        source: CssParseError,
    },
}

/// A loaded page and its rendering state.
pub struct Document {
    url: Option<String>,
    dom: DomTree,
    stylesheet: Stylesheet,
    config: LayoutConfig,
    fonts: FontCache,
    layout: LayoutTree,
    display_list: DisplayList,
    title: String,
    scroll: f32,
    focus: Option<NodeId>,
}

impl Document {
    /// Fetch and load the page at `url`.
    ///
    /// A failed fetch is not an error for the caller: the session shows a
    /// generated error page instead.
    #[must_use]
    pub fn open(
        url: &str,
        fetcher: &dyn ResourceFetcher,
        config: LayoutConfig,
        fonts: FontCache,
    ) -> Self {
        log::info!("loading {url}");
        let html = match fetcher.fetch(url) {
            Ok(resource) => {
                if let Some(max_age) = resource.max_age {
                    log::debug!("{url} may be cached for {max_age}s");
                }
                resource.body
            }
            Err(source) => {
                let error = DocumentError::Load {
                    url: url.to_string(),
                    source,
                };
                log::warn!("{error}");
                error_page(&error)
            }
        };
        Self::load(&html, Some(url), fetcher, config, fonts)
    }

    /// Load a page from markup.
    ///
    /// Linked stylesheets are resolved against `base_url` and fetched through
    /// `fetcher`; one that fails to load is skipped.
    #[must_use]
    pub fn load(
        html: &str,
        base_url: Option<&str>,
        fetcher: &dyn ResourceFetcher,
        config: LayoutConfig,
        fonts: FontCache,
    ) -> Self {
        clear_warnings();
        let dom = ember_html::parse(html);
        let stylesheet = collect_stylesheets(&dom, base_url, fetcher);
        let title = find_title(&dom);
        let mut document = Self {
            url: base_url.map(str::to_string),
            dom,
            stylesheet,
            config,
            fonts,
            layout: LayoutTree::default(),
            display_list: DisplayList::new(),
            title,
            scroll: 0.0,
            focus: None,
        };
        document.render();
        document
    }

    /// Re-run style, layout and paint over the current tree.
    pub fn render(&mut self) {
        style_with_font_size(&mut self.dom, &self.stylesheet, self.config.default_font_size);
        self.layout = layout(&self.dom, &self.fonts, &self.config);
        self.display_list = paint(&self.layout, &self.dom);
        log::debug!(
            "rendered {} boxes into {} commands",
            self.layout.len(),
            self.display_list.len()
        );
    }

    /// Append `css` after the document's own sheets and re-render.
    pub fn add_user_stylesheet(&mut self, css: &str) {
        self.stylesheet.append(&parse(css));
        self.render();
    }

    /// The URL the document was loaded from.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The document tree.
    #[must_use]
    pub const fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// The default stylesheet followed by the document's own sheets.
    #[must_use]
    pub const fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// The layout settings this document renders with.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Text of the first `title` element, or empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The box tree from the last render.
    #[must_use]
    pub const fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    /// The display list from the last render.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// The resolved style of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not exist in this document.
    #[must_use]
    pub fn computed_style(&self, node: NodeId) -> &StyleMap {
        self.dom.style(node)
    }

    /// Current vertical scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Commands that overlap the visible window at the current scroll offset.
    pub fn visible_commands(&self, viewport_height: f32) -> impl Iterator<Item = &DrawCommand> {
        self.display_list.visible(self.scroll, viewport_height)
    }

    /// Scroll by `delta` pixels, clamped so the page never scrolls above its
    /// top or past its bottom margin. Returns the new offset.
    pub fn scroll_by(&mut self, delta: f32, viewport_height: f32) -> f32 {
        let max_scroll =
            (self.layout.document_height() + self.config.vertical_margin - viewport_height).max(0.0);
        self.scroll = (self.scroll + delta).clamp(0.0, max_scroll);
        self.scroll
    }

    /// [§ 7.4.6.1 Scrolling to a fragment](https://html.spec.whatwg.org/multipage/browsing-the-web.html#scroll-to-fragid)
    ///
    /// Scroll to the first box generated by the element whose `id` matches
    /// `fragment` (with or without its leading `#`). Returns `false` and
    /// leaves the offset alone when nothing matches.
    pub fn scroll_to_fragment(&mut self, fragment: &str, viewport_height: f32) -> bool {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let Some(target) = self.layout.find_by_element_id(&self.dom, fragment) else {
            warn_once("Document", &format!("no element with id '{fragment}'"));
            return false;
        };
        let destination = self.layout.get(target).y();
        let _ = self.scroll_by(destination - self.scroll, viewport_height);
        true
    }

    /// Replace the children of `node` with the parsed `html` fragment.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnElement`] if `node` is not an element.
    pub fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<(), DocumentError> {
        self.require_element(node)?;
        let (fragment, top_level) = ember_html::parse_fragment(html);
        let imported: Vec<NodeId> = top_level
            .into_iter()
            .map(|id| self.dom.import_subtree(&fragment, id))
            .collect();
        self.dom.replace_children(node, &imported);

        if self.focus.is_some_and(|focus| !self.is_attached(focus)) {
            self.focus = None;
        }
        self.render();
        Ok(())
    }

    /// Read an attribute; names are case-insensitive.
    #[must_use]
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.dom.attribute(node, &name.to_ascii_lowercase())
    }

    /// Set an attribute and re-render.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnElement`] if `node` is not an element.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        let element = self
            .dom
            .as_element_mut(node)
            .ok_or(DocumentError::NotAnElement(node))?;
        let _ = element
            .attrs
            .insert(name.to_ascii_lowercase(), value.to_string());
        self.render();
        Ok(())
    }

    /// Every node matching `selector`, in document order. An empty
    /// selector matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidSelector`] if the selector does not
    /// parse.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DocumentError> {
        if selector.trim().is_empty() {
            return Ok(Vec::new());
        }
        let parsed = parse_selector(selector).map_err(|source| DocumentError::InvalidSelector {
            selector: selector.to_string(),
            source,
        })?;
        Ok(self
            .dom
            .descendants(self.dom.root())
            .into_iter()
            .filter(|&id| parsed.matches(&self.dom, id))
            .collect())
    }

    /// The element that currently has focus.
    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    /// Move focus to `node`, clearing it from the previous holder.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnElement`] if `node` is not an element.
    pub fn focus(&mut self, node: NodeId) -> Result<(), DocumentError> {
        self.require_element(node)?;
        self.set_focused(false);
        self.focus = Some(node);
        self.set_focused(true);
        self.render();
        Ok(())
    }

    /// Drop focus, if any element has it.
    pub fn blur(&mut self) {
        if self.focus.is_some() {
            self.set_focused(false);
            self.focus = None;
            self.render();
        }
    }

    fn set_focused(&mut self, focused: bool) {
        if let Some(element) = self.focus.and_then(|id| self.dom.as_element_mut(id)) {
            element.is_focused = focused;
        }
    }

    fn require_element(&self, node: NodeId) -> Result<(), DocumentError> {
        self.dom
            .as_element(node)
            .map(|_| ())
            .ok_or(DocumentError::NotAnElement(node))
    }

    fn is_attached(&self, node: NodeId) -> bool {
        node == self.dom.root() || self.dom.is_descendant_of(node, self.dom.root())
    }
}

/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
/// [§ 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// The default stylesheet, then every `<link rel=stylesheet>` and `<style>`
/// sheet in document order.
fn collect_stylesheets(
    dom: &DomTree,
    base_url: Option<&str>,
    fetcher: &dyn ResourceFetcher,
) -> Stylesheet {
    let mut stylesheet = default_stylesheet().clone();
    for node in dom.descendants(dom.root()) {
        if dom.is_element_named(node, "link") {
            let is_stylesheet = dom
                .attribute(node, "rel")
                .is_some_and(|rel| rel.eq_ignore_ascii_case("stylesheet"));
            let Some(href) = dom.attribute(node, "href").filter(|_| is_stylesheet) else {
                continue;
            };
            let url = resolve_url(href, base_url);
            match fetcher.fetch(&url) {
                Ok(resource) => stylesheet.append(&parse(&resource.body)),
                Err(e) => log::warn!(target: "Document", "skipping stylesheet {url}: {e}"),
            }
        } else if dom.is_element_named(node, "style") {
            stylesheet.append(&parse(&dom.text_content(node)));
        }
    }
    log::debug!("collected {} rules", stylesheet.len());
    stylesheet
}

/// [§ 4.2.2 The title element](https://html.spec.whatwg.org/multipage/semantics.html#the-title-element)
fn find_title(dom: &DomTree) -> String {
    dom.descendants(dom.root())
        .into_iter()
        .find(|&id| dom.is_element_named(id, "title"))
        .map(|id| dom.text_content(id).trim().to_string())
        .unwrap_or_default()
}

/// Markup shown in place of a page that could not be fetched.
fn error_page(error: &DocumentError) -> String {
    let message = error
        .to_string()
        .replace('&', "&amp;")
        .replace('<', "&lt;");
    format!("<html><body><h1>Page load error</h1><p>{message}</p></body></html>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_escapes_markup() {
        let error = DocumentError::Load {
            url: "<x>&".to_string(),
            source: FetchError::NotFound("<x>&".to_string()),
        };
        let page = error_page(&error);
        assert!(page.starts_with("<html><body><h1>Page load error</h1><p>"));
        assert!(page.contains("&lt;x>&amp;"));
    }

    #[test]
    fn test_title_is_trimmed_text() {
        let dom = ember_html::parse("<title>  My Page </title><p>x</p>");
        assert_eq!(find_title(&dom), "My Page");
        assert_eq!(find_title(&ember_html::parse("<p>x</p>")), "");
    }
}
