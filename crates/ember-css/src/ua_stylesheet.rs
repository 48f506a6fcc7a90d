//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! The default sheet is always placed first, so any document rule of equal or
//! higher priority overrides it.

use std::sync::OnceLock;

use crate::parser::{Stylesheet, parse};

/// [WHATWG HTML § 15.3 Rendering: Suggested default style sheet](https://html.spec.whatwg.org/multipage/rendering.html#the-css-user-agent-style-sheet-and-presentational-hints)
///
/// A subset of the suggested rules, restricted to what the parser and layout
/// engine understand.
pub const UA_CSS: &str = r"
/* [§ 15.3.1 Hidden elements] */
base, basefont, datalist, head, link, meta, noembed, noframes,
param, rp, script, style, template, title {
    display: none;
}

/* [§ 15.3.3 Flow content] */
address, article, aside, blockquote, body, center, dd, details,
dialog, dir, div, dl, dt, fieldset, figcaption, figure, footer,
form, h1, h2, h3, h4, h5, h6, header, hgroup, hr, html, legend,
li, listing, main, menu, nav, ol, p, plaintext, pre, search,
section, summary, table, ul, xmp {
    display: block;
}

/* [§ 15.3.6 Sections and headings] */
h1 { font-size: 2em; font-weight: bold; }
h2 { font-size: 1.5em; font-weight: bold; }
h3 { font-size: 1.17em; font-weight: bold; }
h4 { font-weight: bold; }
h5 { font-size: 0.83em; font-weight: bold; }
h6 { font-size: 0.67em; font-weight: bold; }

/* [§ 15.3.4 Phrasing content] */
b, strong, th { font-weight: bold; }
i, em, cite, var, dfn { font-style: italic; }
small { font-size: 90%; }
big { font-size: 110%; }
sub { vertical-align: sub; font-size: 75%; }
sup { vertical-align: super; font-size: 75%; }
code, kbd, samp, tt { font-family: monospace; }

/* [§ 15.3.5 Grouping content] */
pre { background-color: gray; font-family: monospace; }

/* [§ 15.5.4 Links] */
a { color: blue; cursor: pointer; }

/* [§ 15.5.15 Form controls] */
input, button {
    font-size: 16px;
    background-color: lightblue;
}
button { cursor: pointer; }
";

/// The parsed default stylesheet, built once per process.
pub fn default_stylesheet() -> &'static Stylesheet {
    static SHEET: OnceLock<Stylesheet> = OnceLock::new();
    SHEET.get_or_init(|| parse(UA_CSS))
}
