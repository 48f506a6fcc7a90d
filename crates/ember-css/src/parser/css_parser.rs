//! Stylesheet parser.
//!
//! [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing)
//!
//! "When errors occur in CSS, the parser attempts to recover gracefully,
//! throwing away only the minimum amount of content before returning to
//! parsing as normal."
//!
//! This is not the token-based algorithm of CSS Syntax Level 3. It is a small
//! character-level recursive-descent parser over three grammars (selector
//! list, declaration list, single declaration). Each grammar returns a
//! [`CssParseError`]; the caller turns that into a skip to the next boundary
//! character and carries on. Errors never escape [`parse`] or
//! [`parse_declaration_block`].

use std::collections::HashMap;

use thiserror::Error;

use crate::selector::Selector;

/// Property name (case-folded) to raw value text.
pub type Declarations = HashMap<String, String>;

/// [§ 9 Style rules](https://www.w3.org/TR/css-syntax-3/#style-rules)
///
/// One selector with its declaration block. A comma-separated selector list
/// expands into one `Rule` per alternative, each with a copy of the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The selector this rule applies to.
    pub selector: Selector,
    /// The declarations of the rule's block.
    pub declarations: Declarations,
}

/// An ordered list of rules, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of rules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if there are no rules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append every rule of `other`, preserving its order.
    pub fn append(&mut self, other: &Self) {
        self.rules.extend(other.rules.iter().cloned());
    }

    /// Iterate over the rules in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a Stylesheet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// A local parse failure. The position is a character offset into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssParseError {
    /// A specific character was required.
    #[error("expected '{expected}' at offset {position}")]
    ExpectedChar {
        /// The character that was required.
        expected: char,
        /// Where it was required.
        position: usize,
    },
    /// A word (selector, property or value) was required.
    #[error("expected a word at offset {position}")]
    ExpectedWord {
        /// Where the word was required.
        position: usize,
    },
    /// The selector uses syntax this engine does not support (ids,
    /// compound selectors, pseudo-classes, attribute selectors, ...).
    #[error("unsupported selector '{text}' at offset {position}")]
    UnsupportedSelector {
        /// The offending selector text.
        text: String,
        /// Where it starts.
        position: usize,
    },
    /// Input ended in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Parse a stylesheet. Malformed rules and declarations are dropped.
#[must_use]
pub fn parse(css: &str) -> Stylesheet {
    CSSParser::new(css).parse_stylesheet()
}

/// Parse the contents of a declaration block, as found in a `style`
/// attribute.
#[must_use]
pub fn parse_declaration_block(css: &str) -> Declarations {
    CSSParser::new(css).parse_declarations()
}

/// Parse a single standalone selector (no commas).
///
/// # Errors
///
/// Returns an error if the text is not exactly one supported selector.
pub fn parse_selector(text: &str) -> Result<Selector, CssParseError> {
    let mut parser = CSSParser::new(text);
    parser.whitespace();
    let selector = parser.selector()?;
    parser.expect_end()?;
    Ok(selector)
}

/// Parse a comma-separated selector list.
///
/// # Errors
///
/// Returns an error if any alternative fails to parse.
pub fn parse_selector_list(text: &str) -> Result<Vec<Selector>, CssParseError> {
    let mut parser = CSSParser::new(text);
    parser.whitespace();
    let selectors = parser.selector_list()?;
    parser.expect_end()?;
    Ok(selectors)
}

/// Recursive-descent stylesheet parser.
pub struct CSSParser {
    input: Vec<char>,
    pos: usize,
}

impl CSSParser {
    /// Create a parser over the given text.
    #[must_use]
    pub fn new(css: &str) -> Self {
        Self {
            input: css.chars().collect(),
            pos: 0,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// Parse rules until end of input. At-rules are skipped wholesale; a rule
    /// whose selector cannot be parsed is skipped up to the next `;`, or past
    /// the whole `{...}` block that follows it.
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut sheet = Stylesheet::new();
        loop {
            self.whitespace();
            let Some(c) = self.peek() else {
                break;
            };
            if c == '@' {
                self.skip_at_rule();
                continue;
            }
            match self.rule() {
                Ok(rules) => sheet.rules.extend(rules),
                Err(err) => {
                    log::debug!(target: "css", "dropping rule: {err}");
                    self.resync_rule();
                }
            }
        }
        sheet
    }

    /// Parse declarations until `}` or end of input. A bad declaration is
    /// skipped up to the next `;` or `}`; the rest of the block survives.
    pub fn parse_declarations(&mut self) -> Declarations {
        let mut declarations = Declarations::new();
        loop {
            self.whitespace();
            match self.peek() {
                None | Some('}') => break,
                Some(';') => {
                    self.pos += 1;
                    continue;
                }
                Some(_) => {}
            }
            match self.declaration() {
                Ok((property, value)) => {
                    let _ = declarations.insert(property, value);
                }
                Err(err) => {
                    log::debug!(target: "css", "dropping declaration: {err}");
                    if self.skip_until(&[';', '}']) == Some(';') {
                        self.pos += 1;
                    }
                }
            }
        }
        declarations
    }

    fn rule(&mut self) -> Result<Vec<Rule>, CssParseError> {
        let selectors = self.selector_list()?;
        self.literal('{')?;
        let declarations = self.parse_declarations();
        // An unterminated final block is closed by end of input.
        if self.peek().is_some() {
            self.literal('}')?;
        }
        Ok(selectors
            .into_iter()
            .map(|selector| Rule {
                selector,
                declarations: declarations.clone(),
            })
            .collect())
    }

    /// Skip past a rule that failed to parse.
    fn resync_rule(&mut self) {
        match self.skip_until(&[';', '{', '}']) {
            Some('{') => self.skip_block(),
            Some(_) => self.pos += 1,
            None => {}
        }
    }

    /// [§ 9.2 At-rules](https://www.w3.org/TR/css-syntax-3/#at-rules)
    ///
    /// Statement at-rules (`@import`, `@charset`) end at `;`; block at-rules
    /// (`@media`, `@font-face`, ...) are skipped by brace depth and never
    /// descended into.
    fn skip_at_rule(&mut self) {
        let start = self.pos;
        match self.skip_until(&[';', '{']) {
            Some('{') => self.skip_block(),
            Some(_) => self.pos += 1,
            None => {}
        }
        let text: String = self.input[start..self.pos].iter().take(40).collect();
        log::debug!(target: "css", "skipped at-rule {}", text.trim());
    }

    /// Skip a `{...}` block starting at the current `{`, honoring nesting.
    fn skip_block(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// selector-list: selector ( ',' selector )*
    fn selector_list(&mut self) -> Result<Vec<Selector>, CssParseError> {
        let mut selectors = vec![self.selector()?];
        while self.peek() == Some(',') {
            self.pos += 1;
            self.whitespace();
            selectors.push(self.selector()?);
        }
        Ok(selectors)
    }

    /// [Selectors § 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// selector: simple ( ( whitespace | '>' ) simple )*
    ///
    /// Combinators associate to the left, so `li > p span` is
    /// `Descendant(DirectDescendant(li, p), span)`.
    fn selector(&mut self) -> Result<Selector, CssParseError> {
        let mut out = self.simple_selector()?;
        self.whitespace();
        loop {
            match self.peek() {
                None | Some('{' | ',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.whitespace();
                    let child = self.simple_selector()?;
                    out = Selector::DirectDescendant(Box::new(out), Box::new(child));
                }
                Some(_) => {
                    let descendant = self.simple_selector()?;
                    out = Selector::Descendant(Box::new(out), Box::new(descendant));
                }
            }
            self.whitespace();
        }
        Ok(out)
    }

    /// simple: '*' | '.' ident | ident
    fn simple_selector(&mut self) -> Result<Selector, CssParseError> {
        if self.peek() == Some('*') {
            self.pos += 1;
            return Ok(Selector::Universal);
        }
        let start = self.pos;
        let word = self.word()?;
        let unsupported = || CssParseError::UnsupportedSelector {
            text: word.clone(),
            position: start,
        };
        if let Some(class) = word.strip_prefix('.') {
            if class.is_empty() || !is_identifier(class) {
                return Err(unsupported());
            }
            return Ok(Selector::Class(class.to_string()));
        }
        if !is_identifier(&word) {
            return Err(unsupported());
        }
        Ok(Selector::Tag(word.to_lowercase()))
    }

    /// declaration: word ':' value
    fn declaration(&mut self) -> Result<(String, String), CssParseError> {
        let property = self.word()?.to_lowercase();
        self.whitespace();
        self.literal(':')?;
        self.whitespace();
        let value = self.value()?;
        // A missing trailing ';' before '}' or end of input is tolerated.
        match self.peek() {
            None | Some(';' | '}') => Ok((property, value)),
            Some(_) => Err(CssParseError::ExpectedChar {
                expected: ';',
                position: self.pos,
            }),
        }
    }

    /// Whitespace and `/* ... */` comments.
    fn whitespace(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            if !self.skip_comment() {
                return;
            }
        }
    }

    fn skip_comment(&mut self) -> bool {
        if !self.starts_with("/*") {
            return false;
        }
        self.pos += 2;
        while self.pos < self.input.len() && !self.starts_with("*/") {
            self.pos += 1;
        }
        self.pos = (self.pos + 2).min(self.input.len());
        true
    }

    fn word(&mut self) -> Result<String, CssParseError> {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.expected_word());
        }
        Ok(self.input[start..self.pos].iter().collect())
    }

    /// A value additionally accepts spaces and commas (for lists such as
    /// `font-family`) and parentheses (for functional notation, kept as raw
    /// text). Comments inside a value are dropped. A trailing `!important`
    /// is stripped.
    fn value(&mut self) -> Result<String, CssParseError> {
        let mut out = String::new();
        loop {
            if self.skip_comment() {
                continue;
            }
            match self.peek() {
                Some(c) if is_value_char(c) => {
                    out.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let mut value = out.trim();
        if let Some(stripped) = value.strip_suffix("!important") {
            value = stripped.trim_end();
        }
        if value.is_empty() {
            return Err(self.expected_word());
        }
        Ok(value.to_string())
    }

    fn literal(&mut self, expected: char) -> Result<(), CssParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(CssParseError::ExpectedChar {
                expected,
                position: self.pos,
            }),
            None => Err(CssParseError::UnexpectedEof),
        }
    }

    fn expect_end(&mut self) -> Result<(), CssParseError> {
        self.whitespace();
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.expected_word()),
        }
    }

    /// Advance to the next character in `stops` without consuming it.
    fn skip_until(&mut self, stops: &[char]) -> Option<char> {
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                return Some(c);
            }
            self.pos += 1;
        }
        None
    }

    fn expected_word(&self) -> CssParseError {
        if self.pos >= self.input.len() {
            CssParseError::UnexpectedEof
        } else {
            CssParseError::ExpectedWord { position: self.pos }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.input.get(self.pos + i) == Some(&c))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '#' | '-' | '_' | '.' | '%' | '@' | '\'' | '"')
}

fn is_value_char(c: char) -> bool {
    is_word_char(c) || c.is_whitespace() || matches!(c, ',' | '(' | ')' | '/' | '!' | '+')
}

fn is_identifier(word: &str) -> bool {
    word.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_block_handles_nesting() {
        let mut parser = CSSParser::new("{ a { b } c } rest");
        parser.skip_block();
        assert_eq!(parser.input[parser.pos..].iter().collect::<String>(), " rest");
    }

    #[test]
    fn test_comment_is_whitespace() {
        let mut parser = CSSParser::new("/* one */ /* two */x");
        parser.whitespace();
        assert_eq!(parser.peek(), Some('x'));
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        let mut parser = CSSParser::new("/* never closed");
        parser.whitespace();
        assert_eq!(parser.peek(), None);
    }

    #[test]
    fn test_value_strips_important() {
        let mut parser = CSSParser::new("red !important;");
        assert_eq!(parser.value().unwrap(), "red");
    }

    #[test]
    fn test_error_positions() {
        let mut parser = CSSParser::new("color red");
        let err = parser.declaration().unwrap_err();
        assert_eq!(
            err,
            CssParseError::ExpectedChar {
                expected: ':',
                position: 6
            }
        );
        assert_eq!(err.to_string(), "expected ':' at offset 6");
    }
}
