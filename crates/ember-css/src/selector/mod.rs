//! CSS Selector matching
//!
//! A deliberately small subset of [Selectors Level 4](https://www.w3.org/TR/selectors-4/):
//! type, class and universal selectors joined by the descendant and child
//! combinators. Anything else is rejected by the parser and its rule dropped.

use std::fmt;

use ember_dom::{DomTree, NodeId};

/// A parsed selector.
///
/// Priority stands in for specificity: tag 2, class 1, universal 0, and a
/// combinator is the sum of its parts. Higher priority wins in the cascade;
/// ties keep source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    Tag(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    Class(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// `(ancestor, descendant)`: the descendant part must match the node and
    /// the ancestor part some strict ancestor of it.
    Descendant(Box<Selector>, Box<Selector>),

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// `(parent, child)`: the child part must match the node and the parent
    /// part its immediate parent.
    DirectDescendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Cascade priority.
    #[must_use]
    pub fn priority(&self) -> u32 {
        match self {
            Self::Tag(_) => 2,
            Self::Class(_) => 1,
            Self::Universal => 0,
            Self::Descendant(ancestor, descendant) => ancestor.priority() + descendant.priority(),
            Self::DirectDescendant(parent, child) => parent.priority() + child.priority(),
        }
    }

    /// [§ 3.2 Evaluating a selector](https://www.w3.org/TR/selectors-4/#evaluating-selectors)
    ///
    /// Whether `node` matches. Text nodes never match.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.as_element(node) else {
            return false;
        };
        match self {
            Self::Tag(name) => element.tag_name == *name,
            Self::Class(name) => element.has_class(name),
            Self::Universal => true,
            Self::Descendant(ancestor, descendant) => {
                descendant.matches(tree, node)
                    && tree.ancestors(node).any(|a| ancestor.matches(tree, a))
            }
            Self::DirectDescendant(parent, child) => {
                child.matches(tree, node)
                    && tree.parent(node).is_some_and(|p| parent.matches(tree, p))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(name) => write!(f, "{name}"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Universal => write!(f, "*"),
            Self::Descendant(ancestor, descendant) => write!(f, "{ancestor} {descendant}"),
            Self::DirectDescendant(parent, child) => write!(f, "{parent} > {child}"),
        }
    }
}
