//! Selector codec
//!
//! Derives a re-locatable string for an element and a transition-name token
//! from that string. Selectors use a small CSS subset:
//!
//! - `#id` when the element (or an ancestor on the way up) has an id
//! - `TAG:nth-child(n)` for every other level, joined with `>`
//!
//! The walk stops at the root boundary tag (`BODY` by default), so the same
//! DOM structure always yields the same selector.

use std::fmt;

use crate::dom::Document;
use crate::error::SelectorError;

/// Compute the selector for `element`, ascending until `root_tag`.
///
/// The root element itself encodes as its tag name. An element detached
/// from any parent ends the walk where it stands.
pub fn compute_selector<D: Document>(doc: &D, element: &D::Element, root_tag: &str) -> String {
    if doc.tag_name(element).eq_ignore_ascii_case(root_tag) {
        return root_tag.to_ascii_uppercase();
    }

    let mut steps = Vec::new();
    let mut current = element.clone();
    loop {
        let tag = doc.tag_name(&current);
        if tag.eq_ignore_ascii_case(root_tag) {
            break;
        }
        let Some(parent) = doc.parent_element(&current) else {
            break;
        };
        if let Some(id) = doc.id(&current) {
            steps.push(format!("#{}", id));
            break;
        }
        steps.push(format!("{}:nth-child({})", tag, sibling_index(doc, &current)));
        current = parent;
    }

    steps.reverse();
    steps.join(">")
}

/// Locate the element a computed selector points at.
///
/// Positional selectors usually start at a child of the root boundary, so
/// they are anchored under `root_tag` first; otherwise a deeper subtree with
/// the same shape could match first. When the element was not under the
/// boundary at all the walk ended at the document root instead, and the
/// unanchored query is used. Id and root selectors are queried as they are.
pub fn resolve_selector<D: Document>(doc: &D, selector: &str, root_tag: &str) -> Option<D::Element> {
    if selector.is_empty() {
        return None;
    }
    match SelectorPath::parse(selector) {
        Ok(path) if matches!(path.steps().first(), Some(SelectorStep::NthChild { .. })) => doc
            .query_selector(&format!("{}>{}", root_tag.to_ascii_uppercase(), selector))
            .or_else(|| doc.query_selector(selector)),
        Ok(_) => doc.query_selector(selector),
        Err(err) => {
            tracing::debug!(selector, %err, "unresolvable selector");
            None
        }
    }
}

/// 1-based position of `element` among its element siblings.
fn sibling_index<D: Document>(doc: &D, element: &D::Element) -> usize {
    let mut index = 1;
    let mut sibling = doc.previous_element_sibling(element);
    while let Some(prev) = sibling {
        index += 1;
        sibling = doc.previous_element_sibling(&prev);
    }
    index
}

/// Strip everything except `[A-Za-z0-9]`. Empty output means "no name".
pub fn derive_name(selector: &str) -> String {
    selector.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// `[name="value"]` with quotes and backslashes in `value` escaped.
pub fn attribute_selector(name: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("[{}=\"{}\"]", name, escaped)
}

/// One `>`-separated step of a parsed selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorStep {
    /// `#id`
    Id(String),
    /// Bare tag, only produced for the root boundary element
    Tag(String),
    /// `TAG:nth-child(index)`, index 1-based
    NthChild { tag: String, index: usize },
}

/// A selector parsed back into steps, ordered outermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPath {
    steps: Vec<SelectorStep>,
}

impl SelectorPath {
    /// Parse a selector produced by [`compute_selector`].
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        let steps = selector
            .split('>')
            .enumerate()
            .map(|(position, raw)| parse_step(position, raw.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }

    /// Steps, outermost first.
    pub fn steps(&self) -> &[SelectorStep] {
        &self.steps
    }

    /// Whether `element` is matched by this path under CSS child-combinator
    /// semantics. The outermost step is not anchored to the document root.
    pub fn matches<D: Document>(&self, doc: &D, element: &D::Element) -> bool {
        let mut current = Some(element.clone());
        for step in self.steps.iter().rev() {
            let Some(el) = current else {
                return false;
            };
            if !step_matches(doc, step, &el) {
                return false;
            }
            current = doc.parent_element(&el);
        }
        true
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(">")?;
            }
            match step {
                SelectorStep::Id(id) => write!(f, "#{}", id)?,
                SelectorStep::Tag(tag) => f.write_str(tag)?,
                SelectorStep::NthChild { tag, index } => write!(f, "{}:nth-child({})", tag, index)?,
            }
        }
        Ok(())
    }
}

fn parse_step(position: usize, raw: &str) -> Result<SelectorStep, SelectorError> {
    if raw.is_empty() {
        return Err(SelectorError::EmptyStep(position));
    }

    if let Some(id) = raw.strip_prefix('#') {
        if id.is_empty() {
            return Err(SelectorError::Unsupported(raw.to_string()));
        }
        return Ok(SelectorStep::Id(id.to_string()));
    }

    if let Some((tag, rest)) = raw.split_once(":nth-child(") {
        let digits = rest
            .strip_suffix(')')
            .ok_or_else(|| SelectorError::InvalidIndex(raw.to_string()))?;
        let index: usize = digits
            .parse()
            .map_err(|_| SelectorError::InvalidIndex(raw.to_string()))?;
        if index == 0 || !is_tag(tag) {
            return Err(if index == 0 {
                SelectorError::InvalidIndex(raw.to_string())
            } else {
                SelectorError::Unsupported(raw.to_string())
            });
        }
        return Ok(SelectorStep::NthChild {
            tag: tag.to_string(),
            index,
        });
    }

    if is_tag(raw) {
        return Ok(SelectorStep::Tag(raw.to_string()));
    }

    Err(SelectorError::Unsupported(raw.to_string()))
}

fn is_tag(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn step_matches<D: Document>(doc: &D, step: &SelectorStep, element: &D::Element) -> bool {
    match step {
        SelectorStep::Id(id) => doc.id(element).as_deref() == Some(id.as_str()),
        SelectorStep::Tag(tag) => doc.tag_name(element).eq_ignore_ascii_case(tag),
        SelectorStep::NthChild { tag, index } => {
            doc.tag_name(element).eq_ignore_ascii_case(tag) && sibling_index(doc, element) == *index
        }
    }
}
