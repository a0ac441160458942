//! Name registry
//!
//! Exclusive allocation of view-transition names. The platform refuses a
//! transition when two captured elements share a name, so a name is always
//! released from its previous holder before it is written to a new one.
//! The registry tracks the holders it assigned; names set on the page by
//! anything else are found through the document and released too.

use std::collections::BTreeMap;

use crate::dom::Document;

/// Tracks which element currently holds each assigned name.
#[derive(Debug)]
pub struct NameRegistry<E> {
    holders: BTreeMap<String, E>,
}

impl<E> Default for NameRegistry<E> {
    fn default() -> Self {
        Self {
            holders: BTreeMap::new(),
        }
    }
}

impl<E: Clone + PartialEq> NameRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `name` to `element`, taking it from any previous holder.
    ///
    /// No-op when the element is absent or the name is empty.
    pub fn assign<D>(&mut self, doc: &D, element: Option<&E>, name: &str)
    where
        D: Document<Element = E>,
    {
        let Some(element) = element else {
            return;
        };
        if name.is_empty() {
            return;
        }

        self.release(doc, name);

        // Writing the style replaces whatever name the element held before.
        if let Some(previous) = doc.transition_name(element) {
            if self.holders.get(&previous) == Some(element) {
                self.holders.remove(&previous);
            }
        }

        doc.set_transition_name(element, name);
        self.holders.insert(name.to_string(), element.clone());
    }

    /// Clear `name` from whichever element holds it.
    pub fn release<D>(&mut self, doc: &D, name: &str)
    where
        D: Document<Element = E>,
    {
        if let Some(holder) = self.holders.remove(name) {
            // The holder may have been renamed behind our back.
            if doc.transition_name(&holder).as_deref() == Some(name) {
                doc.set_transition_name(&holder, "");
            }
        }
        while let Some(stray) = doc.find_by_transition_name(name) {
            doc.set_transition_name(&stray, "");
            if doc.transition_name(&stray).as_deref() == Some(name) {
                tracing::warn!(name, "element refused transition name reset");
                break;
            }
        }
    }

    /// Release every tracked name.
    pub fn release_all<D>(&mut self, doc: &D)
    where
        D: Document<Element = E>,
    {
        let names: Vec<String> = self.holders.keys().cloned().collect();
        for name in names {
            self.release(doc, &name);
        }
    }

    /// Element currently holding `name`, if the registry assigned it.
    pub fn holder(&self, name: &str) -> Option<&E> {
        self.holders.get(name)
    }

    /// Tracked names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.holders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}
