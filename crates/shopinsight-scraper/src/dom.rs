//! Single document-order traversal shared by the page extractors.

use scraper::{ElementRef, Html, Node};

/// Elements whose contents never count as visible text.
const NON_VISIBLE_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

pub(crate) enum Visit<'a> {
    /// An element, offered before any of its descendants.
    Element(ElementRef<'a>),
    /// A text node outside non-visible elements.
    Text(&'a str),
}

/// Walks `document` once in document order, skipping non-visible subtrees.
pub(crate) fn walk<'a>(document: &'a Html, mut visit: impl FnMut(Visit<'a>)) {
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(element) => {
                if NON_VISIBLE_ELEMENTS.contains(&element.name()) {
                    continue;
                }
                if let Some(element_ref) = ElementRef::wrap(node) {
                    visit(Visit::Element(element_ref));
                }
            }
            Node::Text(text) => visit(Visit::Text(text)),
            _ => {}
        }
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev());
    }
}

/// Visible text of an element: its trimmed text nodes joined by single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
