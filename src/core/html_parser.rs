use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::model::course::CourseCode;

/// Title and description paragraph of one catalog entry, before link rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub paragraph: String,
}

/// First following sibling element with the given tag name.
pub fn next_sibling_element<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("")
}

/// Drops the leading code token and any bracketed annotation, e.g.
/// `CSC108H1 Introduction to Computer Science [24L/12T]` becomes
/// `Introduction to Computer Science`.
pub fn clean_title(raw: &str) -> String {
    let words = raw.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    words.split('[').next().unwrap_or("").trim_end().to_string()
}

fn entry_for_anchor(anchor: ElementRef<'_>) -> Option<CatalogEntry> {
    let span = next_sibling_element(anchor, "span")?;
    let paragraph = next_sibling_element(anchor, "p")?;
    Some(CatalogEntry {
        title: clean_title(&element_text(span)),
        paragraph: element_text(paragraph).trim().to_string(),
    })
}

/// Finds the entry for `code` on a department page.
///
/// Anchors are matched on their `name` attribute in document order; an
/// anchor without the expected `span` and `p` siblings is skipped.
pub fn find_course_entry(html: &str, code: &CourseCode) -> Option<CatalogEntry> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[name]").unwrap();
    let wanted = code.upper();

    for anchor in document.select(&anchor_selector) {
        let Some(name) = anchor.value().attr("name") else {
            continue;
        };
        if !name.starts_with(&wanted) {
            continue;
        }
        match entry_for_anchor(anchor) {
            Some(entry) => return Some(entry),
            None => debug!("Anchor {} has no title/description siblings, skipping", name),
        }
    }

    None
}
