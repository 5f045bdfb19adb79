use scraper::{node::Node, ElementRef, Html, Selector};

use super::ExtractError;

const STRIPPED_TAGS: [&str; 13] = [
    "script", "style", "nav", "footer", "aside", "iframe", "noscript", "header", "form", "button",
    "input", "textarea", "select",
];

const STRIPPED_PATTERNS: [&str; 15] = [
    ".ad",
    "#ad",
    "[class*='advert']",
    "[id*='advert']",
    "[class*='banner']",
    "[id*='banner']",
    "[class*='cookie']",
    "[id*='cookie']",
    "[class*='popup']",
    "[id*='popup']",
    "[class*='social']",
    "[id*='social']",
    "[class*='share']",
    "[id*='share']",
    "[aria-hidden='true']",
];

pub fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// The tree is never mutated: an element is treated as removed when it, or
/// one of its ancestors, is a stripped tag or matches a stripped pattern.
pub struct PageDocument {
    html: Html,
    stripped: Vec<Selector>,
}

impl PageDocument {
    pub fn parse(raw_html: &str) -> Self {
        let stripped = STRIPPED_PATTERNS
            .iter()
            .filter_map(|pattern| match compile(pattern) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    log::warn!("Skipping noise pattern: {}", e);
                    None
                }
            })
            .collect();

        PageDocument {
            html: Html::parse_document(raw_html),
            stripped,
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn body(&self) -> Option<ElementRef<'_>> {
        let body_selector = compile("body").ok()?;
        self.html.select(&body_selector).next()
    }

    pub fn select<'a, 'b>(
        &'a self,
        scope: ElementRef<'a>,
        selector: &'b Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'b
    where
        'a: 'b,
    {
        scope
            .select(selector)
            .filter(move |element| !self.is_removed(*element))
    }

    pub fn text(&self, element: ElementRef<'_>, separator: &str) -> String {
        let mut fragments = Vec::new();
        self.collect_text(element, &mut fragments);
        fragments.join(separator)
    }

    pub fn element_count(&self, element: ElementRef<'_>) -> usize {
        element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| !self.is_stripped(child))
            .map(|child| 1 + self.element_count(child))
            .sum()
    }

    fn collect_text<'a>(&self, element: ElementRef<'a>, fragments: &mut Vec<&'a str>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        fragments.push(text);
                    }
                }
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        if !self.is_stripped(&child) {
                            self.collect_text(child, fragments);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn is_stripped(&self, element: &ElementRef<'_>) -> bool {
        STRIPPED_TAGS.contains(&element.value().name())
            || self.stripped.iter().any(|selector| selector.matches(element))
    }

    fn is_removed(&self, element: ElementRef<'_>) -> bool {
        self.is_stripped(&element)
            || element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| self.is_stripped(&ancestor))
    }
}
