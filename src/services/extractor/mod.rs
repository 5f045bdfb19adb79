mod budget;
mod document;

use scraper::ElementRef;
use thiserror::Error;

use crate::domain::page_digest::PageDigest;

pub use budget::{Budget, ELLIPSIS};
pub use document::PageDocument;

use document::compile;

pub const DEFAULT_MAX_LENGTH: usize = 50_000;
pub const NO_HTML_CONTENT: &str = "No HTML content provided";

const MAX_TITLES: usize = 5;
const MAX_PARAGRAPHS: usize = 10;
const MIN_BLOCK_CHARS: usize = 50;
const MIN_LINE_CHARS: usize = 100;
const MAX_DIV_CHILDREN: usize = 10;

const HEADINGS: &str = "h1, h2, h3, h4";
const TEXT_BLOCKS: &str = "p, div";
const MAIN_CONTENT_SELECTORS: [&str; 7] = [
    "main",
    "article",
    "[role='main']",
    ".content",
    "#content",
    ".post-body",
    ".entry-content",
];
const NON_CONTENT_CLASSES: [&str; 3] = ["menu", "sidebar", "related"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

type Stage = fn(&PageDocument, &mut Budget) -> Result<Vec<String>, ExtractError>;

const PARAGRAPH_STRATEGIES: [(&str, Stage); 2] = [
    ("structured paragraphs", structured_paragraphs),
    ("line fallback", line_paragraphs),
];

pub fn extract(raw_html: &str, max_length: usize) -> PageDigest {
    if raw_html.is_empty() {
        return PageDigest::failed(NO_HTML_CONTENT);
    }

    let document = PageDocument::parse(raw_html);
    let mut budget = Budget::new(max_length);

    let titles = run_stage("titles", titles, &document, &mut budget);
    let mut paragraphs = paragraphs(&document, &mut budget);

    if titles.is_empty() && paragraphs.is_empty() {
        log::warn!("Could not extract significant titles or paragraphs");
        paragraphs = run_stage("body snippet", body_snippet, &document, &mut budget);
    }

    log::info!(
        "Extracted {} titles and {} paragraphs ({} of {} chars)",
        titles.len(),
        paragraphs.len(),
        budget.used(),
        max_length
    );

    PageDigest {
        titles,
        paragraphs,
        ..Default::default()
    }
}

/// Runs `stage` against a copy of the budget and only commits the spend when
/// the stage succeeds.
fn run_stage(name: &str, stage: Stage, document: &PageDocument, budget: &mut Budget) -> Vec<String> {
    let mut trial = *budget;
    match stage(document, &mut trial) {
        Ok(found) => {
            *budget = trial;
            found
        }
        Err(e) => {
            log::error!("Extraction stage '{}' failed: {}", name, e);
            Vec::new()
        }
    }
}

fn paragraphs(document: &PageDocument, budget: &mut Budget) -> Vec<String> {
    for (name, strategy) in PARAGRAPH_STRATEGIES {
        if budget.is_exhausted() {
            break;
        }
        let found = run_stage(name, strategy, document, budget);
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

fn titles(document: &PageDocument, budget: &mut Budget) -> Result<Vec<String>, ExtractError> {
    let headings = compile(HEADINGS)?;
    let texts = document
        .select(document.root(), &headings)
        .map(|heading| collapse_whitespace(&document.text(heading, " ")))
        .filter(|text| !text.is_empty());

    Ok(budget.fill(texts, MAX_TITLES))
}

fn structured_paragraphs(
    document: &PageDocument,
    budget: &mut Budget,
) -> Result<Vec<String>, ExtractError> {
    let blocks = compile(TEXT_BLOCKS)?;
    let scope = main_content(document).unwrap_or_else(|| document.root());

    let texts = document
        .select(scope, &blocks)
        .filter(|block| block.value().name() != "div" || is_content_div(document, *block))
        .map(|block| collapse_whitespace(&document.text(block, " ")))
        .filter(|text| text.chars().count() > MIN_BLOCK_CHARS);

    Ok(budget.fill(texts, MAX_PARAGRAPHS))
}

fn line_paragraphs(document: &PageDocument, budget: &mut Budget) -> Result<Vec<String>, ExtractError> {
    let text = document.text(document.root(), "\n");
    let lines = text
        .split('\n')
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .map(str::to_string);

    Ok(budget.fill(lines, MAX_PARAGRAPHS))
}

fn body_snippet(document: &PageDocument, budget: &mut Budget) -> Result<Vec<String>, ExtractError> {
    let text = document
        .body()
        .map(|body| document.text(body, " "))
        .unwrap_or_default();

    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(budget.fill(std::iter::once(text), 1))
}

fn main_content(document: &PageDocument) -> Option<ElementRef<'_>> {
    MAIN_CONTENT_SELECTORS
        .iter()
        .find_map(|selector| match compile(selector) {
            Ok(selector) => document.select(document.root(), &selector).next(),
            Err(e) => {
                log::warn!("Skipping main content selector: {}", e);
                None
            }
        })
}

fn is_content_div(document: &PageDocument, div: ElementRef<'_>) -> bool {
    if document.element_count(div) > MAX_DIV_CHILDREN {
        return false;
    }
    !div
        .value()
        .classes()
        .any(|class| NON_CONTENT_CLASSES.contains(&class))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
