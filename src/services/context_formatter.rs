use crate::domain::page_digest::{PageDigest, PageTable};

pub const NO_STRUCTURED_CONTENT: &str = "No structured content was extracted from the webpage.";

const SECTION_SEPARATOR: &str = "\n\n---\n\n";
const MAX_LINKS: usize = 10;
const MAX_TABLES: usize = 3;
const MAX_TABLE_ROWS: usize = 5;

pub fn format_context(digest: &PageDigest) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !digest.titles.is_empty() {
        let titles: Vec<String> = digest.titles.iter().map(|t| format!("- {}", t)).collect();
        sections.push(format!("Titles found on the page:\n{}", titles.join("\n")));
    }

    if !digest.paragraphs.is_empty() {
        sections.push(format!(
            "Main textual content:\n{}",
            digest.paragraphs.join("\n\n")
        ));
    }

    if !digest.links.is_empty() {
        let links: Vec<String> = digest
            .links
            .iter()
            .take(MAX_LINKS)
            .map(|link| format!("- {}: {}", or_na(&link.text), or_na(&link.url)))
            .collect();
        sections.push(format!(
            "Some links found on the page (text: URL):\n{}",
            links.join("\n")
        ));
    }

    if !digest.tables.is_empty() {
        sections.push("Tables found on the page:".to_string());
        sections.extend(
            digest
                .tables
                .iter()
                .take(MAX_TABLES)
                .enumerate()
                .map(|(index, table)| render_table(index + 1, table)),
        );
    }

    if sections.is_empty() {
        return NO_STRUCTURED_CONTENT.to_string();
    }

    sections.join(SECTION_SEPARATOR)
}

fn render_table(number: usize, table: &PageTable) -> String {
    let mut lines = vec![format!("Table {}:", number)];
    if !table.headers.is_empty() {
        lines.push(format!("Headers: {}", table.headers.join(" | ")));
    }
    lines.extend(
        table
            .rows
            .iter()
            .take(MAX_TABLE_ROWS)
            .enumerate()
            .map(|(index, row)| format!("Row {}: {}", index + 1, row.join(" | "))),
    );
    lines.join("\n")
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
