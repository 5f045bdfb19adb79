use serde::Serialize;

/// `links` and `tables` are part of the shape the context formatter accepts
/// but the extractor never fills them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageDigest {
    pub titles: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<PageLink>,
    pub tables: Vec<PageTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PageDigest {
    pub fn failed(reason: &str) -> Self {
        PageDigest {
            error: Some(reason.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
            && self.paragraphs.is_empty()
            && self.links.is_empty()
            && self.tables.is_empty()
    }
}
