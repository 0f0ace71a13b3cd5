use serde::{Deserialize, Serialize};

/// Link attached to a catalog entry (abstract page, PDF, DOI)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaperLink {
    #[serde(default)]
    pub href: String,

    #[serde(default)]
    pub rel: Option<String>,

    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
}

/// A paper record as delivered by a paper source
///
/// Every field defaults when absent so that partially filled records still
/// rank: a missing title or summary is treated as an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Paper {
    /// Catalog entry id (usually the abstract URL)
    #[serde(default)]
    pub id: String,

    /// Paper title
    #[serde(default)]
    pub title: String,

    /// Abstract text
    #[serde(default)]
    pub summary: String,

    /// Publication timestamp (RFC 3339 or YYYY-MM-DD)
    #[serde(default)]
    pub published: String,

    /// Last update timestamp
    #[serde(default)]
    pub updated: String,

    /// Author names
    #[serde(default)]
    pub authors: Vec<String>,

    /// Category ids (cs.CV, physics.ao-ph, ...)
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub links: Vec<PaperLink>,

    /// Catalog-specific identifier, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl Paper {
    /// Create a new Paper with the fields used for ranking
    pub fn new(id: impl Into<String>, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            ..Default::default()
        }
    }

    /// Text the ranker compares against the query
    pub fn comparison_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }

    /// Catalog identifier, falling back to the one embedded in `id`
    ///
    /// `http://arxiv.org/abs/2401.01234v1` resolves to `2401.01234`.
    pub fn resolved_arxiv_id(&self) -> String {
        if let Some(id) = self.arxiv_id.as_deref().filter(|id| !id.is_empty()) {
            return id.to_string();
        }

        self.id
            .split_once("/abs/")
            .map(|(_, rest)| {
                rest.chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '.')
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        let id = self.resolved_arxiv_id();
        if id.is_empty() {
            self.title.clone()
        } else {
            format!("{} [{}]", self.title, id)
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
