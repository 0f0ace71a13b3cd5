//! Catalog query specification.
//!
//! A [`PaperQuery`] describes which papers a source should return: an
//! optional submission-date window, category and keyword filters, paging and
//! sort order. It renders to the arXiv API `search_query` syntax for remote
//! catalogs and can also be evaluated locally against in-memory records via
//! [`PaperQuery::matches`].

use chrono::{DateTime, Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::Paper;
use crate::error::{PaperMatchError, Result};

/// Base URL of the arXiv export API
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Upper bound the catalog accepts for a single page
pub const MAX_RESULTS_LIMIT: usize = 10_000;

pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Categories searched when a request names none
pub const DEFAULT_CATEGORIES: [&str; 4] = ["cs.CV", "cs.AI", "physics.ao-ph", "eess.IV"];

/// Field the catalog sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    SubmittedDate,
    LastUpdatedDate,
    Relevance,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::SubmittedDate => "submittedDate",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::Relevance => "relevance",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "submittedDate" => Some(SortBy::SubmittedDate),
            "lastUpdatedDate" => Some(SortBy::LastUpdatedDate),
            "relevance" => Some(SortBy::Relevance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "ascending" => Some(SortOrder::Ascending),
            "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

/// Inclusive submission-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Missing end defaults to today, missing start to the day before end
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let end = end.unwrap_or_else(|| Local::now().date_naive());
        let start = start.unwrap_or_else(|| end.pred_opt().unwrap_or(end));
        Self { start, end }
    }

    /// Window covering the last `days` days up to today
    pub fn last_days(days: i64) -> Result<Self> {
        Self::days_before(Local::now().date_naive(), days)
    }

    /// Window of `days` days ending at `end`
    pub fn days_before(end: NaiveDate, days: i64) -> Result<Self> {
        if days < 0 {
            return Err(PaperMatchError::InvalidQuery(format!(
                "day count must not be negative, got {}",
                days
            )));
        }
        let start = TimeDelta::try_days(days)
            .and_then(|delta| end.checked_sub_signed(delta))
            .ok_or_else(|| {
                PaperMatchError::InvalidQuery(format!("{} days is outside the calendar range", days))
            })?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Named submission windows offered by the search command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    Yesterday,
    LastWeek,
    LastMonth,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Yesterday, TimeWindow::LastWeek, TimeWindow::LastMonth];

    pub fn days(&self) -> i64 {
        match self {
            TimeWindow::Yesterday => 1,
            TimeWindow::LastWeek => 7,
            TimeWindow::LastMonth => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Yesterday => "yesterday",
            TimeWindow::LastWeek => "week",
            TimeWindow::LastMonth => "month",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|window| window.as_str() == name)
    }

    /// Window ending at `end`
    pub fn ending(&self, end: NaiveDate) -> DateRange {
        DateRange {
            start: end - TimeDelta::days(self.days()),
            end,
        }
    }

    /// Window ending today
    pub fn range(&self) -> DateRange {
        self.ending(Local::now().date_naive())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Submitted(DateRange),
    Categories(Vec<String>),
    Keywords(Vec<String>),
}

impl Clause {
    fn render(&self) -> String {
        match self {
            Clause::Submitted(range) => format!(
                "submittedDate:[{}0000 TO {}2359]",
                range.start.format("%Y%m%d"),
                range.end.format("%Y%m%d")
            ),
            Clause::Categories(categories) => any_of("cat", categories),
            Clause::Keywords(keywords) => any_of("all", keywords),
        }
    }

    fn matches(&self, paper: &Paper) -> bool {
        match self {
            Clause::Submitted(range) => published_date(&paper.published)
                .map(|date| range.contains(date))
                .unwrap_or(false),
            Clause::Categories(categories) => paper
                .categories
                .iter()
                .any(|category| categories.iter().any(|wanted| wanted == category)),
            Clause::Keywords(keywords) => {
                let title = paper.title.to_lowercase();
                let summary = paper.summary.to_lowercase();
                keywords.iter().any(|keyword| {
                    let keyword = keyword.to_lowercase();
                    title.contains(&keyword) || summary.contains(&keyword)
                })
            }
        }
    }
}

fn any_of(field: &str, values: &[String]) -> String {
    let conditions: Vec<String> = values.iter().map(|v| format!("{}:{}", field, v)).collect();
    format!("({})", conditions.join(" OR "))
}

/// Parse a `published` stamp (RFC 3339 or YYYY-MM-DD)
fn published_date(published: &str) -> Option<NaiveDate> {
    let published = published.trim();
    DateTime::parse_from_rfc3339(published)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(published, "%Y-%m-%d").ok())
}

/// Built query specification handed to paper sources
#[derive(Debug, Clone, PartialEq)]
pub struct PaperQuery {
    base_url: String,
    clauses: Vec<Clause>,
    pub start: usize,
    pub max_results: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for PaperQuery {
    fn default() -> Self {
        Self {
            base_url: ARXIV_API_URL.to_string(),
            clauses: Vec::new(),
            start: 0,
            max_results: DEFAULT_MAX_RESULTS,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl PaperQuery {
    /// Query with no filters (matches every paper locally)
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Catalog `search_query` expression, clauses joined with AND
    pub fn search_query(&self) -> String {
        self.clauses
            .iter()
            .map(Clause::render)
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Request parameters in catalog order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search_query", self.search_query()),
            ("start", self.start.to_string()),
            ("max_results", self.max_results.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
        ]
    }

    /// Full request URL with encoded parameters
    pub fn to_url(&self) -> String {
        let query = self
            .params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.base_url, query)
    }

    /// Evaluate every clause against `paper`
    pub fn matches(&self, paper: &Paper) -> bool {
        self.clauses.iter().all(|clause| clause.matches(paper))
    }

    /// Filter and page `papers` the way the catalog would
    pub fn select<'a, I>(&self, papers: I) -> Vec<Paper>
    where
        I: IntoIterator<Item = &'a Paper>,
    {
        papers
            .into_iter()
            .filter(|paper| self.matches(paper))
            .skip(self.start)
            .take(self.max_results)
            .cloned()
            .collect()
    }
}

/// Chainable builder for [`PaperQuery`]
///
/// ```
/// use paper_match::query::QueryBuilder;
///
/// let query = QueryBuilder::new()
///     .categories(["cs.CV", "cs.AI"])
///     .keywords(["flood"])
///     .max_results(20)
///     .build();
///
/// assert_eq!(query.search_query(), "(cat:cs.CV OR cat:cs.AI) AND (all:flood)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: PaperQuery,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the query at a different catalog endpoint
    pub fn base_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.query.base_url = url.into();
        self
    }

    /// Restrict to papers submitted within the window
    pub fn time_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> &mut Self {
        self.date_range(DateRange::resolve(start, end))
    }

    pub fn date_range(&mut self, range: DateRange) -> &mut Self {
        self.query.clauses.push(Clause::Submitted(range));
        self
    }

    /// Restrict to any of the given category ids (no-op when empty)
    pub fn categories<I, S>(&mut self, categories: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        if !categories.is_empty() {
            self.query.clauses.push(Clause::Categories(categories));
        }
        self
    }

    /// Restrict to papers mentioning any of the keywords (no-op when empty)
    pub fn keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if !keywords.is_empty() {
            self.query.clauses.push(Clause::Keywords(keywords));
        }
        self
    }

    pub fn start(&mut self, start: usize) -> &mut Self {
        self.query.start = start;
        self
    }

    /// Page size, clamped to the catalog limit
    pub fn max_results(&mut self, max_results: usize) -> &mut Self {
        self.query.max_results = max_results.min(MAX_RESULTS_LIMIT);
        self
    }

    pub fn sort(&mut self, sort_by: SortBy, sort_order: SortOrder) -> &mut Self {
        self.query.sort_by = sort_by;
        self.query.sort_order = sort_order;
        self
    }

    /// Finish the query; with no filters it defaults to yesterday's papers
    pub fn build(&mut self) -> PaperQuery {
        if self.query.clauses.is_empty() {
            self.time_range(None, None);
        }
        self.query.clone()
    }

    /// Finish the query without the default window (for local corpora)
    pub fn build_local(&mut self) -> PaperQuery {
        self.query.clone()
    }

    /// Restore defaults
    pub fn reset(&mut self) -> &mut Self {
        self.query = PaperQuery::default();
        self
    }
}
