use clap::{Parser, Subcommand, ValueEnum};
use paper_match::{
    query::{DateRange, TimeWindow, MAX_RESULTS_LIMIT},
    sources::JsonFileSource,
    MatchRequest, Paper, PaperEngine, QueryBuilder, SAMPLE_TEXT,
};
use std::sync::Arc;

/// Papers printed by `search`
const SEARCH_DISPLAY_LIMIT: usize = 10;

/// Summary characters printed per search hit
const SUMMARY_PREVIEW_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "paper-match")]
#[command(about = "Paper Match CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Window {
    /// Yesterday to today
    Yesterday,
    /// Past 7 days
    Week,
    /// Past 30 days
    Month,
    /// No date filter
    All,
}

impl Window {
    fn range(self) -> Option<DateRange> {
        match self {
            Window::Yesterday => Some(TimeWindow::Yesterday.range()),
            Window::Week => Some(TimeWindow::LastWeek.range()),
            Window::Month => Some(TimeWindow::LastMonth.range()),
            Window::All => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank papers from a JSON corpus against a text
    Rank {
        /// Text to match (the built-in sample when omitted)
        text: Option<String>,

        /// Match against the built-in flood-detection sample
        #[arg(long, conflicts_with = "text")]
        sample: bool,

        /// JSON corpus (array of papers, or a batch with `entries`)
        #[arg(short, long, default_value = "papers.json")]
        corpus: String,

        /// Similarity metric (jaccard, cosine, word_frequency)
        #[arg(short, long, default_value = "cosine")]
        metric: String,

        /// Number of results (0 = all)
        #[arg(short, long, default_value = "10")]
        top_n: usize,

        /// Papers drawn from the corpus before ranking (0 = all)
        #[arg(long, default_value = "100")]
        max_query_count: usize,

        /// Category filter (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Keyword filter (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },

    /// List papers from a JSON corpus
    Search {
        /// JSON corpus (array of papers, or a batch with `entries`)
        #[arg(short, long, default_value = "papers.json")]
        corpus: String,

        /// Submission window
        #[arg(short, long, value_enum, default_value = "yesterday")]
        window: Window,

        /// Category filter (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Keyword filter (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Maximum papers (0 = all)
        #[arg(long, default_value = "100")]
        max_results: usize,
    },

    /// Print the catalog query URL
    Url {
        /// Category filter (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Keyword filter (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Submission window in days, ending today
        #[arg(short, long, default_value = "1", conflicts_with = "window")]
        days: i64,

        /// Submission window preset
        #[arg(short, long, value_enum)]
        window: Option<Window>,

        /// Page size
        #[arg(long, default_value = "100")]
        max_results: usize,
    },
}

fn pool_size(count: usize) -> usize {
    if count == 0 { MAX_RESULTS_LIMIT } else { count }
}

fn preview(summary: &str) -> String {
    summary.chars().take(SUMMARY_PREVIEW_CHARS).collect()
}

fn print_paper(index: usize, paper: &Paper) {
    let mut arxiv_id = paper.resolved_arxiv_id();
    if arxiv_id.is_empty() {
        arxiv_id = paper.id.rsplit('/').next().unwrap_or_default().to_string();
    }

    println!("\n{}. {}", index, paper.title);
    println!("   Authors: {}", paper.authors.join(", "));
    println!("   Categories: {}", paper.categories.join(", "));
    println!("   Published: {}", paper.published);
    println!("   arXiv ID: {}", arxiv_id);
    println!("   Summary: {}...", preview(&paper.summary));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { text, sample, corpus, metric, top_n, max_query_count, categories, keywords } => {
            println!("🔍 Matching against: {}", corpus);

            let mut engine = PaperEngine::new();
            engine.add_source(Arc::new(JsonFileSource::new(&corpus)));

            let query = QueryBuilder::new()
                .categories(categories)
                .keywords(keywords)
                .max_results(pool_size(max_query_count))
                .build_local();

            let request = match text.filter(|t| !sample && !t.trim().is_empty()) {
                Some(text) => MatchRequest::new(text),
                None => {
                    println!("📚 Using the built-in sample text");
                    MatchRequest::new(SAMPLE_TEXT)
                }
            };
            let request = request
                .with_metric(metric)
                .with_top_n(top_n)
                .with_translate(false)
                .with_query(query);

            let response = engine.match_papers(request).await?;

            println!(
                "\n✅ {} of {} papers ({}, {:.2}ms)",
                response.entries.len(),
                response.total_candidates,
                response.ranking_method,
                response.latency_ms
            );

            for entry in &response.entries {
                println!("\n{}. Score: {:.4}", entry.rank, entry.similarity_score);
                println!("   Title: {}", entry.title);
                println!("   Authors: {}", entry.authors);
                println!("   Published: {}", entry.published);
                println!("   Categories: {}", entry.categories);
                if !entry.arxiv_id.is_empty() {
                    println!("   arXiv: {}", entry.arxiv_id);
                }
            }
        }

        Commands::Search { corpus, window, categories, keywords, max_results } => {
            println!("🔍 Searching: {}", corpus);

            let mut engine = PaperEngine::new();
            engine.add_source(Arc::new(JsonFileSource::new(&corpus)));

            let mut builder = QueryBuilder::new();
            if let Some(range) = window.range() {
                builder.date_range(range);
            }
            let query = builder
                .categories(categories)
                .keywords(keywords)
                .max_results(pool_size(max_results))
                .build_local();

            let started = std::time::Instant::now();
            let papers = engine.fetch(&query).await?;

            println!(
                "\n✅ {} papers ({:.2}s)",
                papers.len(),
                started.elapsed().as_secs_f64()
            );

            for (i, paper) in papers.iter().take(SEARCH_DISPLAY_LIMIT).enumerate() {
                print_paper(i + 1, paper);
            }

            if papers.len() > SEARCH_DISPLAY_LIMIT {
                println!("\n... {} more papers not shown", papers.len() - SEARCH_DISPLAY_LIMIT);
            }
        }

        Commands::Url { categories, keywords, days, window, max_results } => {
            let mut builder = QueryBuilder::new();
            match window {
                Some(window) => {
                    if let Some(range) = window.range() {
                        builder.date_range(range);
                    }
                }
                None => {
                    builder.date_range(DateRange::last_days(days)?);
                }
            }
            let query = builder
                .categories(categories)
                .keywords(keywords)
                .max_results(max_results)
                .build();

            println!("{}", query.to_url());
        }
    }

    Ok(())
}
