use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paper_match::{
    error::PaperMatchError, query::DEFAULT_CATEGORIES, sources::JsonFileSource, MatchRequest,
    MatchResponse, PaperEngine, QueryBuilder, SAMPLE_TEXT,
};

/// Papers drawn from the corpus before ranking
const DEFAULT_QUERY_COUNT: usize = 20;

#[derive(Clone)]
struct AppState {
    engine: Arc<PaperEngine>,
}

#[derive(Debug, Deserialize)]
struct MatchBody {
    #[serde(default)]
    text: String,
    #[serde(default)]
    use_sample: bool,
    #[serde(default)]
    metric: Option<String>,
    #[serde(default, alias = "max_results_count")]
    top_n: Option<usize>,
    #[serde(default = "default_query_count")]
    max_query_count: usize,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

fn default_query_count() -> usize { DEFAULT_QUERY_COUNT }

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paper_match_server=debug,paper_match=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let corpus_path = std::env::var("CORPUS_PATH").unwrap_or_else(|_| "papers.json".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting Paper Match Server");
    tracing::info!("📦 Corpus: {}", corpus_path);
    tracing::info!("🔌 Port: {}", port);

    let mut engine = PaperEngine::new();
    engine.add_source(Arc::new(JsonFileSource::new(&corpus_path)));

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/match", post(match_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("📚 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: paper_match::VERSION.to_string(),
    })
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, PaperMatchError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| PaperMatchError::InvalidQuery(format!("{} '{}': {}", field, value, e)))
}

fn build_request(body: MatchBody) -> Result<MatchRequest, PaperMatchError> {
    let text = if body.use_sample { SAMPLE_TEXT.to_string() } else { body.text };
    if text.trim().is_empty() {
        return Err(PaperMatchError::InvalidQuery("text must not be empty".to_string()));
    }

    let mut builder = QueryBuilder::new();
    if body.start_date.is_some() || body.end_date.is_some() {
        let start = body.start_date.as_deref().map(|d| parse_date("start_date", d)).transpose()?;
        let end = body.end_date.as_deref().map(|d| parse_date("end_date", d)).transpose()?;
        builder.time_range(start, end);
    }
    if body.categories.is_empty() {
        builder.categories(DEFAULT_CATEGORIES);
    } else {
        builder.categories(body.categories);
    }
    let query = builder
        .keywords(body.keywords)
        .max_results(body.max_query_count)
        .build_local();

    let mut request = MatchRequest::new(text).with_query(query);
    request.metric = body.metric;
    request.top_n = body.top_n;

    Ok(request)
}

async fn match_handler(
    State(state): State<AppState>,
    Json(body): Json<MatchBody>,
) -> Result<Json<MatchResponse>, AppError> {
    tracing::debug!("Match request: {:?}", body);

    let request = build_request(body)?;
    let result = state.engine.match_papers(request).await?;

    Ok(Json(result))
}

// Error handling
struct AppError(PaperMatchError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            PaperMatchError::InvalidQuery(message) => (StatusCode::BAD_REQUEST, message),
            PaperMatchError::Source { source_name, message } => {
                (StatusCode::BAD_GATEWAY, format!("Source '{}' error: {}", source_name, message))
            }
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<PaperMatchError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
