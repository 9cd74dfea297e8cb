use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::RwLock;
use search_core::{DocId, Document, IndexEngine, Score, SearchMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

/// The engine does no locking itself: queries take the read lock, ingestion
/// takes the write lock.
pub type SharedEngine = Arc<RwLock<IndexEngine>>;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Prefix expansion for term search, starts-with matching for filename search.
    #[serde(default)]
    pub prefix: bool,
    /// Match against filenames instead of content.
    #[serde(default)]
    pub filename: bool,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: Score,
    pub title: String,
    pub filename: String,
}

#[derive(Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct Suggestion {
    pub term: String,
    pub frequency: u32,
}

#[derive(Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub filename: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(engine: IndexEngine, admin_token: Option<String>) -> Self {
        Self { engine: Arc::new(RwLock::new(engine)), admin_token }
    }
}

pub fn build_app(app_state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/stats", get(stats_handler))
        .route("/search", get(search_handler))
        .route("/autocomplete", get(autocomplete_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/documents", post(ingest_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let mode = if params.filename {
        SearchMode::Filename { prefix: params.prefix }
    } else if params.prefix {
        SearchMode::Prefix
    } else {
        SearchMode::Keyword
    };

    let k = params.k.clamp(1, 100);
    let engine = state.engine.read();
    let ranked = engine.search(&params.q, mode);
    let total_hits = ranked.len();
    let results: Vec<SearchHit> = ranked
        .into_iter()
        .filter_map(|(doc_id, score)| {
            let doc = engine.get_document(doc_id)?;
            Some(SearchHit { doc_id, score, title: doc.title.clone(), filename: doc.filename.clone() })
        })
        .take(k)
        .collect();
    drop(engine);

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn autocomplete_handler(State(state): State<AppState>, Query(params): Query<AutocompleteParams>) -> Json<AutocompleteResponse> {
    let suggestions = state
        .engine
        .read()
        .suggest(&params.q)
        .into_iter()
        .map(|(term, frequency)| Suggestion { term, frequency })
        .collect();
    Json(AutocompleteResponse { suggestions })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<Document>, (StatusCode, String)> {
    match state.engine.read().get_document(doc_id) {
        Some(doc) => Ok(Json(doc.clone())),
        None => Err((StatusCode::NOT_FOUND, format!("document {doc_id} not found"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let engine = state.engine.read();
    Json(serde_json::json!({
        "total_docs": engine.document_count(),
        "vocabulary": engine.vocabulary_size(),
    }))
}

async fn ingest_handler(State(state): State<AppState>, headers: HeaderMap, Json(doc): Json<NewDocument>) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    authorize(&state, &headers)?;
    let result = state.engine.write().ingest(&doc.title, &doc.content, &doc.filename);
    match result {
        Ok(doc_id) => {
            tracing::info!(doc_id, filename = %doc.filename, "document ingested");
            Ok((StatusCode::CREATED, Json(serde_json::json!({ "doc_id": doc_id }))))
        }
        Err(err) => Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
