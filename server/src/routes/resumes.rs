use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    Json,
};
use resumerag_core::query::{DEFAULT_K, SimilarDocument};
use resumerag_core::{list_documents, redact, search_documents, similar_documents, NewDocument, Page, QueryResult, SearchHit};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::errors::AppError;
use crate::routes::non_blank;
use crate::AppState;

const DEFAULT_SIMILAR_K: usize = 5;
const MAX_K: usize = 50;

#[derive(Debug, Deserialize)]
pub struct CreateResumesRequest {
    #[serde(default)]
    pub resumes: Vec<NewDocument>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResume {
    pub id: String,
    pub original_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateResumesResponse {
    pub created: Vec<CreatedResume>,
}

/// POST /api/resumes
///
/// Takes already-extracted text; binary formats are converted upstream.
pub async fn create_resumes(
    State(state): State<AppState>,
    payload: Result<Json<CreateResumesRequest>, JsonRejection>,
) -> Result<Json<CreateResumesResponse>, AppError> {
    let Json(req) = payload?;
    if req.resumes.is_empty() {
        return Err(AppError::Validation("no resumes provided".into()));
    }
    let mut created = Vec::with_capacity(req.resumes.len());
    for new in req.resumes {
        let doc = state.store.create_document(new)?;
        created.push(CreatedResume { id: doc.id, original_name: doc.original_name });
    }
    info!(count = created.len(), "resumes stored");
    Ok(Json(CreateResumesResponse { created }))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub total: usize,
    pub resumes: Vec<SearchHit>,
}

/// GET /api/resumes?limit=&offset=&q=
pub async fn list_resumes(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError> {
    let Query(params) = params?;
    let docs = state.store.list_documents()?;
    let page = Page::new(params.offset, params.limit);
    let result = match non_blank(params.q) {
        Some(q) => search_documents(&docs, &q, page),
        None => list_documents(&docs, page),
    };
    Ok(Json(ListResponse { total: result.total, resumes: result.hits }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeView {
    pub id: String,
    pub original_name: String,
    pub text: String,
    pub uploaded_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// GET /api/resumes/:id
pub async fn get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ResumeView>, AppError> {
    let privileged = state.is_privileged(&headers);
    let doc = state
        .store
        .get_document(&id)?
        .ok_or_else(|| AppError::NotFound(format!("resume {id} not found")))?;
    Ok(Json(ResumeView {
        id: doc.id,
        original_name: doc.original_name,
        text: redact(&doc.text, privileged),
        uploaded_by: doc.uploaded_by,
        created_at: doc.created_at,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: Option<String>,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskMetadata {
    pub total_resumes: usize,
    pub took_s: f64,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub query: String,
    pub results: Vec<QueryResult>,
    pub metadata: AskMetadata,
}

/// POST /api/resumes/ask {query, k}
pub async fn ask(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let start = std::time::Instant::now();
    let Json(req) = payload?;
    let query = non_blank(req.query).ok_or_else(|| AppError::Validation("missing query".into()))?;
    let k = req.k.unwrap_or(DEFAULT_K);
    let privileged = state.is_privileged(&headers);

    let docs = state.store.list_documents()?;
    let results = resumerag_core::query(&docs, &query, k, privileged);
    let elapsed = start.elapsed();
    info!(hits = results.len(), total = docs.len(), privileged, "ask answered");

    Ok(Json(AskResponse {
        query,
        results,
        metadata: AskMetadata { total_resumes: docs.len(), took_s: elapsed.as_secs_f64() },
    }))
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarResponse {
    pub resume_id: String,
    pub similar: Vec<SimilarDocument>,
}

/// GET /api/resumes/:id/similar?k=
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<SimilarParams>, QueryRejection>,
) -> Result<Json<SimilarResponse>, AppError> {
    let Query(params) = params?;
    let k = params.k.unwrap_or(DEFAULT_SIMILAR_K).min(MAX_K);
    let docs = state.store.list_documents()?;
    let similar = similar_documents(&docs, &id, k)
        .ok_or_else(|| AppError::NotFound(format!("resume {id} not found")))?;
    Ok(Json(SimilarResponse { resume_id: id, similar }))
}
