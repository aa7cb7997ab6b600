use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use resumerag_core::{match_candidates, JobPosting, MatchResult};
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::routes::non_blank;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// POST /api/jobs {title, description}
pub async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<Json<JobPosting>, AppError> {
    let Json(req) = payload?;
    let (Some(title), Some(description)) = (non_blank(req.title), non_blank(req.description)) else {
        return Err(AppError::Validation("Missing fields".into()));
    };
    let job = state.store.create_job(&title, &description)?;
    info!(id = %job.id, requirements = job.requirements.len(), "job created");
    Ok(Json(job))
}

/// GET /api/jobs
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobPosting>>, AppError> {
    Ok(Json(state.store.list_jobs()?))
}

/// GET /api/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    let job = state
        .store
        .get_job(&id)?
        .ok_or_else(|| AppError::NotFound(format!("job {id} not found")))?;
    Ok(Json(job))
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default, alias = "topN", deserialize_with = "count_or_numeric_string")]
    pub top_n: Option<usize>,
}

impl MatchRequest {
    /// An empty body means defaults; anything else must be a valid request.
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("invalid match request: {e}")))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountField {
    Number(u64),
    Text(String),
}

/// Accepts `10` or `"10"`; `null` and `""` mean unset.
fn count_or_numeric_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
    match Option::<CountField>::deserialize(d)? {
        None => Ok(None),
        Some(CountField::Number(n)) => usize::try_from(n).map(Some).map_err(de::Error::custom),
        Some(CountField::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(CountField::Text(s)) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("top_n must be a non-negative integer, got {s:?}"))),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub job_id: String,
    pub matches: Vec<MatchResult>,
}

/// POST /api/jobs/:id/match {top_n}
pub async fn match_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MatchResponse>, AppError> {
    let req = MatchRequest::from_body(&body)?;
    let job = state
        .store
        .get_job(&id)?
        .ok_or_else(|| AppError::NotFound(format!("job {id} not found")))?;
    let docs = state.store.list_documents()?;
    let matches = match_candidates(&job, &docs, req.top_n);
    info!(job_id = %job.id, candidates = docs.len(), returned = matches.len(), "candidates matched");
    Ok(Json(MatchResponse { job_id: job.id, matches }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_uses_defaults() {
        assert_eq!(MatchRequest::from_body(b"").unwrap().top_n, None);
        assert_eq!(MatchRequest::from_body(b" \n").unwrap().top_n, None);
    }

    #[test]
    fn top_n_accepts_numbers_and_numeric_strings() {
        assert_eq!(MatchRequest::from_body(br#"{"top_n":10}"#).unwrap().top_n, Some(10));
        assert_eq!(MatchRequest::from_body(br#"{"top_n":"7"}"#).unwrap().top_n, Some(7));
        assert_eq!(MatchRequest::from_body(br#"{"topN":3}"#).unwrap().top_n, Some(3));
        assert_eq!(MatchRequest::from_body(br#"{"top_n":""}"#).unwrap().top_n, None);
        assert_eq!(MatchRequest::from_body(br#"{"top_n":null}"#).unwrap().top_n, None);
        assert_eq!(MatchRequest::from_body(b"{}").unwrap().top_n, None);
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        let bodies: [&[u8]; 4] = [br#"{"top_n":10"#, br#"{"top_n":-1}"#, br#"{"top_n":"ten"}"#, b"42"];
        for body in bodies {
            assert!(
                matches!(MatchRequest::from_body(body), Err(AppError::Validation(_))),
                "body {}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
