//! Question API endpoints.

use axum::extract::{Query, State};

use super::{success, ApiResult};
use crate::browser::{apply_filter, PostFilter};
use crate::models::Question;
use crate::AppState;

/// GET /api/questions - List questions, optionally filtered by title, tag and date.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
) -> ApiResult<Vec<Question>> {
    let questions = state.service.list_questions().await?;

    if filter.is_empty() {
        success(questions)
    } else {
        success(apply_filter(&questions, &filter))
    }
}
