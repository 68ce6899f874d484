use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::{AppState, SharedRng};
use crate::server::error_handlers::{ApiError, ApiResult};
use crate::telemetry::QUIZ_CNTR;

use super::questions::value_to_category;

/// Marker the client sends in `quiz_category.type` to play across all
/// categories.
const ALL_CATEGORIES: &str = "all";

#[derive(Serialize)]
struct QuizPayload {
    success: bool,
    question: Option<Question>,
}

/// Picks one not-yet-asked question at random. The server keeps no quiz
/// state; the client resends the grown `previous_questions` list on
/// every call.
async fn get_quiz(
    State(pool): State<SqlitePool>,
    State(rng): State<SharedRng>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<QuizPayload> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;

    let category = body.get("quiz_category").ok_or(ApiError::UnProcessable)?;
    let previous_questions: HashSet<i64> = body
        .get("previous_questions")
        .and_then(Value::as_array)
        .ok_or(ApiError::UnProcessable)?
        .iter()
        .filter_map(Value::as_i64)
        .collect();
    let category_type = category
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ApiError::UnProcessable)?;

    let selection = if category_type == ALL_CATEGORIES {
        questions::get_questions(&pool).await?
    } else {
        let category_id = value_to_category(category.get("id").ok_or(ApiError::UnProcessable)?)?;
        questions::get_questions_by_category(&pool, &category_id).await?
    };

    let mut candidates: Vec<Question> = selection
        .into_iter()
        .filter(|q| !previous_questions.contains(&q.id))
        .collect();

    let question = if candidates.is_empty() {
        None
    } else {
        let index = rng
            .lock()
            .expect("rng lock poisoned")
            .gen_range(0..candidates.len());
        QUIZ_CNTR.with_label_values(&[category_type]).inc();
        Some(candidates.swap_remove(index))
    };

    Ok(Json(QuizPayload {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(get_quiz))
        .with_state(state)
}
