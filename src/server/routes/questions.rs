use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error_handlers::{ApiError, ApiResult};
use crate::server::pagination::paginate;

use super::categories::to_category_map;
use super::PageQuery;

#[derive(Serialize)]
struct QuestionsPayload {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct DeletedPayload {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct CreatedPayload {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct SearchPayload {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResult<QuestionsPayload> {
    let selection = questions::get_questions(&pool).await?;
    let total_questions = selection.len() as i64;
    let current_questions = paginate(selection, query.page());

    // a page past the last row is a 404 even when the table has rows
    if current_questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let returned_categories = to_category_map(categories::get_categories(&pool).await?);

    Ok(Json(QuestionsPayload {
        success: true,
        questions: current_questions,
        total_questions,
        categories: returned_categories,
    }))
}

/// A missing id reports 422, not 404: the lookup failing is the same
/// condition as the delete failing, and clients assert on it.
async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<DeletedPayload> {
    questions::delete_question(&pool, id).await?;

    Ok(Json(DeletedPayload {
        success: true,
        deleted: id,
    }))
}

async fn add_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<CreatedPayload> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;

    // presence of all four keys is checked before anything touches
    // storage; types are coerced afterwards
    let (Some(question), Some(answer), Some(difficulty), Some(category)) = (
        body.get("question"),
        body.get("answer"),
        body.get("difficulty"),
        body.get("category"),
    ) else {
        return Err(ApiError::UnProcessable);
    };

    let question = question.as_str().ok_or(ApiError::UnProcessable)?;
    let answer = answer.as_str().ok_or(ApiError::UnProcessable)?;
    let difficulty = difficulty.as_i64().ok_or(ApiError::UnProcessable)?;
    let category = value_to_category(category)?;

    let created = questions::create_question(&pool, question, answer, &category, difficulty).await?;

    Ok(Json(CreatedPayload {
        success: true,
        created,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<SearchPayload> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let term = body
        .get("searchTerm")
        .and_then(Value::as_str)
        .ok_or(ApiError::UnProcessable)?;

    let returned_questions = questions::search_questions(&pool, term).await?;

    Ok(Json(SearchPayload {
        success: true,
        total_questions: returned_questions.len() as i64,
        questions: returned_questions,
    }))
}

/// Clients send the category reference as either a number or a string;
/// storage keeps it as text.
pub(crate) fn value_to_category(value: &Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ApiError::UnProcessable),
    }
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(add_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
