use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::db::queries::{categories, questions};
use crate::db::{Category, Question};
use crate::server::app::AppState;
use crate::server::error_handlers::{ApiError, ApiResult};
use crate::server::pagination::paginate;

use super::PageQuery;

#[derive(Serialize)]
struct CategoriesPayload {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsPayload {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
}

pub(crate) fn to_category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.r#type)).collect()
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesPayload> {
    let returned_categories = to_category_map(categories::get_categories(&pool).await?);

    if returned_categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesPayload {
        success: true,
        categories: returned_categories,
    }))
}

/// Questions for one category, paginated. `total_questions` stays the
/// global count, matching the behavior the frontend was built against.
async fn get_category_questions(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<CategoryQuestionsPayload> {
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let selection = questions::get_questions_by_category(&pool, &category.id.to_string()).await?;
    let total_questions = questions::count_questions(&pool).await?;
    let paginated_questions = paginate(selection, query.page());

    Ok(Json(CategoryQuestionsPayload {
        success: true,
        questions: paginated_questions,
        total_questions,
        current_category: category.r#type,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
