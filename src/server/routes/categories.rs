use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Question,
    },
    server::{
        app::AppState,
        error::{ErrorKind, FailWith},
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesList> {
    let categories = categories_by_id(
        get_all_categories(&pool)
            .await
            .fail_with(ErrorKind::Internal)?,
    );
    if categories.is_empty() {
        return Err(ErrorKind::NotFound.into());
    }
    Ok(Json(CategoriesList {
        success: true,
        categories,
    }))
}

// every failure here, database errors included, reports as not found
async fn questions_for_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<CategoryQuestions> {
    let Path(id) = id.fail_with(ErrorKind::NotFound)?;
    let questions = get_questions_for_category(&pool, id)
        .await
        .fail_with(ErrorKind::NotFound)?;
    let category = get_category(&pool, id)
        .await
        .fail_with(ErrorKind::NotFound)?
        .fail_with(ErrorKind::NotFound)?;

    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
