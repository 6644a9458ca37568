use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories, get_category},
            questions::{self, count_questions, get_all_questions, get_question, search_questions},
        },
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        error::{ErrorKind, FailWith},
        pagination::{paginate, PageQuery},
    },
};

use super::ApiResponse;

#[derive(Deserialize)]
struct CreateQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct DeletedQuestion {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    question: String,
    answer: String,
    difficulty: i64,
    category: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

fn page_number(query: Result<Query<PageQuery>, QueryRejection>) -> i64 {
    query.map(|Query(page)| page.number()).unwrap_or(1)
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let questions = get_all_questions(&pool)
        .await
        .fail_with(ErrorKind::Internal)?;
    let current = paginate(&questions, page_number(page)).to_vec();
    let categories = categories_by_id(
        get_all_categories(&pool)
            .await
            .fail_with(ErrorKind::Internal)?,
    );

    // an empty page and an empty dataset are indistinguishable to clients
    if current.is_empty() || categories.is_empty() {
        return Err(ErrorKind::NotFound.into());
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions: questions.len(),
        categories,
        current_category: None,
    }))
}

// a question that does not exist is unprocessable rather than not found
async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<DeletedQuestion> {
    let Path(id) = id.fail_with(ErrorKind::NotFound)?;
    let question = get_question(&pool, id)
        .await
        .fail_with(ErrorKind::Unprocessable)?
        .fail_with(ErrorKind::Unprocessable)?;
    let category_id: i64 = question
        .category
        .parse()
        .fail_with(ErrorKind::Unprocessable)?;
    let category = get_category(&pool, category_id)
        .await
        .fail_with(ErrorKind::Unprocessable)?
        .fail_with(ErrorKind::Unprocessable)?;

    questions::delete_question(&pool, id)
        .await
        .fail_with(ErrorKind::Unprocessable)?;
    tracing::info!(id, "Deleted question");

    let remaining = get_all_questions(&pool)
        .await
        .fail_with(ErrorKind::Unprocessable)?;
    let total_questions = count_questions(&pool)
        .await
        .fail_with(ErrorKind::Unprocessable)?;

    Ok(Json(DeletedQuestion {
        success: true,
        deleted: id,
        questions: paginate(&remaining, page_number(page)).to_vec(),
        total_questions,
        current_category: category.kind,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<CreateQuestion>, JsonRejection>,
) -> ApiResponse<CreatedQuestion> {
    let Json(body) = body.fail_with(ErrorKind::Unprocessable)?;
    let new_question = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new_question)
        .await
        .fail_with(ErrorKind::Unprocessable)?;
    tracing::info!(id, "Created question");

    Ok(Json(CreatedQuestion {
        success: true,
        question: new_question.question,
        answer: new_question.answer,
        difficulty: new_question.difficulty,
        category: new_question.category,
    }))
}

// any failure while searching reports as 405
async fn search(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResults> {
    let Json(SearchBody { search_term }) = body.fail_with(ErrorKind::MethodNotAllowed)?;
    let questions = search_questions(&pool, &search_term)
        .await
        .fail_with(ErrorKind::MethodNotAllowed)?;

    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
