use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category_ids,
            questions::{get_all_questions, get_questions_for_category},
        },
        Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_null_as_empty,
        error::{ApiError, ErrorKind, FailWith},
        quiz::{select_question, QuizDraw},
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

/// Category id that draws from every question.
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn candidates_for(pool: &SqlitePool, category_id: i64) -> Result<Vec<Question>, ApiError> {
    if category_id == ALL_CATEGORIES {
        return get_all_questions(pool).await.fail_with(ErrorKind::BadRequest);
    }
    let known = get_category_ids(pool)
        .await
        .fail_with(ErrorKind::BadRequest)?;
    if !known.contains(&category_id) {
        return Err(ErrorKind::BadRequest.into());
    }
    get_questions_for_category(pool, category_id)
        .await
        .fail_with(ErrorKind::BadRequest)
}

// every failure, unknown categories included, is a bad request
async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let Json(request) = body.fail_with(ErrorKind::BadRequest)?;
    let category_id = request.quiz_category.id;
    let candidates = candidates_for(&pool, category_id).await?;
    let previous: HashSet<i64> = request.previous_questions.into_iter().collect();

    let draw = select_question(&candidates, &previous, &mut rand::thread_rng());
    let question = match draw {
        QuizDraw::Picked(question) => question.clone(),
        QuizDraw::Exhausted => {
            tracing::debug!(category_id, "Quiz pool exhausted");
            return Ok(Json(QuizResponse {
                success: true,
                question: None,
            }));
        }
        QuizDraw::EmptyPool => return Err(ErrorKind::BadRequest.into()),
    };

    let label = if category_id == ALL_CATEGORIES {
        "all".to_owned()
    } else {
        category_id.to_string()
    };
    QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();

    Ok(Json(QuizResponse {
        success: true,
        question: Some(question),
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
