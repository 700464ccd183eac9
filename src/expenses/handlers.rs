use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    expenses::{
        dto::{CreatedExpense, ExpenseFilter, ExpensePayload, MessageResponse},
        repo::Expense,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/categories", get(list_categories))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ExpensePayload>,
) -> Result<(StatusCode, Json<CreatedExpense>), ApiError> {
    let fields = payload.validate()?;
    let id = Expense::create(&state.db, user_id, &fields).await?;
    info!(user_id, expense_id = id, "expense created");
    Ok((StatusCode::CREATED, Json(CreatedExpense { id })))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filter): Query<ExpenseFilter>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = Expense::list_for_user(&state.db, user_id, &filter).await?;
    Ok(Json(expenses))
}

#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ExpensePayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let fields = payload.validate()?;
    let updated = Expense::update_owned(&state.db, user_id, id, &fields).await?;
    if !updated {
        return Err(ApiError::NotFound(
            "Expense not found or not owned by user".into(),
        ));
    }
    info!(user_id, expense_id = id, "expense updated");
    Ok(Json(MessageResponse {
        message: "Expense updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = Expense::delete_owned(&state.db, user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Expense not found or not owned by user".into(),
        ));
    }
    info!(user_id, expense_id = id, "expense deleted");
    Ok(Json(MessageResponse {
        message: "Expense deleted successfully",
    }))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<String>>, ApiError> {
    let categories = Expense::categories_for_user(&state.db, user_id).await?;
    Ok(Json(categories))
}
