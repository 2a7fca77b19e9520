use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{CreatedUser, Credentials, Token},
    routes::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<(StatusCode, Json<CreatedUser>)> {
    let user_id = state
        .auth
        .register_user(&credentials.username, &credentials.password)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedUser { user_id })))
}

/// Exchanges credentials for a bearer token
pub async fn authenticate(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<Token>> {
    let token = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(token))
}
