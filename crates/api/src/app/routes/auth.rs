use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::Utc;

use usergate_auth::Credential;

use crate::app::AppContext;
use crate::app::dto::TokenResponse;
use crate::app::errors::ApiError;

/// POST /login: exchange the credential pair for a bearer token.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<Json<Credential>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(credential) = body.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let token = ctx.auth().login(&credential, Utc::now())?;
    Ok(Json(TokenResponse { token }))
}
