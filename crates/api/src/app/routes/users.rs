use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};

use usergate_core::{ListParams, User, UserId, UserInput, UserQuery};

use crate::app::AppContext;
use crate::app::dto::MessageResponse;
use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

fn parse_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<UserId>()
        .map_err(|_| ApiError::Malformed("invalid user id".to_string()))
}

fn decode_input(body: Result<Json<UserInput>, JsonRejection>) -> Result<UserInput, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::Malformed(e.body_text()))?;
    input.validate()?;
    Ok(input)
}

/// GET /users: filtered, paginated list.
///
/// Query parameters never cause a failure; see `UserQuery::from_params`.
/// Pairs are read individually so a repeated or unknown key leaves the rest intact.
#[tracing::instrument(skip_all, fields(subject = %principal.subject()))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let query = UserQuery::from_params(&ListParams::from_pairs(pairs));
    tracing::debug!(
        page = query.page(),
        limit = query.limit(),
        name = ?query.name(),
        age = ?query.age(),
        "listing users"
    );

    let users = ctx.users().list(&query).await?;
    Ok(Json(users))
}

/// GET /users/:id
#[tracing::instrument(skip_all, fields(subject = %principal.subject(), user_id = %id))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    match ctx.users().get(id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound("user")),
    }
}

/// POST /users: the store assigns the id.
#[tracing::instrument(skip_all, fields(subject = %principal.subject()))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let input = decode_input(body)?;
    let user = ctx.users().create(input).await?;
    tracing::info!(user_id = %user.id, "user created");
    Ok(Json(user))
}

/// PUT /users/:id: full replace of name, email and age.
#[tracing::instrument(skip_all, fields(subject = %principal.subject(), user_id = %id))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    let input = decode_input(body)?;
    match ctx.users().update(id, input).await? {
        Some(user) => {
            tracing::info!("user updated");
            Ok(Json(user))
        }
        None => Err(ApiError::NotFound("user")),
    }
}

/// DELETE /users/:id
#[tracing::instrument(skip_all, fields(subject = %principal.subject(), user_id = %id))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    if ctx.users().delete(id).await? {
        tracing::info!("user deleted");
        Ok(Json(MessageResponse::new("User deleted")))
    } else {
        Err(ApiError::NotFound("user"))
    }
}
