use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::app::{AppContext, errors::ApiError};
use crate::context::PrincipalContext;

/// Bearer-token stage in front of every protected route.
///
/// Rejects before the handler runs; on success the request is forwarded
/// unchanged apart from a `PrincipalContext` extension.
pub async fn auth_middleware(
    State(ctx): State<AppContext>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header value that is not visible ASCII cannot carry the prefix.
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = ctx.auth().authorize_header(header, Utc::now())?;

    req.extensions_mut().insert(PrincipalContext::from(claims));

    Ok(next.run(req).await)
}
