//! User administration.

use actix_web::{HttpResponse, web};

use blog_core::application::{Handler, PromoteUser, PromoteUserHandler};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/users/{id}/promote
pub async fn promote(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let user_id = path.into_inner();

    PromoteUserHandler::new(state.users.clone())
        .handle(PromoteUser {
            user_id: user_id.clone(),
        })
        .await?;

    tracing::info!(user_id = %user_id, promoted_by = %identity.user_id, "User promoted");
    Ok(HttpResponse::NoContent().finish())
}
