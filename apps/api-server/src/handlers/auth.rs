//! Authentication handlers.

use actix_web::{HttpResponse, web};

use blog_core::application::{
    AuthenticateUser, AuthenticateUserHandler, ChangePassword, ChangePasswordHandler, GetUser,
    GetUserHandler, Handler, IssueAccessToken, IssueAccessTokenHandler, RegisterUser,
    RegisterUserHandler,
};
use blog_shared::ApiResponse;
use blog_shared::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RegisterUserRequest, check_password,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn issue_token(state: &AppState, user_id: String) -> AppResult<AuthResponse> {
    let issued = IssueAccessTokenHandler::new(state.users.clone(), state.tokens.clone())
        .handle(IssueAccessToken { user_id })
        .await?;

    let expires_in = u64::try_from(issued.expires_in).unwrap_or(0);
    Ok(AuthResponse::bearer(issued.token, expires_in))
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    check_password(&req.password).map_err(AppError::BadRequest)?;

    let user_id = RegisterUserHandler::new(state.users.clone(), state.passwords.clone())
        .with_admin_email(state.admin_email.clone())
        .handle(RegisterUser {
            email: req.email,
            password: req.password,
        })
        .await?;

    let token = issue_token(&state, user_id.to_string()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(token)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = AuthenticateUserHandler::new(state.users.clone(), state.passwords.clone())
        .handle(AuthenticateUser {
            email: req.email,
            password: req.password,
        })
        .await?;

    let token = issue_token(&state, user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(token)))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = GetUserHandler::new(state.users.clone())
        .handle(GetUser {
            user_id: identity.user_id.to_string(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

/// PUT /api/auth/password
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    check_password(&req.new_password).map_err(AppError::BadRequest)?;

    AuthenticateUserHandler::new(state.users.clone(), state.passwords.clone())
        .handle(AuthenticateUser {
            email: identity.email.to_string(),
            password: req.current_password,
        })
        .await?;

    ChangePasswordHandler::new(state.users.clone(), state.passwords.clone())
        .handle(ChangePassword {
            user_id: identity.user_id.to_string(),
            new_password: req.new_password,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
