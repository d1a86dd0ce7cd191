//! Comment endpoints.

use actix_web::{HttpResponse, web};

use blog_core::application::{
    CreateComment, CreateCommentHandler, DeleteComment, DeleteCommentHandler, GetComment,
    GetCommentHandler, Handler, ListComments, ListCommentsHandler, UpdateComment,
    UpdateCommentHandler,
};
use blog_shared::ApiResponse;
use blog_shared::dto::{CommentRequest, CreatedResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Load a comment and check the caller wrote it or is an admin.
async fn check_author(state: &AppState, identity: &Identity, comment_id: &str) -> AppResult<()> {
    let comment = GetCommentHandler::new(state.comments.clone())
        .handle(GetComment {
            comment_id: comment_id.to_string(),
        })
        .await?;
    identity.require_owner_or_admin(&comment.author_id)
}

/// GET /api/posts/{id}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let comments = ListCommentsHandler::new(state.comments.clone())
        .handle(ListComments {
            post_id: path.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let id = CreateCommentHandler::new(state.comments.clone(), state.posts.clone())
        .handle(CreateComment {
            post_id: path.into_inner(),
            author_id: identity.user_id.to_string(),
            content: body.into_inner().content,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreatedResponse { id: id.to_string() })))
}

/// PUT /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();
    check_author(&state, &identity, &comment_id).await?;

    UpdateCommentHandler::new(state.comments.clone())
        .handle(UpdateComment {
            comment_id,
            content: body.into_inner().content,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();
    check_author(&state, &identity, &comment_id).await?;

    DeleteCommentHandler::new(state.comments.clone())
        .handle(DeleteComment { comment_id })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
