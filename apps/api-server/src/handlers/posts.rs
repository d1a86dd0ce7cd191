//! Post endpoints.

use actix_web::{HttpResponse, web};

use blog_core::application::{
    ArchivePost, ArchivePostHandler, CreatePost, CreatePostHandler, DeletePost,
    DeletePostHandler, GetPost, GetPostHandler, Handler, ListPosts, ListPostsHandler,
    PublishPost, PublishPostHandler, UpdatePostContent, UpdatePostContentHandler,
};
use blog_shared::ApiResponse;
use blog_shared::dto::{CreatedResponse, PostListQuery, PostRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a post and check the caller may change it.
async fn check_owner(state: &AppState, identity: &Identity, post_id: &str) -> AppResult<()> {
    let post = GetPostHandler::new(state.posts.clone())
        .handle(GetPost {
            post_id: post_id.to_string(),
        })
        .await?;
    identity.require_owner_or_admin(&post.author_id)
}

/// GET /api/posts
///
/// Anonymous callers and regular users see published posts; admins may pass
/// `all=true` to include drafts and archived posts.
pub async fn list(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let is_admin = identity.0.as_ref().is_some_and(Identity::is_admin);

    let posts = ListPostsHandler::new(state.posts.clone())
        .handle(ListPosts {
            published_only: !(query.all && is_admin),
            author_id: query.author_id,
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = GetPostHandler::new(state.posts.clone())
        .handle(GetPost {
            post_id: path.into_inner(),
        })
        .await?;

    // Unpublished posts are visible to their author and admins only.
    if post.status != "published" {
        match &identity.0 {
            Some(identity) => identity.require_owner_or_admin(&post.author_id)?,
            None => return Err(AppError::Unauthorized),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let id = CreatePostHandler::new(state.posts.clone())
        .handle(CreatePost {
            title: req.title,
            content: req.content,
            author_id: identity.user_id.to_string(),
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreatedResponse { id: id.to_string() })))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    check_owner(&state, &identity, &post_id).await?;
    let req = body.into_inner();

    UpdatePostContentHandler::new(state.posts.clone())
        .handle(UpdatePostContent {
            post_id,
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/publish
pub async fn publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    check_owner(&state, &identity, &post_id).await?;

    PublishPostHandler::new(state.posts.clone())
        .handle(PublishPost { post_id })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/archive
pub async fn archive(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    check_owner(&state, &identity, &post_id).await?;

    ArchivePostHandler::new(state.posts.clone())
        .handle(ArchivePost { post_id })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    check_owner(&state, &identity, &post_id).await?;

    DeletePostHandler::new(state.posts.clone(), state.comments.clone())
        .handle(DeletePost { post_id })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
