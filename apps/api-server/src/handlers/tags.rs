//! Tag endpoints. Reads are public, writes are admin-only.

use actix_web::{HttpResponse, web};

use blog_core::application::{
    CreateTag, CreateTagHandler, DeleteTag, DeleteTagHandler, GetTag, GetTagHandler, Handler,
    ListTags, ListTagsHandler, UpdateTag, UpdateTagHandler,
};
use blog_shared::ApiResponse;
use blog_shared::dto::{CreatedResponse, TagRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = ListTagsHandler::new(state.tags.clone())
        .handle(ListTags)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tags)))
}

/// GET /api/tags/{slug}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let tag = GetTagHandler::new(state.tags.clone())
        .handle(GetTag { slug: slug.clone() })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag '{}' not found", slug)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tag)))
}

/// POST /api/tags
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let req = body.into_inner();

    let id = CreateTagHandler::new(state.tags.clone())
        .handle(CreateTag {
            name: req.name,
            slug: req.slug,
            color: req.color,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreatedResponse { id: id.to_string() })))
}

/// PUT /api/tags/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let req = body.into_inner();

    UpdateTagHandler::new(state.tags.clone())
        .handle(UpdateTag {
            tag_id: path.into_inner(),
            name: req.name,
            slug: req.slug,
            color: req.color,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/tags/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    DeleteTagHandler::new(state.tags.clone())
        .handle(DeleteTag {
            tag_id: path.into_inner(),
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
