//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod tags;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/password", web::put().to(auth::change_password)),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list))
                            .route(web::post().to(posts::create)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::get))
                            .route(web::put().to(posts::update))
                            .route(web::delete().to(posts::delete)),
                    )
                    .route("/{id}/publish", web::post().to(posts::publish))
                    .route("/{id}/archive", web::post().to(posts::archive))
                    .service(
                        web::resource("/{id}/comments")
                            .route(web::get().to(comments::list))
                            .route(web::post().to(comments::create)),
                    ),
            )
            .service(
                web::resource("/comments/{id}")
                    .route(web::put().to(comments::update))
                    .route(web::delete().to(comments::delete)),
            )
            .service(
                web::resource("/tags")
                    .route(web::get().to(tags::list))
                    .route(web::post().to(tags::create)),
            )
            // GET takes a slug; PUT and DELETE take the tag id.
            .service(
                web::resource("/tags/{key}")
                    .route(web::get().to(tags::get))
                    .route(web::put().to(tags::update))
                    .route(web::delete().to(tags::delete)),
            )
            .route("/users/{id}/promote", web::post().to(users::promote)),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use blog_core::domain::{EmailAddress, Identifier};
    use blog_core::ports::CommentRepository;
    use blog_infra::auth::{Argon2Config, Argon2PasswordService, JwtConfig, JwtTokenService};

    use super::*;
    use crate::middleware::request_id::RequestIdMiddleware;
    use crate::state::AppState;

    fn test_state() -> AppState {
        let passwords = Argon2PasswordService::with_config(Argon2Config {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "api-test-secret".to_string(),
            ..JwtConfig::default()
        });
        AppState::in_memory(Arc::new(passwords), Arc::new(tokens))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .wrap(RequestIdMiddleware)
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! register {
        ($app:expr, $email:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({ "email": $email, "password": "long-enough-password" }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            body["data"]["access_token"].as_str().unwrap().to_string()
        }};
    }

    macro_rules! login {
        ($app:expr, $email:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": $email, "password": "long-enough-password" }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            body["data"]["access_token"].as_str().unwrap().to_string()
        }};
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_health_echoes_request_id() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/health")
            .insert_header(("X-Request-ID", "req-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["storage"], "memory");
        assert_eq!(body["request_id"], "req-123");
    }

    #[actix_web::test]
    async fn test_register_rejects_short_password() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "a@example.com", "password": "short" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_duplicate_registration_conflicts() {
        let state = test_state();
        let app = app!(state);
        register!(app, "dup@example.com");

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "dup@example.com", "password": "long-enough-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let state = test_state();
        let app = app!(state);

        let anonymous = test::TestRequest::get().uri("/api/auth/me").to_request();
        assert_eq!(
            test::call_service(&app, anonymous).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let token = register!(app, "me@example.com");
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], "me@example.com");
        assert_eq!(body["data"]["role"], "user");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_post_lifecycle_over_http() {
        let state = test_state();
        let app = app!(state);
        let token = register!(app, "author@example.com");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Hello", "content": "Hello world, this is a post" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let post_id = body["data"]["id"].as_str().unwrap().to_string();

        let listed: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/posts").to_request(),
        )
        .await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 0);

        let publish = || {
            test::TestRequest::post()
                .uri(&format!("/api/posts/{post_id}/publish"))
                .insert_header(bearer(&token))
                .to_request()
        };
        assert_eq!(
            test::call_service(&app, publish()).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            test::call_service(&app, publish()).await.status(),
            StatusCode::CONFLICT
        );

        let listed: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/posts").to_request(),
        )
        .await;
        assert_eq!(listed["data"][0]["status"], "published");
    }

    #[actix_web::test]
    async fn test_other_users_cannot_edit_post() {
        let state = test_state();
        let app = app!(state);
        let author = register!(app, "owner@example.com");
        let intruder = register!(app, "intruder@example.com");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&author))
            .set_json(json!({ "title": "Mine", "content": "Content only I may edit" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let post_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer(&intruder))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_comment_on_missing_post_is_not_found() {
        let state = test_state();
        let app = app!(state);
        let token = register!(app, "commenter@example.com");

        let req = test::TestRequest::post()
            .uri("/api/posts/6f1c2a3b-4d5e-4f60-8a7b-9c0d1e2f3a4b/comments")
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "Anyone here?" }))
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_tag_writes_require_admin() {
        let state = test_state()
            .with_admin_email(Some(EmailAddress::from_string("root@example.com").unwrap()));
        let app = app!(state);
        let editor = register!(app, "editor@example.com");
        let root = register!(app, "Root@Example.com");

        let create = |token: &str| {
            test::TestRequest::post()
                .uri("/api/tags")
                .insert_header(bearer(token))
                .set_json(json!({ "name": "Rust Lang", "color": "red" }))
                .to_request()
        };
        assert_eq!(
            test::call_service(&app, create(&editor)).await.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            test::call_service(&app, create(&root)).await.status(),
            StatusCode::CREATED
        );
        assert_eq!(
            test::call_service(&app, create(&root)).await.status(),
            StatusCode::CONFLICT
        );

        let tag: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/tags/rust-lang").to_request(),
        )
        .await;
        assert_eq!(tag["data"]["color"], "#EF4444");

        let missing = test::TestRequest::get().uri("/api/tags/nothing").to_request();
        assert_eq!(
            test::call_service(&app, missing).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_bootstrap_admin_promotes_over_http() {
        let state = test_state()
            .with_admin_email(Some(EmailAddress::from_string("root@example.com").unwrap()));
        let app = app!(state);
        let root = register!(app, "root@example.com");
        let editor = register!(app, "editor@example.com");

        let me: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header(bearer(&editor))
                .to_request(),
        )
        .await;
        let editor_id = me["data"]["id"].as_str().unwrap().to_string();

        let promote = |token: &str| {
            test::TestRequest::post()
                .uri(&format!("/api/users/{editor_id}/promote"))
                .insert_header(bearer(token))
                .to_request()
        };
        assert_eq!(
            test::call_service(&app, promote(&editor)).await.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            test::call_service(&app, promote(&root)).await.status(),
            StatusCode::NO_CONTENT
        );

        // The old token still carries the user role.
        let create = |token: &str| {
            test::TestRequest::post()
                .uri("/api/tags")
                .insert_header(bearer(token))
                .set_json(json!({ "name": "Databases" }))
                .to_request()
        };
        assert_eq!(
            test::call_service(&app, create(&editor)).await.status(),
            StatusCode::FORBIDDEN
        );
        let editor = login!(app, "editor@example.com");
        assert_eq!(
            test::call_service(&app, create(&editor)).await.status(),
            StatusCode::CREATED
        );
    }

    #[actix_web::test]
    async fn test_without_admin_email_everyone_is_user() {
        let state = test_state();
        let app = app!(state);
        let token = register!(app, "root@example.com");

        let me: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header(bearer(&token))
                .to_request(),
        )
        .await;
        assert_eq!(me["data"]["role"], "user");
    }

    #[actix_web::test]
    async fn test_only_author_or_admin_changes_comment() {
        let state = test_state()
            .with_admin_email(Some(EmailAddress::from_string("root@example.com").unwrap()));
        let app = app!(state);
        let author = register!(app, "author@example.com");
        let stranger = register!(app, "stranger@example.com");
        let root = register!(app, "root@example.com");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&author))
            .set_json(json!({ "title": "Discussed", "content": "A post with a discussion" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let post_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{post_id}/comments"))
            .insert_header(bearer(&author))
            .set_json(json!({ "content": "Author's own note" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let comment_id = body["data"]["id"].as_str().unwrap().to_string();

        let edit = |token: &str| {
            test::TestRequest::put()
                .uri(&format!("/api/comments/{comment_id}"))
                .insert_header(bearer(token))
                .set_json(json!({ "content": "Rewritten text" }))
                .to_request()
        };
        let remove = |token: &str| {
            test::TestRequest::delete()
                .uri(&format!("/api/comments/{comment_id}"))
                .insert_header(bearer(token))
                .to_request()
        };

        assert_eq!(
            test::call_service(&app, edit(&stranger)).await.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            test::call_service(&app, remove(&stranger)).await.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            test::call_service(&app, edit(&author)).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            test::call_service(&app, remove(&root)).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            test::call_service(&app, remove(&author)).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_deleting_post_removes_its_comments() {
        let state = test_state();
        let app = app!(state);
        let token = register!(app, "author@example.com");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Short lived", "content": "This post will be deleted" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let post_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{post_id}/comments"))
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "First comment" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let post_id = Identifier::parse(&post_id).unwrap();
        assert!(state.comments.find_by_post_id(post_id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_invalid_id_is_bad_request() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/posts/not-a-uuid").to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
