//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::EmailAddress;
use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, TagRepository, TokenService,
    UserRepository,
};
use blog_infra::{
    Argon2PasswordService, InMemoryCommentRepository, InMemoryPostRepository,
    InMemoryTagRepository, InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use blog_infra::{
    DatabaseConfig, DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

/// Shared application state. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    /// Which storage backend the repositories use, reported by `/health`.
    pub storage: &'static str,
    /// Registering with this address yields an admin account.
    pub admin_email: Option<EmailAddress>,
}

impl AppState {
    /// State backed by in-memory repositories.
    pub fn in_memory(passwords: Arc<dyn PasswordService>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            tags: Arc::new(InMemoryTagRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            passwords,
            tokens,
            storage: "memory",
            admin_email: None,
        }
    }

    pub fn with_admin_email(mut self, admin_email: Option<EmailAddress>) -> Self {
        self.admin_email = admin_email;
        self
    }

    /// Build the state from the environment, falling back to in-memory
    /// repositories when no database is configured or reachable.
    #[cfg(feature = "postgres")]
    pub async fn from_env(db_config: Option<&DatabaseConfig>) -> std::io::Result<Self> {
        let (passwords, tokens) = services_from_env()?;

        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory(passwords, tokens));
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => {
                let db = connections.main;
                tracing::info!("Using PostgreSQL repositories");
                Ok(Self {
                    posts: Arc::new(PostgresPostRepository::new(db.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(db.clone())),
                    tags: Arc::new(PostgresTagRepository::new(db.clone())),
                    users: Arc::new(PostgresUserRepository::new(db)),
                    passwords,
                    tokens,
                    storage: "postgres",
                    admin_email: None,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
                Ok(Self::in_memory(passwords, tokens))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn from_env() -> std::io::Result<Self> {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        let (passwords, tokens) = services_from_env()?;
        Ok(Self::in_memory(passwords, tokens))
    }
}

fn services_from_env() -> std::io::Result<(Arc<dyn PasswordService>, Arc<dyn TokenService>)> {
    let passwords = Argon2PasswordService::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    Ok((Arc::new(passwords), Arc::new(JwtTokenService::from_env())))
}
