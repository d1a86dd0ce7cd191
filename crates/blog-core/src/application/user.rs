use std::sync::Arc;

use async_trait::async_trait;

use super::{Handler, UserView, load};
use crate::domain::{AggregateRoot, EmailAddress, Identifier, User, UserRole};
use crate::error::{DomainError, DomainResult};
use crate::ports::{
    AccessToken, AuthError, PasswordService, Principal, TokenService, UserRepository,
};

fn hashing_failed(err: AuthError) -> DomainError {
    DomainError::Internal(err.to_string())
}

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
}

/// Registers a new user with the default role.
///
/// The address configured with [`RegisterUserHandler::with_admin_email`]
/// registers as an admin instead, which is how a fresh deployment gets its
/// first admin.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    admin_email: Option<EmailAddress>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            users,
            passwords,
            admin_email: None,
        }
    }

    pub fn with_admin_email(mut self, admin_email: Option<EmailAddress>) -> Self {
        self.admin_email = admin_email;
        self
    }
}

#[async_trait]
impl Handler<RegisterUser> for RegisterUserHandler {
    type Output = Identifier;

    async fn handle(&self, input: RegisterUser) -> DomainResult<Identifier> {
        let email = EmailAddress::from_string(&input.email)?;

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::debug!(user_email = %email.masked(), "Registration rejected, email taken");
            return Err(DomainError::Duplicate(
                "Email already registered".to_string(),
            ));
        }

        let role = (self.admin_email.as_ref() == Some(&email)).then_some(UserRole::Admin);
        let password_hash = self.passwords.hash(&input.password).map_err(hashing_failed)?;
        let user = User::create(email, password_hash, role);
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id(), role = %user.role(), "User registered");
        Ok(user.id())
    }
}

/// Checks credentials. Unknown email and wrong password are indistinguishable.
#[derive(Debug, Clone)]
pub struct AuthenticateUser {
    pub email: String,
    pub password: String,
}

pub struct AuthenticateUserHandler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AuthenticateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }
}

#[async_trait]
impl Handler<AuthenticateUser> for AuthenticateUserHandler {
    type Output = UserView;

    async fn handle(&self, input: AuthenticateUser) -> DomainResult<UserView> {
        let email = EmailAddress::from_string(&input.email).map_err(|_| DomainError::Unauthorized)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(&input.password, user.password_hash())
            .map_err(hashing_failed)?;
        if !valid {
            tracing::debug!(user_email = %email.masked(), "Login failed");
            return Err(DomainError::Unauthorized);
        }

        Ok(UserView::from(&user))
    }
}

#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub user_id: String,
    pub new_password: String,
}

pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }
}

#[async_trait]
impl Handler<ChangePassword> for ChangePasswordHandler {
    type Output = ();

    async fn handle(&self, input: ChangePassword) -> DomainResult<()> {
        let user_id = Identifier::parse(&input.user_id)?;

        let mut user: User = load(self.users.as_ref(), user_id).await?;
        let password_hash = self
            .passwords
            .hash(&input.new_password)
            .map_err(hashing_failed)?;
        user.change_password(password_hash);
        self.users.save(&user).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PromoteUser {
    pub user_id: String,
}

pub struct PromoteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl PromoteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Handler<PromoteUser> for PromoteUserHandler {
    type Output = ();

    async fn handle(&self, input: PromoteUser) -> DomainResult<()> {
        let user_id = Identifier::parse(&input.user_id)?;

        let mut user: User = load(self.users.as_ref(), user_id).await?;
        user.promote_to_admin();
        self.users.save(&user).await?;

        tracing::info!(user_id = %user_id, "User promoted to admin");
        Ok(())
    }
}

/// Issues an access token for a stored user. The role is read from storage,
/// so a promotion takes effect on the next token.
#[derive(Debug, Clone)]
pub struct IssueAccessToken {
    pub user_id: String,
}

pub struct IssueAccessTokenHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl IssueAccessTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl Handler<IssueAccessToken> for IssueAccessTokenHandler {
    type Output = AccessToken;

    async fn handle(&self, input: IssueAccessToken) -> DomainResult<AccessToken> {
        let user_id = Identifier::parse(&input.user_id)?;
        let user: User = load(self.users.as_ref(), user_id).await?;

        self.tokens
            .issue(&Principal::from(&user))
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: String,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Handler<GetUser> for GetUserHandler {
    type Output = UserView;

    async fn handle(&self, input: GetUser) -> DomainResult<UserView> {
        let user_id = Identifier::parse(&input.user_id)?;
        let user: User = load(self.users.as_ref(), user_id).await?;
        Ok(UserView::from(&user))
    }
}
