use super::AggregateRoot;
use super::value_objects::{CreationTimestamp, EmailAddress, Identifier, UserRole};

/// User entity - identity, credential and role.
///
/// The password hash is opaque here: hashing and verification belong to
/// [`PasswordService`](crate::ports::PasswordService).
#[derive(Debug, Clone)]
pub struct User {
    id: Identifier,
    email: EmailAddress,
    password_hash: String,
    role: UserRole,
    created_at: CreationTimestamp,
}

impl User {
    /// Create a new user. Role defaults to [`UserRole::User`].
    pub fn create(email: EmailAddress, password_hash: String, role: Option<UserRole>) -> Self {
        Self {
            id: Identifier::generate(),
            email,
            password_hash,
            role: role.unwrap_or_default(),
            created_at: CreationTimestamp::now(),
        }
    }

    /// Rebuild a user from stored, already-validated parts.
    pub fn reconstitute(
        id: Identifier,
        email: EmailAddress,
        password_hash: String,
        role: UserRole,
        created_at: CreationTimestamp,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            role,
            created_at,
        }
    }

    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }

    /// There is no demotion.
    pub fn promote_to_admin(&mut self) {
        self.role = UserRole::Admin;
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn created_at(&self) -> CreationTimestamp {
        self.created_at
    }
}

impl AggregateRoot for User {
    const NAME: &'static str = "User";

    fn id(&self) -> Identifier {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> EmailAddress {
        EmailAddress::from_string("reader@example.com").unwrap()
    }

    #[test]
    fn test_create_defaults_to_user_role() {
        let user = User::create(email(), "$argon2id$hash".to_string(), None);
        assert_eq!(user.role(), UserRole::User);

        let admin = User::create(email(), "$argon2id$hash".to_string(), Some(UserRole::Admin));
        assert!(admin.role().is_admin());
    }

    #[test]
    fn test_promote_is_idempotent() {
        let mut user = User::create(email(), "$argon2id$hash".to_string(), None);
        user.promote_to_admin();
        user.promote_to_admin();
        assert_eq!(user.role(), UserRole::Admin);
    }

    #[test]
    fn test_change_password_replaces_hash() {
        let mut user = User::create(email(), "old-hash".to_string(), None);
        user.change_password("new-hash".to_string());
        assert_eq!(user.password_hash(), "new-hash");
    }
}
