//! HS256 access tokens.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use blog_core::domain::{EmailAddress, Identifier, UserRole};
use blog_core::ports::{AccessToken, AuthError, Principal, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";
const DEFAULT_ISSUER: &str = "blog-api";

/// Signing secret, token lifetime and issuer.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl: TimeDelta,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            ttl: TimeDelta::hours(24),
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                let production = std::env::var("RUST_ENV")
                    .is_ok_and(|v| v == "production" || v == "prod");
                if production {
                    tracing::error!("SECURITY: JWT_SECRET is not set, signing with the default secret");
                } else {
                    tracing::warn!("JWT_SECRET is not set, signing with the default secret");
                }
                defaults.secret
            }
        };

        let ttl = std::env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(TimeDelta::hours)
            .unwrap_or(defaults.ttl);

        Self {
            secret,
            ttl,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// Token payload as it travels. `sub` only deserializes from a canonical id.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: Identifier,
    email: String,
    role: String,
    iss: String,
    iat: i64,
    exp: i64,
}

fn invalid(err: impl ToString) -> AuthError {
    AuthError::InvalidToken(err.to_string())
}

impl WireClaims {
    fn into_claims(self) -> Result<TokenClaims, AuthError> {
        let email = EmailAddress::from_string(&self.email).map_err(invalid)?;
        let role = UserRole::from_string(&self.role).map_err(invalid)?;
        let expires_at =
            DateTime::from_timestamp(self.exp, 0).ok_or_else(|| invalid("expiry out of range"))?;

        Ok(TokenClaims {
            principal: Principal {
                user_id: self.sub,
                email,
                role,
            },
            expires_at,
        })
    }
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    issuer: String,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.ttl,
            issuer: config.issuer,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let claims = WireClaims {
            sub: principal.user_id,
            email: principal.email.to_string(),
            role: principal.role.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(AccessToken {
            token,
            expires_in: self.ttl.num_seconds(),
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<WireClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => invalid(e),
            },
        )?;

        data.claims.into_claims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            ttl: TimeDelta::hours(1),
            issuer: "test-issuer".to_string(),
        }
    }

    fn principal(role: UserRole) -> Principal {
        Principal {
            user_id: Identifier::generate(),
            email: EmailAddress::from_string("writer@example.com").unwrap(),
            role,
        }
    }

    /// Sign arbitrary wire claims with the test secret.
    fn forge(claims: &WireClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let service = JwtTokenService::new(config());
        let admin = principal(UserRole::Admin);

        let issued = service.issue(&admin).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(issued.expires_in, 3600);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.principal, admin);
        assert!(claims.principal.role.is_admin());
        assert!(claims.expires_at > Utc::now());
    }

    #[test]
    fn test_garbage_is_invalid() {
        let service = JwtTokenService::new(config());
        assert!(matches!(
            service.verify("invalid-token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_other_issuer_is_invalid() {
        let token = JwtTokenService::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..config()
        })
        .issue(&principal(UserRole::User))
        .unwrap()
        .token;

        assert!(matches!(
            JwtTokenService::new(config()).verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_other_secret_is_invalid() {
        let token = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..config()
        })
        .issue(&principal(UserRole::User))
        .unwrap()
        .token;

        assert!(matches!(
            JwtTokenService::new(config()).verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtTokenService::new(JwtConfig {
            ttl: TimeDelta::hours(-2),
            ..config()
        });
        let token = service.issue(&principal(UserRole::User)).unwrap().token;

        assert!(matches!(service.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_unknown_role_is_invalid() {
        let service = JwtTokenService::new(config());
        let now = Utc::now().timestamp();
        let token = forge(&WireClaims {
            sub: Identifier::generate(),
            email: "writer@example.com".to_string(),
            role: "superuser".to_string(),
            iss: "test-issuer".to_string(),
            iat: now,
            exp: now + 600,
        });

        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_malformed_email_is_invalid() {
        let service = JwtTokenService::new(config());
        let now = Utc::now().timestamp();
        let token = forge(&WireClaims {
            sub: Identifier::generate(),
            email: "not an email".to_string(),
            role: "user".to_string(),
            iss: "test-issuer".to_string(),
            iat: now,
            exp: now + 600,
        });

        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken(_))));
    }
}
