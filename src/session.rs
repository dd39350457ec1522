use std::sync::RwLock;

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;
use crate::models::UserStatus;

/// The authenticated identity as carried by the session, sourced from auth
/// metadata rather than a row in the users collection.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub metadata: IdentityMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityMetadata {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone_number: Option<String>,
    pub job_title: Option<String>,
    pub status: Option<UserStatus>,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` when nobody is signed in.
    async fn current_identity(&self) -> Result<Option<Identity>, BackendError>;
}

/// Claims carried by the access token. The identity provider embeds the
/// profile metadata in the token, so no row read is needed.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: IdentityMetadata,
    pub exp: usize,
}

/// Session provider over a bearer token. The consumer hands over the token
/// after sign-in; identity reads decode it locally.
pub struct JwtSession {
    secret: String,
    token: RwLock<Option<String>>,
}

impl JwtSession {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token: RwLock::new(None),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }
}

#[async_trait]
impl SessionProvider for JwtSession {
    async fn current_identity(&self) -> Result<Option<Identity>, BackendError> {
        let token = match self.token.read().unwrap().clone() {
            Some(token) => token,
            None => return Ok(None),
        };
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| BackendError::new(format!("token decode error: {}", e)))?;
        let id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| BackendError::new(format!("invalid subject id: {}", e)))?;
        Ok(Some(Identity {
            id,
            email: data.claims.email,
            metadata: data.claims.user_metadata,
        }))
    }
}

/// Fixed identity for tests and local tooling.
pub struct StaticSession {
    identity: Option<Identity>,
}

impl StaticSession {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_identity(&self) -> Result<Option<Identity>, BackendError> {
        Ok(self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn decodes_identity_from_token() {
        let session = JwtSession::new("sekrit");
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            email: "ann@example.com".to_string(),
            user_metadata: IdentityMetadata {
                first_name: "Ann".to_string(),
                last_name: "Smith".to_string(),
                ..Default::default()
            },
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        session.set_token(token_for(&claims, "sekrit"));

        let identity = session.current_identity().await.unwrap().unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.email, "ann@example.com");
        assert_eq!(identity.metadata.first_name, "Ann");
    }

    #[tokio::test]
    async fn no_token_means_no_identity() {
        let session = JwtSession::new("sekrit");
        assert!(session.current_identity().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wrong_secret_is_a_backend_error() {
        let session = JwtSession::new("right");
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "x@example.com".to_string(),
            user_metadata: IdentityMetadata::default(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        session.set_token(token_for(&claims, "wrong"));
        assert!(session.current_identity().await.is_err());
    }
}
