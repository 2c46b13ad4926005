//! Identity resolution for the join flow.
//!
//! The caller's identity comes from the verified access token. Its `email`
//! claim is authoritative; the stored profile row only fills in when the
//! token carries no email.

use async_trait::async_trait;
use domain::models::{Identity, User};
use domain::services::{IdentityResolver, StoreError};
use persistence::repositories::UserRepository;

use crate::middleware::user_auth::UserAuth;

/// Resolves the identity of the current request.
pub struct RequestIdentityResolver {
    auth: Option<UserAuth>,
    users: UserRepository,
}

impl RequestIdentityResolver {
    pub fn new(auth: Option<UserAuth>, users: UserRepository) -> Self {
        Self { auth, users }
    }
}

/// Merges the token claims with the stored profile.
fn identity_from(auth: &UserAuth, profile: Option<User>) -> Identity {
    let token_email = auth.email.clone().filter(|e| !e.trim().is_empty());

    Identity {
        id: auth.user_id,
        email: token_email.or_else(|| {
            profile
                .and_then(|user| user.email)
                .filter(|e| !e.trim().is_empty())
        }),
    }
}

#[async_trait]
impl IdentityResolver for RequestIdentityResolver {
    async fn current_identity(&self) -> Result<Option<Identity>, StoreError> {
        let Some(auth) = &self.auth else {
            return Ok(None);
        };

        let profile = self
            .users
            .find_by_id(auth.user_id)
            .await
            .map_err(persistence::store_error)?
            .map(User::from);

        Ok(Some(identity_from(auth, profile)))
    }
}
