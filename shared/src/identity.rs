use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use crate::errors::BackendError;

/// Service of record for accounts and their credentials
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Delete the account identified by `uid`
    async fn delete_user(&self, uid: &str) -> Result<(), BackendError>;
}

/// Cognito user pool backed identity provider.
///
/// Account ids are the pool usernames (the Cognito `sub`).
pub struct CognitoIdentityProvider {
    client: CognitoClient,
    user_pool_id: String,
}

impl CognitoIdentityProvider {
    pub fn new(client: CognitoClient, user_pool_id: impl Into<String>) -> Self {
        Self {
            client,
            user_pool_id: user_pool_id.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn delete_user(&self, uid: &str) -> Result<(), BackendError> {
        tracing::info!("Deleting Cognito user: {}", uid);

        self.client
            .admin_delete_user()
            .user_pool_id(&self.user_pool_id)
            .username(uid)
            .send()
            .await
            .map_err(|e| BackendError::from_sdk(&e))?;

        Ok(())
    }
}
