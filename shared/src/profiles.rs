use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoClient};
use std::collections::HashMap;
use crate::errors::BackendError;
use crate::types::{ProfileRecord, USERS_COLLECTION};

/// Document store holding per-user application data
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a document; `Ok(None)` when it does not exist
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<ProfileRecord>, BackendError>;

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), BackendError>;
}

/// Single-table DynamoDB store.
///
/// A document `id` in collection `users` is the item with PK=SK=`USER#id`;
/// no other collection is stored in the table.
pub struct DynamoProfileStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoProfileStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

/// Partition/sort key value of a document
fn item_key(collection: &str, id: &str) -> Result<String, BackendError> {
    if collection != USERS_COLLECTION {
        return Err(BackendError::new(format!("Unknown collection: {}", collection)));
    }
    Ok(format!("USER#{}", id))
}

/// Profile of a stored user item; a missing or non-string role reads as ""
fn profile_from_item(id: &str, item: &HashMap<String, AttributeValue>) -> ProfileRecord {
    let role = item
        .get("role")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();
    ProfileRecord {
        uid: id.to_string(),
        role,
    }
}

#[async_trait]
impl ProfileStore for DynamoProfileStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<ProfileRecord>, BackendError> {
        let pk = item_key(collection, id)?;

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk.clone()))
            .key("SK", AttributeValue::S(pk))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| BackendError::from_sdk(&e))?;

        Ok(result.item().map(|item| profile_from_item(id, item)))
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        let pk = item_key(collection, id)?;
        tracing::info!("Deleting profile item: {}", pk);

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk.clone()))
            .key("SK", AttributeValue::S(pk))
            .send()
            .await
            .map_err(|e| BackendError::from_sdk(&e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_item(role: Option<AttributeValue>) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert("PK".to_string(), AttributeValue::S("USER#u1".to_string()));
        item.insert("SK".to_string(), AttributeValue::S("USER#u1".to_string()));
        item.insert("email".to_string(), AttributeValue::S("u1@example.com".to_string()));
        if let Some(role) = role {
            item.insert("role".to_string(), role);
        }
        item
    }

    #[test]
    fn test_item_key() {
        assert_eq!(item_key("users", "u2").unwrap(), "USER#u2");
        assert_eq!(
            item_key("status", "u2").unwrap_err().message,
            "Unknown collection: status"
        );
    }

    #[test]
    fn test_profile_from_item() {
        let admin = profile_from_item("u1", &user_item(Some(AttributeValue::S("admin".into()))));
        assert_eq!(admin.uid, "u1");
        assert_eq!(admin.role, "admin");
        assert!(admin.is_admin());

        let no_role = profile_from_item("u1", &user_item(None));
        assert_eq!(no_role.role, "");
        assert!(!no_role.is_admin());

        let numeric = profile_from_item("u1", &user_item(Some(AttributeValue::N("1".into()))));
        assert_eq!(numeric.role, "");
        assert!(!numeric.is_admin());
    }
}
