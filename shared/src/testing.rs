//! In-memory collaborators that record every call, in order.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use crate::config::Config;
use crate::errors::BackendError;
use crate::identity::IdentityProvider;
use crate::profiles::ProfileStore;
use crate::types::{ProfileRecord, USERS_COLLECTION};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetDocument { collection: String, id: String },
    DeleteUser(String),
    DeleteDocument { collection: String, id: String },
}

impl Call {
    pub fn is_deletion(&self) -> bool {
        matches!(self, Call::DeleteUser(_) | Call::DeleteDocument { .. })
    }
}

type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct FakeIdentityProvider {
    log: CallLog,
    users: Mutex<HashSet<String>>,
    failure: Mutex<Option<BackendError>>,
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn delete_user(&self, uid: &str) -> Result<(), BackendError> {
        self.log.lock().unwrap().push(Call::DeleteUser(uid.to_string()));

        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        if !self.users.lock().unwrap().remove(uid) {
            return Err(BackendError::new(
                "There is no user record corresponding to the provided identifier.",
            )
            .with_code("UserNotFoundException"));
        }
        Ok(())
    }
}

pub struct FakeProfileStore {
    log: CallLog,
    documents: Mutex<HashMap<(String, String), ProfileRecord>>,
    get_failure: Mutex<Option<BackendError>>,
    delete_failure: Mutex<Option<BackendError>>,
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<ProfileRecord>, BackendError> {
        self.log.lock().unwrap().push(Call::GetDocument {
            collection: collection.to_string(),
            id: id.to_string(),
        });

        if let Some(err) = self.get_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        self.log.lock().unwrap().push(Call::DeleteDocument {
            collection: collection.to_string(),
            id: id.to_string(),
        });

        if let Some(err) = self.delete_failure.lock().unwrap().clone() {
            return Err(err);
        }
        // Deleting a missing document succeeds, as in most document stores
        self.documents
            .lock()
            .unwrap()
            .remove(&(collection.to_string(), id.to_string()));
        Ok(())
    }
}

/// Identity provider and profile store sharing one call log
pub struct FakeBackend {
    pub identity: Arc<FakeIdentityProvider>,
    pub profiles: Arc<FakeProfileStore>,
    log: CallLog,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        let log: CallLog = Arc::default();
        Self {
            identity: Arc::new(FakeIdentityProvider {
                log: Arc::clone(&log),
                users: Mutex::default(),
                failure: Mutex::default(),
            }),
            profiles: Arc::new(FakeProfileStore {
                log: Arc::clone(&log),
                documents: Mutex::default(),
                get_failure: Mutex::default(),
                delete_failure: Mutex::default(),
            }),
            log,
        }
    }

    /// Add an account with a profile document carrying `role`
    pub fn with_user(self, uid: &str, role: &str) -> Self {
        self.identity.users.lock().unwrap().insert(uid.to_string());
        self.profiles.documents.lock().unwrap().insert(
            (USERS_COLLECTION.to_string(), uid.to_string()),
            ProfileRecord {
                uid: uid.to_string(),
                role: role.to_string(),
            },
        );
        self
    }

    /// Add an account that has no profile document
    pub fn with_account_only(self, uid: &str) -> Self {
        self.identity.users.lock().unwrap().insert(uid.to_string());
        self
    }

    pub fn failing_user_deletion(self, err: BackendError) -> Self {
        *self.identity.failure.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_profile_lookup(self, err: BackendError) -> Self {
        *self.profiles.get_failure.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_profile_deletion(self, err: BackendError) -> Self {
        *self.profiles.delete_failure.lock().unwrap() = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn deletion_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_deletion).collect()
    }

    pub fn has_account(&self, uid: &str) -> bool {
        self.identity.users.lock().unwrap().contains(uid)
    }

    pub fn has_profile(&self, uid: &str) -> bool {
        self.profiles
            .documents
            .lock()
            .unwrap()
            .contains_key(&(USERS_COLLECTION.to_string(), uid.to_string()))
    }

    pub fn state(&self, config: Config) -> Arc<AppState> {
        AppState::new(self.identity.clone(), self.profiles.clone(), config)
    }
}
