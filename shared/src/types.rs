use serde::Serialize;

/// Profile documents live in this collection, one per user
pub const USERS_COLLECTION: &str = "users";

/// Only profiles carrying exactly this role may delete other accounts
pub const ADMIN_ROLE: &str = "admin";

// ========== CALLER ==========
/// Identity of the authenticated user invoking the function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub uid: String,
}

impl CallerIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

// ========== PROFILE ==========
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub uid: String,
    pub role: String, // admin | editor | ...
}

impl ProfileRecord {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

// ========== DELETE USER ==========
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DeleteUserResponse {
    pub message: String,
}

impl DeleteUserResponse {
    pub fn deleted(uid: &str) -> Self {
        Self {
            message: format!("Successfully deleted user {}", uid),
        }
    }
}
