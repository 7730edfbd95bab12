use serde_json::Value;
use crate::errors::{BackendError, CallableError};
use crate::types::{CallerIdentity, DeleteUserResponse, USERS_COLLECTION};
use crate::AppState;

/// Target named by a deletion payload
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    /// Absent, `null`, `false`, `0` or `""`
    Missing,
    /// Present but not a string, e.g. `42` or `true`
    Malformed,
    Uid(&'a str),
}

fn target(data: &Value) -> Target<'_> {
    match data.get("uid") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Target::Missing,
        Some(Value::String(uid)) if uid.is_empty() => Target::Missing,
        Some(Value::String(uid)) => Target::Uid(uid),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Target::Missing,
        Some(_) => Target::Malformed,
    }
}

/// Rejection the identity provider gives for an id that is not a string
fn malformed_uid_error() -> BackendError {
    BackendError::new("The uid must be a non-empty string with at most 128 characters.")
        .with_code("InvalidParameterException")
}

/// Delete another user's account and profile on behalf of an admin caller.
///
/// Checks run in order and stop at the first failure: the caller must be
/// authenticated, must own a profile whose role is `admin`, and must name a
/// target `uid`. The account is then removed from the identity provider and
/// its profile from the store. The two deletions are not transactional: if
/// the profile deletion fails the account stays deleted.
pub async fn delete_user_account(
    state: &AppState,
    caller: Option<&CallerIdentity>,
    data: &Value,
) -> Result<DeleteUserResponse, CallableError> {
    let caller = caller.ok_or_else(|| {
        tracing::warn!("Rejected unauthenticated delete request");
        CallableError::Unauthenticated
    })?;

    let caller_profile = state
        .profiles
        .get_document(USERS_COLLECTION, &caller.uid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load profile of caller {}: {:?}", caller.uid, e);
            CallableError::Internal
        })?;

    // A missing profile and a non-admin role are reported the same way
    if !caller_profile.is_some_and(|profile| profile.is_admin()) {
        tracing::warn!("User {} is not allowed to delete users", caller.uid);
        return Err(CallableError::PermissionDenied);
    }

    if data.is_null() {
        tracing::error!("Delete request from {} carried no payload", caller.uid);
        return Err(CallableError::Internal);
    }

    let uid = match target(data) {
        Target::Missing => return Err(CallableError::InvalidArgument),
        Target::Malformed => {
            let e = malformed_uid_error();
            tracing::error!("Error deleting user {}: {:?}", data["uid"], e);
            return Err(e.into());
        }
        Target::Uid(uid) => uid,
    };

    tracing::info!("Admin {} deleting user {}", caller.uid, uid);

    if let Err(e) = delete_account_and_profile(state, uid).await {
        tracing::error!("Error deleting user {}: {:?}", uid, e);
        return Err(e.into());
    }

    tracing::info!("Deleted user {}", uid);
    Ok(DeleteUserResponse::deleted(uid))
}

async fn delete_account_and_profile(state: &AppState, uid: &str) -> Result<(), BackendError> {
    state.identity.delete_user(uid).await?;
    state.profiles.delete_document(USERS_COLLECTION, uid).await?;
    Ok(())
}
