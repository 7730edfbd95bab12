use account_admin_shared::{accounts, callable, types::CallerIdentity, AppState};
use lambda_http::{http::Method, Body, Error, Request, RequestExt, Response};
use std::sync::Arc;

/// Name the function is invoked by
const FUNCTION_NAME: &str = "deleteUserAccount";

/// Main Lambda handler - serves the deleteUserAccount callable
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!("Account admin Lambda invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == Method::OPTIONS {
        return callable::preflight_response();
    }

    // Stage prefixes (e.g. /prod) are allowed in front of the function name
    if path.trim_end_matches('/').rsplit('/').next() != Some(FUNCTION_NAME) {
        return callable::not_found();
    }

    let data = match callable::parse_request(method, event.body()) {
        Ok(data) => data,
        Err(e) => return callable::error_response(&e),
    };

    let caller = caller_identity(&event, state.config.allow_user_id_header);

    match accounts::delete_user_account(&state, caller.as_ref(), &data).await {
        Ok(response) => callable::success_response(&response),
        Err(e) => callable::error_response(&e),
    }
}

/// Caller from the JWT claims validated by the API Gateway authorizer.
/// With `allow_header` set, an `X-User-Id` header takes precedence.
fn caller_identity(event: &Request, allow_header: bool) -> Option<CallerIdentity> {
    let from_header = allow_header
        .then(|| {
            event
                .headers()
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
        .flatten();

    from_header
        .or_else(|| {
            event
                .request_context_ref()
                .and_then(|ctx| ctx.authorizer())
                .and_then(|auth| auth.jwt.as_ref())
                .and_then(|jwt| jwt.claims.get("sub"))
                .map(|s| s.to_string())
        })
        .filter(|uid| !uid.trim().is_empty())
        .map(CallerIdentity::new)
}
