use lambda_http::{run, service_fn, Error, Request};
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_dynamodb::Client as DynamoClient;
use account_admin_shared::config::Config;
use account_admin_shared::identity::CognitoIdentityProvider;
use account_admin_shared::profiles::DynamoProfileStore;
use account_admin_shared::AppState;
use std::sync::Arc;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let config = Config::from_env()?;
    if config.allow_user_id_header {
        tracing::warn!("X-User-Id header override is enabled; do not use in production");
    }

    // Initialize AWS clients once at startup
    let aws_config = aws_config::load_from_env().await;

    let state = AppState::new(
        Arc::new(CognitoIdentityProvider::new(
            CognitoClient::new(&aws_config),
            config.user_pool_id.clone(),
        )),
        Arc::new(DynamoProfileStore::new(
            DynamoClient::new(&aws_config),
            config.table_name.clone(),
        )),
        config,
    );

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
