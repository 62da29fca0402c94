use super::common::{mount_limits, mount_token_grant, LIMITS_PATH};
use sfgate::auth::{
    Authenticator, ErrorKind, OAuthAuthenticator, Parameters, ACCESS_TOKEN,
    DEFAULT_INSTANCE_ENDPOINT,
};
use sfgate::ClientOptions;
use wiremock::MockServer;

#[tokio::test]
async fn test_oauth_wraps_existing_token() {
    let instance = MockServer::start().await;
    mount_limits(&instance, "ABC").await;

    let options = ClientOptions::builder()
        .with_base_uri(instance.uri())
        .build();
    let auth = OAuthAuthenticator::create("salesforce.com", options);

    let parameters = Parameters::from([(ACCESS_TOKEN.to_string(), "ABC".to_string())]);
    let client = auth.authenticate(&parameters).await.unwrap();

    let limits: serde_json::Value = client.get_json(LIMITS_PATH).await.unwrap();
    assert_eq!(limits["DailyApiRequests"]["Remaining"], 14998);
}

#[tokio::test]
async fn test_oauth_default_endpoint() {
    let auth = OAuthAuthenticator::default();
    let parameters = Parameters::from([(ACCESS_TOKEN.to_string(), "ABC".to_string())]);

    let client = auth.authenticate(&parameters).await.unwrap();
    assert_eq!(client.base_uri(), Some(DEFAULT_INSTANCE_ENDPOINT));
    assert_eq!(client.authorization(), Some("OAuth ABC"));
}

#[tokio::test]
async fn test_oauth_refresh_then_call_instance() {
    let login = MockServer::start().await;
    let instance = MockServer::start().await;

    mount_token_grant(&login, "FRESH", &instance.uri()).await;
    mount_limits(&instance, "FRESH").await;

    let options = ClientOptions::builder()
        .with_base_uri(login.uri())
        .build();
    let auth =
        OAuthAuthenticator::create("salesforce.com", options).with_client_credentials("id", "sec");

    let client = auth.refresh("RT").await.unwrap();
    assert_eq!(client.base_uri(), Some(instance.uri().as_str()));

    let limits: serde_json::Value = client.get_json(LIMITS_PATH).await.unwrap();
    assert_eq!(limits["DailyApiRequests"]["Max"], 15000);
}

#[tokio::test]
async fn test_oauth_missing_token_is_authentication_failure() {
    let auth = OAuthAuthenticator::default();

    let err = auth.authenticate(&Parameters::new()).await.unwrap_err();
    assert!(err.is_authentication_failure());
    assert_eq!(err.kind, ErrorKind::Failed);
    assert!(err.parameters().unwrap().is_empty());
}
