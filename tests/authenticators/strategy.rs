use super::common::{mount_token_grant, password_parameters};
use sfgate::auth::{Authenticator, Parameters, StrategyKind, ACCESS_TOKEN};
use sfgate::{AuthStrategy, ClientOptions, PasswordAuthenticator};
use wiremock::MockServer;

#[tokio::test]
async fn test_strategy_selected_by_name() {
    let kind: StrategyKind = "oauth".parse().unwrap();
    let strategy = AuthStrategy::from_kind(kind, "salesforce.com", ClientOptions::default());

    let parameters = Parameters::from([(ACCESS_TOKEN.to_string(), "ABC".to_string())]);
    let client = strategy.authenticate(&parameters).await.unwrap();
    assert_eq!(client.authorization(), Some("OAuth ABC"));
}

#[tokio::test]
async fn test_strategy_wraps_configured_password_authenticator() {
    let login = MockServer::start().await;
    mount_token_grant(&login, "TOK", "https://na1.salesforce.com").await;

    let strategy: AuthStrategy = PasswordAuthenticator::default()
        .with_login_endpoint(login.uri())
        .into();
    assert_eq!(strategy.kind(), StrategyKind::Password);

    let client = strategy.authenticate(&password_parameters()).await.unwrap();
    assert_eq!(client.base_uri(), Some("https://na1.salesforce.com"));
    assert_eq!(client.authorization(), Some("OAuth TOK"));
}

/// Generic callers only need the trait.
async fn login_with<A: Authenticator>(auth: &A, parameters: &Parameters) -> Option<String> {
    auth.authenticate(parameters)
        .await
        .ok()
        .and_then(|client| client.authorization().map(str::to_string))
}

#[tokio::test]
async fn test_authenticators_are_interchangeable() {
    let parameters = Parameters::from([(ACCESS_TOKEN.to_string(), "ABC".to_string())]);

    let oauth = sfgate::OAuthAuthenticator::default();
    assert_eq!(
        login_with(&oauth, &parameters).await.as_deref(),
        Some("OAuth ABC")
    );

    let strategy =
        <AuthStrategy as Authenticator>::create("salesforce.com", ClientOptions::default());
    assert_eq!(strategy.kind(), StrategyKind::Password);
}
