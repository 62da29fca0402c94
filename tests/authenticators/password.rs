use super::common::{mount_limits, mount_token_grant, password_parameters, LIMITS_PATH, TOKEN_PATH};
use sfgate::auth::{verify, Authenticator, ErrorKind, PasswordAuthenticator};
use sfgate::ClientOptions;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_password_login_then_call_instance() {
    let login = MockServer::start().await;
    let instance = MockServer::start().await;

    mount_token_grant(&login, "TOK", &instance.uri()).await;
    mount_limits(&instance, "TOK").await;

    let auth = PasswordAuthenticator::create("salesforce.com", ClientOptions::default())
        .with_login_endpoint(login.uri());

    let client = auth.authenticate(&password_parameters()).await.unwrap();
    assert_eq!(client.base_uri(), Some(instance.uri().as_str()));

    let limits: serde_json::Value = client.get_json(LIMITS_PATH).await.unwrap();
    assert_eq!(limits["DailyApiRequests"]["Max"], 15000);
}

#[tokio::test]
async fn test_password_authenticator_is_reusable() {
    let login = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "TOK",
            "instance_url": "https://na1.salesforce.com"
        })))
        .expect(2)
        .mount(&login)
        .await;

    let auth = PasswordAuthenticator::default().with_login_endpoint(login.uri());

    let first = auth.authenticate(&password_parameters()).await.unwrap();
    let second = auth.authenticate(&password_parameters()).await.unwrap();
    assert_eq!(first.authorization(), second.authorization());
    assert_eq!(auth.login_endpoint(), login.uri());
}

#[tokio::test]
async fn test_password_failure_context_serializes_without_secrets() {
    let login = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        })))
        .mount(&login)
        .await;

    let auth = PasswordAuthenticator::default().with_login_endpoint(login.uri());
    let err = auth.authenticate(&password_parameters()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Failed);
    assert_eq!(err.to_string(), "Authentication failed");

    let context = err.context.as_ref().unwrap();
    let json = serde_json::to_value(context).unwrap();
    assert_eq!(json["response"]["status"], 400);
    assert_eq!(json["parameters"]["client_id"], "id");
    assert_eq!(json["parameters"]["username"], "u");

    let secret = json["parameters"]["client_secret"].as_str().unwrap();
    let password = json["parameters"]["password"].as_str().unwrap();
    assert!(secret.starts_with("$argon2"));
    assert!(verify("sec", secret));
    assert!(verify("p", password));
}
