use sfgate::auth::{Parameters, CLIENT_ID, CLIENT_SECRET, PASSWORD, USERNAME};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/services/oauth2/token";
pub const LIMITS_PATH: &str = "/services/data/v62.0/limits";

pub fn password_parameters() -> Parameters {
    Parameters::from([
        (CLIENT_ID.to_string(), "id".to_string()),
        (CLIENT_SECRET.to_string(), "sec".to_string()),
        (USERNAME.to_string(), "u".to_string()),
        (PASSWORD.to_string(), "p".to_string()),
    ])
}

/// Mount a token endpoint that grants `access_token` on `instance_url`.
pub async fn mount_token_grant(server: &MockServer, access_token: &str, instance_url: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": access_token,
            "instance_url": instance_url,
            "token_type": "Bearer",
            "issued_at": "1700000000000"
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount an API endpoint that only answers requests carrying `OAuth <access_token>`.
pub async fn mount_limits(server: &MockServer, access_token: &str) {
    Mock::given(method("GET"))
        .and(path(LIMITS_PATH))
        .and(header("Authorization", format!("OAuth {access_token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "DailyApiRequests": { "Max": 15000, "Remaining": 14998 }
        })))
        .expect(1)
        .mount(server)
        .await;
}
