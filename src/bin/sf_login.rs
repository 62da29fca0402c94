//! Log in to Salesforce and print the instance URL of the new session.
//!
//! Credentials come from the environment (`SF_CLIENT_ID`, `SF_CLIENT_SECRET`,
//! `SF_USERNAME`, `SF_PASSWORD`, `SF_ACCESS_TOKEN`, `SF_REFRESH_TOKEN`, or
//! their `SALESFORCE_*` aliases).
//!
//! ```sh
//! export SF_CLIENT_ID=... SF_CLIENT_SECRET=... SF_USERNAME=... SF_PASSWORD=...
//! cargo run --bin sf-login -- password
//!
//! # Sandbox
//! SF_LOGIN_URL=https://test.salesforce.com cargo run --bin sf-login
//!
//! # Refresh an OAuth session
//! SF_REFRESH_TOKEN=... cargo run --bin sf-login -- oauth
//! ```
//!
//! On failure the obfuscated diagnostic context is printed as JSON.

use sfgate_auth::{
    parameters_from_env, AuthStrategy, Authenticator, ClientOptions, Error, HttpClient,
    OAuthAuthenticator, Parameters, PasswordAuthenticator, StrategyKind, ACCESS_TOKEN, CLIENT_ID,
    CLIENT_SECRET, DEFAULT_INSTANCE_NAME, REFRESH_TOKEN,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let kind: StrategyKind = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Usage: sf-login [password|oauth]");
            std::process::exit(2);
        }),
        None => StrategyKind::default(),
    };

    let instance_name = std::env::var("SF_INSTANCE_NAME")
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_INSTANCE_NAME.to_string());
    let login_url = std::env::var("SF_LOGIN_URL")
        .ok()
        .filter(|url| !url.is_empty());

    let parameters = parameters_from_env();
    let strategy = build_strategy(kind, &instance_name, login_url, &parameters);

    match login(&strategy, &parameters).await {
        Ok(client) => {
            println!("Authenticated ({kind})");
            println!("  Instance URL: {}", client.base_uri().unwrap_or_default());
        }
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn build_strategy(
    kind: StrategyKind,
    instance_name: &str,
    login_url: Option<String>,
    parameters: &Parameters,
) -> AuthStrategy {
    match kind {
        StrategyKind::Password => {
            let auth = PasswordAuthenticator::create(instance_name, ClientOptions::default());
            match login_url {
                Some(url) => auth.with_login_endpoint(url).into(),
                None => auth.into(),
            }
        }
        StrategyKind::OAuth => {
            let mut options = ClientOptions::default();
            options.base_uri = login_url;
            let auth = OAuthAuthenticator::create(instance_name, options);
            match parameters.get(CLIENT_ID) {
                Some(client_id) => auth
                    .with_client_credentials(
                        client_id.as_str(),
                        parameters.get(CLIENT_SECRET).cloned().unwrap_or_default(),
                    )
                    .into(),
                None => auth.into(),
            }
        }
    }
}

/// OAuth without an access token falls back to the refresh grant.
///
/// Tokens the chosen grant does not read are not passed on.
async fn login(strategy: &AuthStrategy, parameters: &Parameters) -> Result<HttpClient, Error> {
    let mut parameters = parameters.clone();
    let refresh_token = parameters.remove(REFRESH_TOKEN);

    match strategy.kind() {
        StrategyKind::OAuth if !parameters.contains_key(ACCESS_TOKEN) => {
            if let Some(refresh_token) = refresh_token {
                return strategy.refresh(&refresh_token).await;
            }
        }
        StrategyKind::Password => {
            parameters.remove(ACCESS_TOKEN);
        }
        StrategyKind::OAuth => {}
    }
    strategy.authenticate(&parameters).await
}

fn report(e: &Error) {
    eprintln!("Error: {e}");
    if let Some(context) = &e.context {
        match serde_json::to_string_pretty(context) {
            Ok(json) => eprintln!("{json}"),
            Err(err) => eprintln!("(context could not be serialized: {err})"),
        }
    }
}
