//! Credential parameters passed to authenticators.

use std::collections::BTreeMap;

/// Map of credential parameter name to value.
///
/// Ordered so form bodies and diagnostic snapshots are deterministic.
pub type Parameters = BTreeMap<String, String>;

/// Connected app consumer key.
pub const CLIENT_ID: &str = "client_id";
/// Connected app consumer secret.
pub const CLIENT_SECRET: &str = "client_secret";
/// Salesforce username.
pub const USERNAME: &str = "username";
/// Salesforce password (with security token appended when required).
pub const PASSWORD: &str = "password";
/// OAuth refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";
/// OAuth access token.
pub const ACCESS_TOKEN: &str = "access_token";
/// OAuth grant type.
pub const GRANT_TYPE: &str = "grant_type";

const ENV_VARS: &[(&str, &str, &str)] = &[
    (CLIENT_ID, "SF_CLIENT_ID", "SALESFORCE_CLIENT_ID"),
    (
        CLIENT_SECRET,
        "SF_CLIENT_SECRET",
        "SALESFORCE_CLIENT_SECRET",
    ),
    (USERNAME, "SF_USERNAME", "SALESFORCE_USERNAME"),
    (PASSWORD, "SF_PASSWORD", "SALESFORCE_PASSWORD"),
    (
        REFRESH_TOKEN,
        "SF_REFRESH_TOKEN",
        "SALESFORCE_REFRESH_TOKEN",
    ),
    (ACCESS_TOKEN, "SF_ACCESS_TOKEN", "SALESFORCE_ACCESS_TOKEN"),
];

/// Load credential parameters from environment variables.
///
/// Each parameter is read from `SF_<NAME>`, falling back to
/// `SALESFORCE_<NAME>` when the former is unset or empty. Parameters with
/// no non-empty value are skipped:
/// - `SF_CLIENT_ID`, `SF_CLIENT_SECRET`
/// - `SF_USERNAME`, `SF_PASSWORD`
/// - `SF_REFRESH_TOKEN`, `SF_ACCESS_TOKEN`
pub fn parameters_from_env() -> Parameters {
    parameters_from_lookup(|name| std::env::var(name).ok())
}

fn parameters_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Parameters {
    ENV_VARS
        .iter()
        .filter_map(|(key, primary, alias)| {
            lookup(primary)
                .filter(|value| !value.is_empty())
                .or_else(|| lookup(alias).filter(|value| !value.is_empty()))
                .map(|value| (key.to_string(), value))
        })
        .collect()
}

/// Non-empty value of a parameter.
pub(crate) fn non_empty<'a>(parameters: &'a Parameters, key: &str) -> Option<&'a str> {
    parameters
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
