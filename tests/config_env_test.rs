//! Environment-driven configuration.
//!
//! These mutate process environment variables, so they run serially.

use orgscout::cli::{resolve_config, CliOptions};
use orgscout::config::{ClientConfig, Credentials, API_URL_ENV, EMAIL_ENV, PASSWORD_ENV};
use serial_test::serial;

#[test]
#[serial]
fn test_api_url_from_env() {
    std::env::set_var(API_URL_ENV, "http://env-host:5000/");
    let config = ClientConfig::from_env();
    std::env::remove_var(API_URL_ENV);

    assert_eq!(config.api_base_url, "http://env-host:5000");
}

#[test]
#[serial]
fn test_flag_overrides_env() {
    std::env::set_var(API_URL_ENV, "http://env-host:5000");
    let options = CliOptions {
        api_url: Some("http://flag-host:7000".to_string()),
        no_links: false,
    };
    let config = resolve_config(&options);
    std::env::remove_var(API_URL_ENV);

    assert_eq!(config.api_base_url, "http://flag-host:7000");
    assert!(config.hyperlinks);
}

#[test]
#[serial]
fn test_default_without_env() {
    std::env::remove_var(API_URL_ENV);
    assert_eq!(
        resolve_config(&CliOptions::default()).api_base_url,
        "http://127.0.0.1:5000"
    );
}

#[test]
#[serial]
fn test_credentials_from_env() {
    std::env::set_var(EMAIL_ENV, "scout@example.com");
    std::env::set_var(PASSWORD_ENV, "pw");
    let creds = Credentials::from_env();
    std::env::remove_var(EMAIL_ENV);
    std::env::remove_var(PASSWORD_ENV);

    assert!(creds.is_complete());
    assert_eq!(creds.email, "scout@example.com");
}
