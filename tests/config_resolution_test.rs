use gc_oauth::oauth::{
    ConfigResolver, MapCredentialConfig, MapEnvironment, OAuthClientConfig, KEY_AUTH_URL,
    KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_SCOPES, KEY_TOKEN_URL,
};
use rstest::*;

const CLIENT_ID: &str = "clientId";
const CLIENT_SECRET: &str = "clientSecret";
const SCOPES_INPUT: &str = "scope1 scope2";
const AUTH_URL: &str = "/oauth/authorize";
const TOKEN_URL: &str = "/oauth/token";

fn credential_section(base_url: &str) -> MapCredentialConfig {
    MapCredentialConfig::new()
        .with_entry(base_url, KEY_CLIENT_ID, CLIENT_ID)
        .with_entry(base_url, KEY_CLIENT_SECRET, CLIENT_SECRET)
        .with_entry(base_url, KEY_SCOPES, SCOPES_INPUT)
        .with_entry(base_url, KEY_AUTH_URL, AUTH_URL)
        .with_entry(base_url, KEY_TOKEN_URL, TOKEN_URL)
}

fn environment(prefix: &str) -> MapEnvironment {
    MapEnvironment::new()
        .with_var(format!("{}AUTH_URL", prefix), AUTH_URL)
        .with_var(format!("{}TOKEN_URL", prefix), TOKEN_URL)
        .with_var(format!("{}CLIENT_ID", prefix), CLIENT_ID)
        .with_var(format!("{}CLIENT_SECRET", prefix), CLIENT_SECRET)
        .with_var(format!("{}SCOPES", prefix), SCOPES_INPUT)
}

fn assert_resolved(config: &OAuthClientConfig, base_url: &str) {
    assert_eq!(config.client_id, CLIENT_ID);
    assert_eq!(config.client_secret, CLIENT_SECRET);
    assert_eq!(config.authorize_url, format!("{}{}", base_url, AUTH_URL));
    assert_eq!(config.token_url, format!("{}{}", base_url, TOKEN_URL));
    assert_eq!(config.scopes, vec![SCOPES_INPUT.to_string()]);
}

/// Test fixture that provides a resolver with nothing configured
#[fixture]
fn empty_resolver() -> ConfigResolver {
    ConfigResolver::new(Box::new(MapCredentialConfig::new()))
}

#[rstest]
fn test_resolve_from_credential_config() {
    let resolver = ConfigResolver::new(Box::new(credential_section("https://gitlab.com")));
    let config = resolver
        .resolve("https://gitlab.com", &MapEnvironment::new())
        .unwrap();

    assert_resolved(&config, "https://gitlab.com");
}

#[rstest]
fn test_resolve_from_environment(empty_resolver: ConfigResolver) {
    let config = empty_resolver
        .resolve("https://gitlab.com", &environment("GC_OAUTH_GITLAB_"))
        .unwrap();

    assert_resolved(&config, "https://gitlab.com");
}

#[rstest]
#[case("https://gitlab.com", "GC_OAUTH_GITLAB_")]
#[case("https://github.com", "GC_OAUTH_GITHUB_")]
#[case("https://bitbucket.org", "GC_OAUTH_BITBUCKET_")]
#[case("https://forge.example.com", "GC_OAUTH_FORGE_")]
#[case("http://localhost:8929", "GC_OAUTH_LOCALHOST_")]
fn test_each_layer_alone_resolves_identically(#[case] base_url: &str, #[case] prefix: &str) {
    let from_git = ConfigResolver::new(Box::new(credential_section(base_url)))
        .resolve(base_url, &MapEnvironment::new())
        .unwrap();
    let from_env = ConfigResolver::new(Box::new(MapCredentialConfig::new()))
        .resolve(base_url, &environment(prefix))
        .unwrap();

    assert_resolved(&from_git, base_url);
    assert_resolved(&from_env, base_url);
    assert_eq!(from_git, from_env);
}

#[rstest]
fn test_environment_overrides_credential_config_per_field() {
    let resolver = ConfigResolver::new(Box::new(credential_section("https://gitlab.com")));
    let env = MapEnvironment::new()
        .with_var("GC_OAUTH_GITLAB_CLIENT_ID", "envClientId")
        .with_var("GC_OAUTH_GITLAB_TOKEN_URL", "/api/oauth/token");

    let config = resolver.resolve("https://gitlab.com", &env).unwrap();

    assert_eq!(config.client_id, "envClientId");
    assert_eq!(config.token_url, "https://gitlab.com/api/oauth/token");
    // Untouched fields keep the credential config values
    assert_eq!(config.client_secret, CLIENT_SECRET);
    assert_eq!(config.authorize_url, "https://gitlab.com/oauth/authorize");
    assert_eq!(config.scopes, vec![SCOPES_INPUT.to_string()]);
}

#[rstest]
fn test_credential_config_overrides_defaults_per_field() {
    let source =
        MapCredentialConfig::new().with_entry("https://gitlab.com", KEY_CLIENT_ID, "only-id");
    let resolver = ConfigResolver::new(Box::new(source));

    let config = resolver
        .resolve("https://gitlab.com", &MapEnvironment::new())
        .unwrap();

    assert_eq!(config.client_id, "only-id");
    assert!(config.client_secret.is_empty());
    assert_eq!(config.authorize_url, "https://gitlab.com/oauth/authorize");
    assert_eq!(config.token_url, "https://gitlab.com/oauth/token");
}

#[rstest]
fn test_trailing_slash_on_base_url_is_not_doubled() {
    let base_url = "https://gitlab.com/";
    let resolver = ConfigResolver::without_defaults(Box::new(credential_section(base_url)));

    let config = resolver.resolve(base_url, &MapEnvironment::new()).unwrap();

    assert_eq!(config.authorize_url, "https://gitlab.com/oauth/authorize");
    assert_eq!(config.token_url, "https://gitlab.com/oauth/token");
}

#[rstest]
fn test_absolute_endpoint_is_kept(empty_resolver: ConfigResolver) {
    let env = MapEnvironment::new()
        .with_var("GC_OAUTH_GITLAB_AUTH_URL", "https://sso.example.com/authorize");

    let config = empty_resolver.resolve("https://gitlab.com", &env).unwrap();

    assert_eq!(config.authorize_url, "https://sso.example.com/authorize");
    assert_eq!(config.token_url, "https://gitlab.com/oauth/token");
}

#[rstest]
fn test_section_is_exact_base_url() {
    let resolver =
        ConfigResolver::without_defaults(Box::new(credential_section("https://gitlab.com")));

    let config = resolver
        .resolve("https://gitlab.example.com", &MapEnvironment::new())
        .unwrap();

    assert_eq!(config, OAuthClientConfig::default());
}

#[rstest]
fn test_other_hosts_environment_is_ignored(empty_resolver: ConfigResolver) {
    let config = empty_resolver
        .resolve("https://forge.example.com", &environment("GC_OAUTH_GITLAB_"))
        .unwrap();

    assert!(config.client_id.is_empty());
    assert!(config.authorize_url.is_empty());
}
