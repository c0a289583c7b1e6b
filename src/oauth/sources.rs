use std::collections::HashMap;

use crate::oauth::errors::OAuthError;

/// Credential-config keys read from the section named after the base URL
pub const KEY_CLIENT_ID: &str = "oauthClientId";
pub const KEY_CLIENT_SECRET: &str = "oauthClientSecret";
pub const KEY_SCOPES: &str = "oauthScopes";
pub const KEY_AUTH_URL: &str = "oauthAuthUrl";
pub const KEY_TOKEN_URL: &str = "oauthTokenUrl";

/// Environment override suffixes, appended to `GC_OAUTH_<HOST>_`
pub const ENV_AUTH_URL: &str = "AUTH_URL";
pub const ENV_TOKEN_URL: &str = "TOKEN_URL";
pub const ENV_CLIENT_ID: &str = "CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_SCOPES: &str = "SCOPES";

/// Trait for section/key credential configuration lookups
pub trait CredentialConfigSource: Send + Sync {
    /// Look up `key` in `section`. A missing entry is `Ok(None)`.
    fn get(&self, section: &str, key: &str) -> Result<Option<String>, OAuthError>;
}

/// Trait for environment variable lookups
pub trait EnvironmentScope: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl EnvironmentScope for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvironmentScope for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// In-memory credential configuration keyed by (section, key)
#[derive(Debug, Default, Clone)]
pub struct MapCredentialConfig {
    entries: HashMap<(String, String), String>,
}

impl MapCredentialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(
        mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(section, key, value);
        self
    }

    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries.insert((section.into(), key.into()), value.into());
    }
}

impl CredentialConfigSource for MapCredentialConfig {
    fn get(&self, section: &str, key: &str) -> Result<Option<String>, OAuthError> {
        Ok(self
            .entries
            .get(&(section.to_string(), key.to_string()))
            .cloned())
    }
}
