use crate::oauth::{
    config::{join_endpoint, OAuthClientConfig, ProviderDefaults},
    errors::OAuthError,
    host::HostIdentity,
    sources::{
        CredentialConfigSource, EnvironmentScope, ENV_AUTH_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET,
        ENV_SCOPES, ENV_TOKEN_URL, KEY_AUTH_URL, KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_SCOPES,
        KEY_TOKEN_URL,
    },
};

/// Which field of the client configuration a value lands in
#[derive(Debug, Clone, Copy)]
enum Field {
    ClientId,
    ClientSecret,
    Scopes,
    AuthorizeUrl,
    TokenUrl,
}

/// Write one non-empty value into the draft configuration.
///
/// Scopes are stored as a single raw element and never split on whitespace.
fn apply_field(base_url: &str, config: &mut OAuthClientConfig, field: Field, value: String) {
    match field {
        Field::ClientId => config.client_id = value,
        Field::ClientSecret => config.client_secret = value,
        Field::Scopes => config.scopes = vec![value],
        Field::AuthorizeUrl => config.authorize_url = join_endpoint(base_url, &value),
        Field::TokenUrl => config.token_url = join_endpoint(base_url, &value),
    }
}

const CREDENTIAL_KEYS: [(&str, Field); 5] = [
    (KEY_CLIENT_ID, Field::ClientId),
    (KEY_CLIENT_SECRET, Field::ClientSecret),
    (KEY_SCOPES, Field::Scopes),
    (KEY_AUTH_URL, Field::AuthorizeUrl),
    (KEY_TOKEN_URL, Field::TokenUrl),
];

const ENV_SUFFIXES: [(&str, Field); 5] = [
    (ENV_AUTH_URL, Field::AuthorizeUrl),
    (ENV_TOKEN_URL, Field::TokenUrl),
    (ENV_CLIENT_ID, Field::ClientId),
    (ENV_CLIENT_SECRET, Field::ClientSecret),
    (ENV_SCOPES, Field::Scopes),
];

/// Fill endpoints and scopes from the compiled-in table for well-known hosts
pub fn apply_provider_defaults(
    base_url: &str,
    config: &mut OAuthClientConfig,
) -> Result<(), OAuthError> {
    let identity = HostIdentity::derive(base_url)?;
    let Some(defaults) = ProviderDefaults::for_host(identity.host_label()) else {
        log::debug!("No compiled-in OAuth defaults for {}", base_url);
        return Ok(());
    };

    config.authorize_url = join_endpoint(base_url, defaults.auth_path);
    config.token_url = join_endpoint(base_url, defaults.token_path);
    config.scopes = defaults.scopes();
    log::debug!("Applied compiled-in OAuth defaults for {}", base_url);
    Ok(())
}

/// Overlay the credential-config section named after `base_url`
pub fn apply_credential_config(
    base_url: &str,
    config: &mut OAuthClientConfig,
    source: &dyn CredentialConfigSource,
) -> Result<(), OAuthError> {
    let identity = HostIdentity::derive(base_url)?;

    for (key, field) in CREDENTIAL_KEYS {
        if let Some(value) = source
            .get(identity.section(), key)?
            .filter(|v| !v.is_empty())
        {
            log::debug!("{:?} taken from credential config {}.{}", field, identity.section(), key);
            apply_field(base_url, config, field, value);
        }
    }

    Ok(())
}

/// Overlay `GC_OAUTH_<HOST>_*` environment variables
pub fn apply_environment(
    base_url: &str,
    config: &mut OAuthClientConfig,
    env: &dyn EnvironmentScope,
) -> Result<(), OAuthError> {
    let identity = HostIdentity::derive(base_url)?;

    for (suffix, field) in ENV_SUFFIXES {
        let name = identity.env_var(suffix);
        if let Some(value) = env.var(&name).filter(|v| !v.is_empty()) {
            log::debug!("{:?} taken from environment variable {}", field, name);
            apply_field(base_url, config, field, value);
        }
    }

    Ok(())
}

/// Resolves OAuth client configuration for a hosting provider from layered sources
///
/// Layers, lowest precedence first: compiled-in provider defaults, credential
/// config, environment variables. Each layer only overwrites the fields it
/// has a non-empty value for.
pub struct ConfigResolver {
    credentials: Box<dyn CredentialConfigSource>,
    use_defaults: bool,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("credentials", &"<credentials>")
            .field("use_defaults", &self.use_defaults)
            .finish()
    }
}

impl ConfigResolver {
    /// Create a resolver over the given credential-config source
    pub fn new(credentials: Box<dyn CredentialConfigSource>) -> Self {
        Self {
            credentials,
            use_defaults: true,
        }
    }

    /// Create a resolver that skips the compiled-in provider defaults
    pub fn without_defaults(credentials: Box<dyn CredentialConfigSource>) -> Self {
        Self {
            credentials,
            use_defaults: false,
        }
    }

    /// Resolve the client configuration for `base_url`
    ///
    /// Endpoint values are path suffixes appended to `base_url`. One trailing
    /// `/` on `base_url` is dropped before a suffix that starts with `/`, so
    /// `https://gitlab.com/` and `https://gitlab.com` both resolve
    /// `/oauth/token` to `https://gitlab.com/oauth/token`. A value that is
    /// already an absolute `http(s)` URL is used unchanged.
    pub fn resolve(
        &self,
        base_url: &str,
        env: &dyn EnvironmentScope,
    ) -> Result<OAuthClientConfig, OAuthError> {
        let mut config = OAuthClientConfig::default();

        if self.use_defaults {
            apply_provider_defaults(base_url, &mut config)?;
        }
        apply_credential_config(base_url, &mut config, self.credentials.as_ref())?;
        apply_environment(base_url, &mut config, env)?;

        Ok(config)
    }
}
