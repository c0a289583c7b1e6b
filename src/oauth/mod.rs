//! OAuth 2.0 client configuration and redirect state for git hosting providers
//!
//! Resolves the client parameters (id, secret, scopes, endpoints) for a
//! provider base URL from compiled-in defaults, git credential config and
//! `GC_OAUTH_<HOST>_*` environment variables, and encodes the `state`
//! parameter that routes the authorization code back to a local IDE listener.
//!
//! # Examples
//!
//! ```no_run
//! use gc_oauth::oauth::{
//!     build_authorize_url, encode_state, ConfigResolver, GitConfigScope, GitConfigSource,
//!     ProcessEnvironment,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let git = GitConfigSource::new(".", GitConfigScope::Any);
//!     let resolver = ConfigResolver::new(Box::new(git));
//!     let config = resolver.resolve("https://gitlab.com", &ProcessEnvironment)?;
//!
//!     let state = encode_state("/environments/dev/ide/1234/", "http://localhost:4435")?;
//!     let url = build_authorize_url(&config, "https://example.com/oauth/callback", &state)?;
//!     println!("Visit: {}", url);
//!
//!     Ok(())
//! }
//! ```

// Internal modules
mod config;
mod errors;
mod flow;
mod git_config;
mod host;
mod resolver;
mod sources;
mod state;

// Public re-exports
pub use config::{join_endpoint, OAuthClientConfig, ProviderDefaults};
pub use errors::OAuthError;
pub use flow::{build_authorize_url, CallbackParams, RoutedCallback};
pub use git_config::{GitConfigScope, GitConfigSource};
pub use host::{HostIdentity, ENV_PREFIX};
pub use resolver::{
    apply_credential_config, apply_environment, apply_provider_defaults, ConfigResolver,
};
pub use sources::{
    CredentialConfigSource, EnvironmentScope, MapCredentialConfig, MapEnvironment,
    ProcessEnvironment, ENV_AUTH_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_SCOPES, ENV_TOKEN_URL,
    KEY_AUTH_URL, KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_SCOPES, KEY_TOKEN_URL,
};
pub use state::{callback_port, decode_state, encode_state, ide_instance_id, RedirectState};
