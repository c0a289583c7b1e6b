pub mod oauth;

pub use oauth::{
    decode_state, encode_state, ConfigResolver, OAuthClientConfig, OAuthError, RedirectState,
};
