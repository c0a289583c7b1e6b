use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE},
        DecodePaddingMode,
    },
    Engine as _,
};
use serde::Serialize;
use url::Url;

use crate::oauth::errors::OAuthError;

/// Accepts state tokens with or without trailing `=` padding
const STATE_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Routing information carried through the OAuth `state` parameter
///
/// Serialized to JSON as:
/// ```json
/// { "ide": "4732f041-0cd5-499b-b302-09d8096f8535", "port": "4435" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectState {
    /// IDE instance identifier
    pub ide: String,
    /// Port of the local callback listener
    pub port: String,
}

impl RedirectState {
    pub fn new(ide: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            ide: ide.into(),
            port: port.into(),
        }
    }

    /// Encode as padded URL-safe base64 of the JSON object
    pub fn encode(&self) -> Result<String, OAuthError> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE.encode(json))
    }

    /// Decode a state token produced by [`RedirectState::encode`]
    pub fn decode(token: &str) -> Result<Self, OAuthError> {
        let bytes = STATE_DECODER.decode(token.trim())?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| OAuthError::InvalidStatePayload(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| OAuthError::InvalidStatePayload("not a JSON object".to_string()))?;

        let ide = string_field(object, "ide")?;
        let port = string_field(object, "port")?;
        if port.parse::<u16>().is_err() {
            return Err(OAuthError::InvalidStatePayload(format!(
                "'port' is not a port number: {}",
                port
            )));
        }

        Ok(Self { ide, port })
    }

    /// The local listener this state routes back to
    pub fn local_callback_url(&self) -> Result<Url, OAuthError> {
        let port = self.port.parse::<u16>().map_err(|_| {
            OAuthError::InvalidStatePayload(format!("'port' is not a port number: {}", self.port))
        })?;

        let mut url = Url::parse("http://localhost/")?;
        url.set_port(Some(port))
            .map_err(|_| OAuthError::InvalidStatePayload("cannot set port".to_string()))?;
        Ok(url)
    }
}

fn string_field(
    object: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<String, OAuthError> {
    object
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| OAuthError::InvalidStatePayload(format!("missing string '{}'", key)))
}

/// Extract the segment following the `ide` path component.
///
/// Accepts a bare path (`/environments/<env>/ide/<id>/`) or a full URL.
pub fn ide_instance_id(ide_resource_path: &str) -> Result<String, OAuthError> {
    let path = match Url::parse(ide_resource_path) {
        Ok(url) => url.path().to_string(),
        Err(_) => ide_resource_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let mut segments = path.split('/');
    while let Some(segment) = segments.next() {
        if segment == "ide" {
            return segments
                .next()
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .ok_or_else(|| OAuthError::MissingIdeSegment(ide_resource_path.to_string()));
        }
    }

    Err(OAuthError::MissingIdeSegment(ide_resource_path.to_string()))
}

/// Extract the explicit port of a local callback URL such as `http://localhost:4435`
///
/// A port equal to the scheme default (`http://localhost:80`) still counts as
/// explicit; only a URL without any `:<port>` fails.
pub fn callback_port(local_callback_url: &str) -> Result<String, OAuthError> {
    let url = Url::parse(local_callback_url)?;
    let port = match url.port() {
        Some(port) => Some(port),
        // url normalizes away a port equal to the scheme default
        None if has_explicit_port(local_callback_url) => url.port_or_known_default(),
        None => None,
    };

    port.map(|port| port.to_string())
        .ok_or_else(|| OAuthError::MissingPort(local_callback_url.to_string()))
}

/// Whether the authority of a raw URL string carries `:<digits>`
fn has_explicit_port(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once("://") else {
        return false;
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    // skip over a bracketed IPv6 literal
    let after_host = match host_port.rfind(']') {
        Some(end) => &host_port[end + 1..],
        None => host_port,
    };

    after_host
        .rsplit_once(':')
        .map(|(_, port)| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Build the opaque `state` value for an IDE resource path and local callback URL
pub fn encode_state(
    ide_resource_path: &str,
    local_callback_url: &str,
) -> Result<String, OAuthError> {
    let state = RedirectState::new(
        ide_instance_id(ide_resource_path)?,
        callback_port(local_callback_url)?,
    );
    state.encode()
}

/// Recover the IDE instance id and local port from a `state` value
pub fn decode_state(token: &str) -> Result<RedirectState, OAuthError> {
    RedirectState::decode(token)
}
