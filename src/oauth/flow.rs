use url::Url;

use crate::oauth::{config::OAuthClientConfig, errors::OAuthError, state::RedirectState};

/// Build the provider authorize URL for an authorization-code request
pub fn build_authorize_url(
    config: &OAuthClientConfig,
    redirect_uri: &str,
    state: &str,
) -> Result<Url, OAuthError> {
    if config.client_id.is_empty() {
        return Err(OAuthError::IncompleteConfig("client id"));
    }
    if config.authorize_url.is_empty() {
        return Err(OAuthError::IncompleteConfig("authorize URL"));
    }

    let mut url = Url::parse(&config.authorize_url)?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", &config.client_id);
        query.append_pair("response_type", "code");
        query.append_pair("redirect_uri", redirect_uri);
        if !config.scopes.is_empty() {
            query.append_pair("scope", &config.scopes.join(" "));
        }
        query.append_pair("state", state);
    }

    Ok(url)
}

/// Query parameters of the provider's redirect back to us
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => params.code = Some(value.into_owned()),
                "state" => params.state = Some(value.into_owned()),
                "error" => params.error = Some(value.into_owned()),
                "error_description" => params.error_description = Some(value.into_owned()),
                _ => {}
            }
        }

        params
    }

    pub fn from_url_str(url_str: &str) -> Result<Self, OAuthError> {
        let url = Url::parse(url_str)?;
        Ok(Self::from_url(&url))
    }

    /// Validate the callback and decode its state.
    ///
    /// A provider error, a missing parameter or an undecodable state rejects
    /// the callback.
    pub fn into_routed(self) -> Result<RoutedCallback, OAuthError> {
        if let Some(error) = self.error {
            return Err(OAuthError::AuthorizationDenied {
                error,
                description: self.error_description,
            });
        }

        let code = self
            .code
            .filter(|c| !c.is_empty())
            .ok_or(OAuthError::MissingCallbackParameter("code"))?;
        let state = self
            .state
            .filter(|s| !s.is_empty())
            .ok_or(OAuthError::MissingCallbackParameter("state"))?;

        Ok(RoutedCallback {
            code,
            state: RedirectState::decode(&state)?,
        })
    }
}

/// An authorization code together with the IDE instance and port it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedCallback {
    pub code: String,
    pub state: RedirectState,
}

impl RoutedCallback {
    /// URL of the local listener the code is forwarded to
    pub fn forward_url(&self) -> Result<Url, OAuthError> {
        let mut url = self.state.local_callback_url()?;
        url.query_pairs_mut()
            .append_pair("code", &self.code)
            .append_pair("ide", &self.state.ide);
        Ok(url)
    }
}
