use serde::Deserialize;

use crate::config::GoogleSettings;
use crate::errors::ApiError;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Token pair returned by the provider's code exchange
#[derive(Debug, Deserialize)]
pub struct GoogleTokens {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Profile fields returned by the provider's userinfo endpoint
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Authorization-code exchange and profile fetch against Google.
///
/// Both calls are single-shot: a provider failure propagates immediately as
/// a BadRequest carrying the provider's response body, never retried.
pub struct GoogleOAuthService {
    client: reqwest::Client,
    settings: GoogleSettings,
}

impl GoogleOAuthService {
    pub fn new(settings: GoogleSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// Build the provider consent URL for the /auth/google redirect
    pub fn authorize_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .finish();

        format!("{}?{}", AUTH_ENDPOINT, query)
    }

    /// Exchange an authorization code for provider tokens
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokens, ApiError> {
        let params = [
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| ApiError::bad_request(format!("token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::bad_request(body));
        }

        response
            .json::<GoogleTokens>()
            .await
            .map_err(|e| ApiError::bad_request(format!("malformed token response: {}", e)))
    }

    /// Fetch the user's profile with the access token from the exchange
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleUserInfo, ApiError> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::bad_request(format!("profile fetch failed: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::bad_request(body));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| ApiError::bad_request(format!("malformed profile response: {}", e)))
    }
}
