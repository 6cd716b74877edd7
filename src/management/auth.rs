use chrono::Utc;
use reqwest::Client;

use crate::{
    Error, Res,
    config::Credentials,
    types::{Token, TokenResponse},
};

/// Seconds before expiry at which the access token is refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the access token for one run and refreshes it when it runs out.
///
/// Nothing is written to disk: every run starts from the refresh token in the
/// credentials and keeps a rotated refresh token in memory only.
pub struct TokenManager {
    credentials: Credentials,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(credentials: Credentials) -> Self {
        TokenManager {
            credentials,
            token: None,
        }
    }

    pub async fn get_valid_token(&mut self, http: &Client) -> Res<String> {
        let needs_refresh = match &self.token {
            Some(token) => Self::is_expired(token),
            None => true,
        };

        if needs_refresh {
            let refresh_token = match &self.token {
                Some(token) => token.refresh_token.clone(),
                None => self.credentials.refresh_token.clone(),
            };
            self.token = Some(self.refresh_token(http, &refresh_token).await?);
        }

        self.token
            .as_ref()
            .map(|token| token.access_token.clone())
            .ok_or_else(|| Error::Provider("no access token available".to_string()))
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
    }

    async fn refresh_token(&self, http: &Client, refresh_token: &str) -> Res<Token> {
        let res = http
            .post(&self.credentials.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "token refresh failed with {status}: {body}"
            )));
        }

        let json: TokenResponse = res.json().await?;

        Ok(Token {
            access_token: json.access_token,
            refresh_token: json
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            scope: json.scope,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}
