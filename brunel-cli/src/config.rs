//! Configuration module
//!
//! Handles CLI configuration including server URL and auth token.

use brunel_client::BrunelClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Brunel server
    pub server_url: String,
    /// Bearer token, if the server requires authentication
    pub token: Option<String>,
}

impl Config {
    /// Builds an API client from this configuration
    pub fn client(&self) -> BrunelClient {
        let client = BrunelClient::new(&self.server_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }
}
