use serde::{Deserialize, Serialize};

/// OAuth2 username-password grant, sent form-encoded to the token endpoint.
#[derive(Clone, Serialize)]
pub struct PasswordGrant {
    pub grant_type: &'static str,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    /// Account password with the security token appended.
    pub password: String,
}

impl PasswordGrant {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: &str,
        security_token: &str,
    ) -> Self {
        Self {
            grant_type: "password",
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: format!("{password}{security_token}"),
        }
    }
}

impl std::fmt::Debug for PasswordGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGrant")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Token endpoint response.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub instance_url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}
