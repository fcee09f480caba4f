use std::time::Duration;

use multidml_shared::api::auth::{PasswordGrant, TokenResponse};
use multidml_shared::api::composite::CompositeRequest;
use multidml_shared::api::sobject::Record;
use multidml_shared::api::tree::TreeRequest;
use multidml_shared::constants::data_path;
use multidml_shared::error::DemoError;
use reqwest::Client;
use serde_json::Value;

use crate::config::SalesforceConfig;

/// Outbound operations the demo routes depend on.
///
/// Every method returns the platform's JSON response unmodified. Non-2xx
/// answers become `DemoError::Remote` carrying the parsed error body.
#[async_trait::async_trait]
pub trait CrmApi: Send + Sync {
    /// REST data path for the configured API version, e.g. `/services/data/v40.0`.
    fn data_path(&self) -> String;

    /// POST `{data_path}/sobjects/{sobject}`.
    async fn create(&self, sobject: &str, record: &Record) -> Result<Value, DemoError>;

    /// POST `/services/apexrest{path}`.
    async fn apex_post(&self, path: &str, body: &Value) -> Result<Value, DemoError>;

    /// POST `{data_path}/composite`.
    async fn composite(&self, request: &CompositeRequest) -> Result<Value, DemoError>;

    /// POST `{data_path}/composite/tree/{sobject}`.
    async fn tree(&self, sobject: &str, request: &TreeRequest) -> Result<Value, DemoError>;
}

/// Access token and instance URL obtained at startup.
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    pub instance_url: String,
    pub api_version: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("instance_url", &self.instance_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

/// Build the HTTP client used for both login and API calls.
pub fn http_client(config: &SalesforceConfig) -> Result<Client, DemoError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| DemoError::Internal(format!("failed to create HTTP client: {e}")))
}

fn transport_error(e: reqwest::Error) -> DemoError {
    if e.is_timeout() {
        DemoError::Transport("request timed out".into())
    } else if e.is_connect() {
        DemoError::Transport(format!("could not connect: {e}"))
    } else {
        DemoError::Transport(e.to_string())
    }
}

/// Log in with the OAuth2 username-password flow.
pub async fn authenticate(http: &Client, config: &SalesforceConfig) -> Result<Session, DemoError> {
    config.validate()?;

    let url = format!(
        "{}/services/oauth2/token",
        config.login_url.trim_end_matches('/')
    );
    let grant = PasswordGrant::new(
        &config.client_id,
        &config.client_secret,
        &config.username,
        &config.password,
        &config.security_token,
    );

    let resp = http
        .post(&url)
        .form(&grant)
        .send()
        .await
        .map_err(transport_error)?;
    let status = resp.status();
    let text = resp.text().await.map_err(transport_error)?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), username = %config.username, "login rejected");
        return Err(DemoError::auth(status.as_u16(), &text));
    }

    let token: TokenResponse = serde_json::from_str(&text).map_err(|e| DemoError::Auth {
        status: None,
        body: Value::String(format!("unreadable token response: {e}")),
    })?;
    tracing::info!(instance_url = %token.instance_url, "logged in");

    Ok(Session {
        access_token: token.access_token,
        instance_url: token.instance_url.trim_end_matches('/').to_string(),
        api_version: config.api_version.clone(),
    })
}

/// `CrmApi` over the platform's REST endpoints.
pub struct SalesforceClient {
    http: Client,
    session: Session,
}

impl SalesforceClient {
    pub fn new(http: Client, session: Session) -> Self {
        Self { http, session }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.session.instance_url)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, DemoError> {
        tracing::debug!(path, "POST");
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.session.access_token)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "request failed");
            return Err(DemoError::remote(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait::async_trait]
impl CrmApi for SalesforceClient {
    fn data_path(&self) -> String {
        data_path(&self.session.api_version)
    }

    async fn create(&self, sobject: &str, record: &Record) -> Result<Value, DemoError> {
        let path = format!("{}/sobjects/{sobject}", self.data_path());
        self.post_json(&path, record).await
    }

    async fn apex_post(&self, path: &str, body: &Value) -> Result<Value, DemoError> {
        let path = format!("/services/apexrest{path}");
        self.post_json(&path, body).await
    }

    async fn composite(&self, request: &CompositeRequest) -> Result<Value, DemoError> {
        request.validate()?;
        let path = format!("{}/composite", self.data_path());
        self.post_json(&path, request).await
    }

    async fn tree(&self, sobject: &str, request: &TreeRequest) -> Result<Value, DemoError> {
        request.validate(sobject)?;
        let path = format!("{}/composite/tree/{sobject}", self.data_path());
        self.post_json(&path, request).await
    }
}
