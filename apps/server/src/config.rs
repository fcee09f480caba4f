use multidml_shared::constants::{DEFAULT_API_VERSION, DEFAULT_LOGIN_URL};
use multidml_shared::error::DemoError;
use serde::Deserialize;

/// Server configuration loaded from an optional config.toml with env var overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to. Default: "0.0.0.0"
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on. Default: 8080
    #[serde(default = "default_port")]
    pub port: u16,
    /// Tracing log level. Default: "info"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory served under `/public`. Default: this crate's `public/`
    /// directory, independent of the working directory.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub salesforce: SalesforceConfig,
}

/// Connected-app credentials and API settings for the Salesforce org.
#[derive(Clone, Deserialize)]
pub struct SalesforceConfig {
    /// OAuth host. Default: "https://login.salesforce.com"
    #[serde(default = "default_login_url")]
    pub login_url: String,
    /// Connected-app consumer key.
    #[serde(default)]
    pub client_id: String,
    /// Connected-app consumer secret.
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Appended to `password` when logging in from an untrusted IP range.
    #[serde(default)]
    pub security_token: String,
    /// REST API version, e.g. "40.0". Default: "40.0"
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Outbound request timeout in seconds. Default: 30
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_static_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string()
}
fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            static_dir: default_static_dir(),
            salesforce: SalesforceConfig::default(),
        }
    }
}

impl Default for SalesforceConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
            security_token: String::new(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for SalesforceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceConfig")
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl SalesforceConfig {
    /// Report the first missing required credential.
    pub fn validate(&self) -> Result<(), DemoError> {
        let required = [
            ("SFDC_CLIENT_KEY", &self.client_id),
            ("SFDC_CLIENT_SECRET", &self.client_secret),
            ("SFDC_USERNAME", &self.username),
            ("SFDC_PASSWORD", &self.password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DemoError::Config(format!("{name} is not set")));
            }
        }
        if self.api_version.trim().is_empty() {
            return Err(DemoError::Config("SFDC_API_VERSION is empty".into()));
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Load configuration from TOML file with environment variable overrides.
    ///
    /// Reads `config.toml` from CWD (or path in `CONFIG_PATH` env var). A
    /// missing file is not an error: every field then comes from env vars
    /// or defaults.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(format!("failed to read {path}: {e}").into()),
        };
        Self::from_toml_str(&contents)
    }

    /// Load configuration from a TOML string, then apply env var overrides.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config: ServerConfig = toml::from_str(toml_str)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the config.
    ///
    /// Returns an error if an env var is set but has an invalid format
    /// (e.g., PORT=abc).
    pub fn apply_env_overrides(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Ok(val) = std::env::var("HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("PORT") {
            self.port = val
                .parse()
                .map_err(|_| format!("invalid PORT value: {val}"))?;
        }
        if let Ok(val) = std::env::var("LOG_LEVEL") {
            self.log_level = val;
        }
        if let Ok(val) = std::env::var("STATIC_DIR") {
            self.static_dir = val;
        }

        let sf = &mut self.salesforce;
        if let Ok(val) = std::env::var("SFDC_LOGIN_URL") {
            sf.login_url = val;
        }
        if let Ok(val) = std::env::var("SFDC_CLIENT_KEY") {
            sf.client_id = val;
        }
        if let Ok(val) = std::env::var("SFDC_CLIENT_SECRET") {
            sf.client_secret = val;
        }
        if let Ok(val) = std::env::var("SFDC_USERNAME") {
            sf.username = val;
        }
        if let Ok(val) = std::env::var("SFDC_PASSWORD") {
            sf.password = val;
        }
        if let Ok(val) = std::env::var("SFDC_TOKEN") {
            sf.security_token = val;
        }
        if let Ok(val) = std::env::var("SFDC_API_VERSION") {
            sf.api_version = val;
        }
        if let Ok(val) = std::env::var("SFDC_TIMEOUT_SECS") {
            sf.timeout_secs = val
                .parse()
                .map_err(|_| format!("invalid SFDC_TIMEOUT_SECS value: {val}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_loads_from_valid_toml_string() {
        let toml = r#"
            host = "127.0.0.1"
            port = 5000
            log_level = "debug"
            static_dir = "assets"

            [salesforce]
            login_url = "https://test.salesforce.com"
            client_id = "key"
            client_secret = "secret"
            username = "demo@example.com"
            password = "pw"
            security_token = "tok"
            api_version = "41.0"
            timeout_secs = 10
        "#;
        let config = ServerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.static_dir, "assets");
        assert_eq!(config.salesforce.login_url, "https://test.salesforce.com");
        assert_eq!(config.salesforce.client_id, "key");
        assert_eq!(config.salesforce.security_token, "tok");
        assert_eq!(config.salesforce.api_version, "41.0");
        assert_eq!(config.salesforce.timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_config_applies_env_var_overrides() {
        std::env::set_var("SFDC_USERNAME", "env@example.com");
        std::env::set_var("SFDC_API_VERSION", "39.0");
        std::env::set_var("PORT", "9090");
        let config = ServerConfig::from_toml_str(
            r#"
            [salesforce]
            username = "file@example.com"
        "#,
        )
        .unwrap();
        std::env::remove_var("SFDC_USERNAME");
        std::env::remove_var("SFDC_API_VERSION");
        std::env::remove_var("PORT");
        assert_eq!(config.salesforce.username, "env@example.com");
        assert_eq!(config.salesforce.api_version, "39.0");
        assert_eq!(config.port, 9090);
    }

    #[test]
    #[serial]
    fn test_config_rejects_invalid_port() {
        std::env::set_var("PORT", "abc");
        let result = ServerConfig::from_toml_str("");
        std::env::remove_var("PORT");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_config_has_correct_defaults_for_empty_input() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.static_dir.ends_with("/public"));
        assert!(std::path::Path::new(&config.static_dir)
            .join("style.css")
            .is_file());
        assert_eq!(config.salesforce.login_url, "https://login.salesforce.com");
        assert_eq!(config.salesforce.api_version, "40.0");
        assert_eq!(config.salesforce.timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_config_load_reads_file_from_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.toml");
        std::fs::write(&path, "port = 7070\n").unwrap();
        std::env::set_var("CONFIG_PATH", &path);
        let config = ServerConfig::load();
        std::env::remove_var("CONFIG_PATH");
        assert_eq!(config.unwrap().port, 7070);
    }

    #[test]
    #[serial]
    fn test_config_load_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CONFIG_PATH", dir.path().join("absent.toml"));
        let config = ServerConfig::load();
        std::env::remove_var("CONFIG_PATH");
        assert_eq!(config.unwrap().port, 8080);
    }

    #[test]
    #[serial]
    fn test_config_fails_on_malformed_toml() {
        let toml = "this is not valid = [[[toml";
        let result = ServerConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_missing_credentials() {
        let err = SalesforceConfig::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "configuration error: SFDC_CLIENT_KEY is not set");
    }

    #[test]
    fn test_validate_accepts_complete_credentials() {
        let sf = SalesforceConfig {
            client_id: "key".into(),
            client_secret: "secret".into(),
            username: "demo@example.com".into(),
            password: "pw".into(),
            ..Default::default()
        };
        assert!(sf.validate().is_ok());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let sf = SalesforceConfig {
            client_secret: "topsecret".into(),
            password: "hunter2".into(),
            security_token: "tok123".into(),
            ..Default::default()
        };
        let debug = format!("{sf:?}");
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("tok123"));
    }
}
