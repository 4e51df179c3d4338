//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Users allowed to log in.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which document store backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store, lost on restart.
    #[default]
    Memory,
    /// Hosted Appwrite database.
    Appwrite,
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Appwrite API endpoint, e.g. `https://cloud.appwrite.io/v1`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Appwrite project id.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Appwrite server API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Appwrite database id.
    #[serde(default)]
    pub database_id: Option<String>,
    /// Collection holding balances.
    #[serde(default = "default_balance_collection")]
    pub balance_collection: String,
    /// Collection holding expenses.
    #[serde(default = "default_expense_collection")]
    pub expense_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            endpoint: None,
            project_id: None,
            api_key: None,
            database_id: None,
            balance_collection: default_balance_collection(),
            expense_collection: default_expense_collection(),
        }
    }
}

fn default_balance_collection() -> String {
    "Saldo".to_string()
}

fn default_expense_collection() -> String {
    "Contas".to_string()
}

/// JWT configuration as read from config sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    43200 // 12 hours
}

/// Credential configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Known users.
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// A user allowed to log in.
#[derive(Clone, Deserialize)]
pub struct UserEntry {
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Argon2id PHC hash of the password.
    pub password_hash: String,
}

impl std::fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password_hash", &"[hidden]")
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CARTEIRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
