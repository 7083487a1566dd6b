use crate::model::Mode;

/// Top-level configuration, built once at process entry and passed by
/// reference into each component constructor. No component reads the
/// environment on its own.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppSettings,
    pub esb: EsbConfig,
    pub db: DbConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
    pub mode: Mode,
}

/// Source API (ESB) client settings.
#[derive(Clone)]
pub struct EsbConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub page_size: usize,
}

impl std::fmt::Debug for EsbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsbConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Destination store (PostgreSQL) settings.
#[derive(Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub stores_table: String,
    pub batch_size: usize,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &"[redacted]")
            .field("stores_table", &self.stores_table)
            .field("batch_size", &self.batch_size)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Operator notification channel settings.
#[derive(Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: i64,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[redacted]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
