use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub security: SecuritySettings,
    pub notify: NotifySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
    // 对外地址，退订链接用 (例如 "https://talks.example.org")
    pub public_base_url: String,
    pub talks_per_page: i64,
    pub comments_per_page: i64,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    pub unsubscribe_secret: String,
}

#[derive(Deserialize, Clone)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum NotifySettings {
    Log {
        batch_delay_secs: u64,
        flush_interval_secs: u64,
    },
    Webhook {
        endpoint: String,
        batch_delay_secs: u64,
        flush_interval_secs: u64,
    },
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("server.public_base_url", "http://localhost:3000")?
            .set_default("server.talks_per_page", 10)?
            .set_default("server.comments_per_page", 20)?
            .set_default("database.url", "sqlite://data/talks.db")?
            .set_default("security.unsubscribe_secret", "change_me_please")?
            .set_default("notify.mode", "log")?
            // 批量窗口：邮件先排队，给退订留一分钟缓冲
            .set_default("notify.batch_delay_secs", 60)?
            .set_default("notify.flush_interval_secs", 15)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("TALKS_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("TALKS_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
