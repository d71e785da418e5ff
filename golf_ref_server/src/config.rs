#[derive(Debug, serde::Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub logging_config: String,
    pub national_mailbox: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_url: "sqlite://./server.sqlite3?mode=rwc".into(),
            host: "0.0.0.0".into(),
            port: 3000,
            logging_config: "info,sqlx::query=error,hyper=error,tower_http=debug,axum::rejection=trace".into(),
            national_mailbox: "crc@federgolf.example".into(),
        }
    }
}

pub(crate) fn read_config_inner() -> Result<Config, anyhow::Error> {
    let config_path = std::env::var("GOLF_REF_SERVER_CONFIG")?;
    let config = std::fs::read_to_string(config_path)?;
    let config = serde_yaml::from_str::<Config>(&config)?;
    Ok(config)
}

pub fn read_config() -> Config {
    match read_config_inner() {
        Ok(config) => config,
        Err(e) => {
            //Print to stderr, since logging is set up in the config
            eprintln!("Warning: Failed to read config: {}", e);
            Config::default()
        }
    }
}
