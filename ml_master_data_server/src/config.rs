#[derive(Debug, serde::Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub db_url: String,
    pub db_name: String,
    pub host: String,
    pub port: u16,
    pub logging_config: String,
    pub upload_dir: String,
    pub base_url: String,
    pub jwt_secret: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_url: "sqlite://./ml_master_data.sqlite3?mode=rwc".into(),
            db_name: "ml_master_data".into(),
            host: "0.0.0.0".into(),
            port: 3000,
            logging_config: "info,sqlx::query=error,hyper=error,tower_http=debug,axum::rejection=trace".into(),
            upload_dir: "uploads".into(),
            base_url: "http://localhost:3000".into(),
            jwt_secret: String::new(),
        }
    }
}

impl Config {
    /// Applies the deployment environment on top of the file configuration.
    ///
    /// `DB_HOST` switches to MySQL; the database name then comes from `DB_NAME`
    /// and is created on first connect.
    pub fn apply_env<F>(mut self, var: F) -> Config where F: Fn(&str) -> Option<String> {
        if let Some(host) = var("DB_HOST") {
            let user = var("DB_USER").unwrap_or_else(|| "root".into());
            let password = var("DB_PASSWORD").unwrap_or_default();
            let port = var("DB_PORT").unwrap_or_else(|| "3306".into());
            self.db_url = format!("mysql://{}:{}@{}:{}", user, password, host, port);
        }
        if let Some(name) = var("DB_NAME") {
            self.db_name = name;
        }
        if let Some(secret) = var("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(base_url) = var("BASE_URL") {
            self.base_url = base_url;
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}

pub(crate) fn read_config_inner() -> Result<Config, anyhow::Error> {
    let config_path = std::env::var("ML_MASTER_DATA_CONFIG")?;
    let config = std::fs::read_to_string(config_path)?;
    let config = serde_yaml::from_str::<Config>(&config)?;
    Ok(config)
}

pub fn read_config() -> Config {
    // Missing .env is the normal case outside of deployments
    let _ = dotenvy::dotenv();
    let config = match read_config_inner() {
        Ok(config) => config,
        Err(e) => {
            //Print to stderr, since logging is set up in the config
            eprintln!("Warning: Failed to read config: {}", e);
            Config::default()
        }
    };
    config.apply_env(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
}
