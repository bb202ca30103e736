use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub account: Account,
    #[serde(default)]
    pub demo: Demo,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

/// Starting account state, in minor currency units.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Account {
    pub balance_minor: i64,
    pub daily_budget_minor: i64,
    pub weekly_budget_minor: i64,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            balance_minor: 0,
            daily_budget_minor: 0,
            weekly_budget_minor: 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Demo {
    /// Seed the inventory with demo leads at startup.
    pub seed: bool,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_PATH).required(false))
            .add_source(config::Environment::with_prefix("LEADSPACE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
