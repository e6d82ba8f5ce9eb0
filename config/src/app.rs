use serde::Deserialize;

#[derive(Deserialize)]
pub struct AppConfig {
    mode: AppConfigMode,
}

impl AppConfig {
    pub fn mode(&self) -> &AppConfigMode {
        &self.mode
    }
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum AppConfigMode {
    Development,
    Production,
}

impl AppConfigMode {
    /// Production rejects cross-origin callers unless an origin is configured.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}
