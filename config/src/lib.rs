use std::fs::File;

use anyhow::Result;
use api::ApiConfig;
use app::AppConfig;
use db::DbConfig;
use log::LogConfig;
use serde::Deserialize;
use upload::UploadConfig;

pub mod api;
pub mod app;
pub mod db;
pub mod log;
pub mod upload;

#[derive(Deserialize)]
pub struct Config {
    app: AppConfig,
    log: LogConfig,
    db: DbConfig,
    api: ApiConfig,
    upload: UploadConfig,
}

impl Config {
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn upload(&self) -> &UploadConfig {
        &self.upload
    }
}

pub fn from_path(path: &str) -> Result<Config> {
    let file = File::open(path)?;
    Ok(serde_yaml::from_reader(file)?)
}

pub fn from_str(yaml: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(yaml)?)
}
