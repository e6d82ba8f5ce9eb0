use std::{env, fs};

pub fn get() -> String {
    let config_path = match env::var("LB_CONFIG_PATH") {
        Ok(path) => path,
        Err(_) => "config.yml".to_owned(),
    };

    if fs::metadata(&config_path).is_err() {
        lb_log::panic(
            None,
            format!("[Leadbase] Config file {config_path} does not exist, set LB_CONFIG_PATH or add config.yml to the working directory"),
        );
    }

    config_path
}
