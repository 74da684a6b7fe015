use std::fs;

pub fn get() -> String {
    let config_path = match std::env::var("SD_CONFIG_PATH") {
        Ok(path) => path,
        Err(_) => "config.yml".to_owned(),
    };

    if fs::metadata(&config_path).is_err() {
        sd_log::panic(
            None,
            format!("[StaffDesk] Config file {config_path} given by SD_CONFIG_PATH or the current directory must exist"),
        );
    }

    config_path
}
