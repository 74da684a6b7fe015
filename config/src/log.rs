use serde::Deserialize;

#[derive(Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_display_level")]
    display_level: bool,
    #[serde(default = "default_level_filter")]
    level_filter: String,
}

impl LogConfig {
    pub fn display_level(&self) -> &bool {
        &self.display_level
    }

    pub fn level_filter(&self) -> &str {
        &self.level_filter
    }
}

fn default_display_level() -> bool {
    true
}

fn default_level_filter() -> String {
    "info".to_owned()
}
