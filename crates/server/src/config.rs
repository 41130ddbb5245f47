use std::{fs, path::Path, path::PathBuf};

use toml::{Table, Value};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub assets_dir: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8050".into(),
            assets_dir: PathBuf::from("./assets"),
            admin_username: session::DEFAULT_USERNAME.into(),
            admin_password: session::DEFAULT_PASSWORD.into(),
            body_limit_bytes: 16 * 1024,
        }
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match raw.parse::<Table>() {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(%error, "ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_string(&file_cfg, "bind_addr") {
        settings.server_bind = v;
    }
    if let Some(v) = file_string(&file_cfg, "assets_dir") {
        settings.assets_dir = PathBuf::from(v);
    }
    if let Some(v) = file_string(&file_cfg, "admin_username") {
        settings.admin_username = v;
    }
    if let Some(v) = file_string(&file_cfg, "admin_password") {
        settings.admin_password = v;
    }
    match file_cfg.get("body_limit_bytes") {
        None => {}
        Some(Value::Integer(v)) if *v >= 0 => match usize::try_from(*v) {
            Ok(parsed) => settings.body_limit_bytes = parsed,
            Err(_) => warn!(key = "body_limit_bytes", "ignoring out of range setting"),
        },
        Some(_) => warn!(key = "body_limit_bytes", "ignoring setting with wrong type"),
    }
}

fn file_string(file_cfg: &Table, key: &str) -> Option<String> {
    match file_cfg.get(key)? {
        Value::String(v) => Some(v.clone()),
        _ => {
            warn!(key, "ignoring setting with wrong type");
            None
        }
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__ASSETS_DIR") {
        settings.assets_dir = PathBuf::from(v);
    }

    if let Some(v) = var("APP__ADMIN_USERNAME") {
        settings.admin_username = v;
    }
    if let Some(v) = var("APP__ADMIN_PASSWORD") {
        settings.admin_password = v;
    }

    if let Some(v) = var("APP__BODY_LIMIT_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.body_limit_bytes = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
