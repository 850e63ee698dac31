use std::env;
use std::fs;
use std::path::Path;

use roster_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

struct FieldSpec {
    key_path: &'static str,
    env_keys: &'static [&'static str],
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec { key_path: "database.url", env_keys: &["ROSTER_DATABASE_URL"] },
    FieldSpec {
        key_path: "database.max_connections",
        env_keys: &["ROSTER_DATABASE_MAX_CONNECTIONS"],
    },
    FieldSpec { key_path: "database.timeout_secs", env_keys: &["ROSTER_DATABASE_TIMEOUT_SECS"] },
    FieldSpec { key_path: "logging.level", env_keys: &["ROSTER_LOGGING_LEVEL", "ROSTER_LOG_LEVEL"] },
    FieldSpec {
        key_path: "logging.format",
        env_keys: &["ROSTER_LOGGING_FORMAT", "ROSTER_LOG_FORMAT"],
    },
];

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in FIELDS {
        lines.push(render_line(
            field.key_path,
            &field_value(&config, field.key_path),
            field_source(
                field.key_path,
                field.env_keys,
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        ));
    }

    lines.join("\n")
}

fn field_value(config: &AppConfig, key_path: &str) -> String {
    match key_path {
        "database.url" => config.database.url.clone(),
        "database.max_connections" => config.database.max_connections.to_string(),
        "database.timeout_secs" => config.database.timeout_secs.to_string(),
        "logging.level" => config.logging.level.clone(),
        "logging.format" => format!("{:?}", config.logging.format),
        _ => "<unknown>".to_string(),
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
