//! Pattern 1: Singleton
//! Application Settings Store
//!
//! Run with: cargo run --bin p1_singleton_settings

use colored::Colorize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unknown setting: '{0}'")]
    UnknownKey(String),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to convert TOML value: {0}")]
    Convert(#[from] serde_json::Error),
}

pub struct ApplicationSettings {
    settings: RwLock<BTreeMap<String, Value>>,
}

impl ApplicationSettings {
    fn with_defaults() -> Self {
        let defaults = BTreeMap::from([
            ("theme".to_string(), json!("dark")),
            ("default_path".to_string(), json!("/home/user/documents")),
            ("recent_files".to_string(), json!([])),
        ]);
        ApplicationSettings {
            settings: RwLock::new(defaults),
        }
    }

    pub fn global() -> &'static ApplicationSettings {
        static SETTINGS: OnceLock<ApplicationSettings> = OnceLock::new();

        let mut created = false;
        let settings = SETTINGS.get_or_init(|| {
            created = true;
            println!("Creating a new ApplicationSettings instance...");
            println!("Initializing with default settings...");
            ApplicationSettings::with_defaults()
        });
        if !created {
            println!("Using existing ApplicationSettings instance...");
        }
        settings
    }

    pub fn get_setting(&self, key: &str) -> Result<Value, SettingsError> {
        let settings = self.settings.read().unwrap_or_else(PoisonError::into_inner);
        settings
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))
    }

    /// Stores `value` under `key`, returning whatever was there before.
    pub fn set_setting(&self, key: &str, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        let previous = {
            let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
            settings.insert(key.to_string(), value.clone())
        };
        match &previous {
            Some(old) => println!(
                "Updating existing setting for {} from {} to new setting value: {}",
                key,
                old,
                value.to_string().green()
            ),
            None => println!("Added new setting {} = {}", key, value.to_string().green()),
        }
        previous
    }

    pub fn get_all_settings(&self) -> BTreeMap<String, Value> {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies every top-level key of a TOML document. Nothing is written
    /// unless the whole document parses.
    pub fn merge_toml(&self, content: &str) -> Result<usize, SettingsError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut incoming = Vec::with_capacity(table.len());
        for (key, value) in table {
            incoming.push((key, serde_json::to_value(value)?));
        }

        let applied = incoming.len();
        for (key, value) in incoming {
            self.set_setting(&key, value);
        }
        Ok(applied)
    }
}

const USER_OVERRIDES: &str = r#"
font_size = 14
recent_files = ["notes.md", "todo.txt"]

[editor]
tab_width = 4
"#;

fn print_settings(label: &str, settings: &ApplicationSettings) {
    println!("\n--- All Settings (from {}'s perspective) ---", label);
    for (key, value) in settings.get_all_settings() {
        println!("{}: {}", key, value);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Singleton Application Settings ===\n");

    let app1 = ApplicationSettings::global();
    let app2 = ApplicationSettings::global();
    let app3 = ApplicationSettings::global();

    println!();
    app1.set_setting("theme", "light_modern");

    println!("\n--- Verifying Singleton Behavior ---");
    println!("Are app1 and app2 the same object? {}", std::ptr::eq(app1, app2));
    println!("Are app1 and app3 the same object? {}", std::ptr::eq(app1, app3));

    print_settings("app1", app1);
    print_settings("app2", app2);

    println!("\n--- Loading Overrides From TOML ---");
    let applied = app2.merge_toml(USER_OVERRIDES)?;
    println!("Applied {} keys", applied);
    print_settings("app3", app3);

    println!("\n--- Missing Keys ---");
    match app3.get_setting("language") {
        Ok(value) => println!("language = {}", value),
        Err(err) => println!("{}", err.to_string().red()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_present() {
        let settings = ApplicationSettings::with_defaults();
        assert_eq!(settings.get_setting("theme").unwrap(), json!("dark"));
        assert_eq!(
            settings.get_setting("default_path").unwrap(),
            json!("/home/user/documents")
        );
        assert_eq!(settings.get_setting("recent_files").unwrap(), json!([]));
        assert_eq!(settings.get_all_settings().len(), 3);
    }

    #[test]
    fn test_unknown_key() {
        let settings = ApplicationSettings::with_defaults();
        assert!(matches!(
            settings.get_setting("missing"),
            Err(SettingsError::UnknownKey(key)) if key == "missing"
        ));
    }

    #[test]
    fn test_set_setting_returns_previous() {
        let settings = ApplicationSettings::with_defaults();
        assert_eq!(settings.set_setting("theme", "light"), Some(json!("dark")));
        assert_eq!(settings.set_setting("font_size", 12), None);
        assert_eq!(settings.get_setting("font_size").unwrap(), json!(12));
    }

    #[test]
    fn test_get_all_settings_is_a_copy() {
        let settings = ApplicationSettings::with_defaults();
        let mut copy = settings.get_all_settings();
        copy.insert("theme".to_string(), json!("neon"));
        copy.remove("default_path");

        assert_eq!(settings.get_setting("theme").unwrap(), json!("dark"));
        assert!(settings.get_setting("default_path").is_ok());
    }

    #[test]
    fn test_merge_toml_applies_keys() {
        let settings = ApplicationSettings::with_defaults();
        let applied = settings.merge_toml(USER_OVERRIDES).unwrap();

        assert_eq!(applied, 3);
        assert_eq!(settings.get_setting("font_size").unwrap(), json!(14));
        assert_eq!(
            settings.get_setting("recent_files").unwrap(),
            json!(["notes.md", "todo.txt"])
        );
        assert_eq!(
            settings.get_setting("editor").unwrap(),
            json!({ "tab_width": 4 })
        );
        assert_eq!(settings.get_setting("theme").unwrap(), json!("dark"));
    }

    #[test]
    fn test_merge_toml_rejects_invalid_input_without_writes() {
        let settings = ApplicationSettings::with_defaults();
        let before = settings.get_all_settings();

        let result = settings.merge_toml("theme = \"light\"\nbroken = ");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
        assert_eq!(settings.get_all_settings(), before);
    }

    #[test]
    fn test_global_is_shared() {
        let a = ApplicationSettings::global();
        let b = ApplicationSettings::global();
        assert!(std::ptr::eq(a, b));

        a.set_setting("test_marker", true);
        assert_eq!(b.get_setting("test_marker").unwrap(), json!(true));
    }
}
