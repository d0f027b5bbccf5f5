//! Loading brand and material records from their directories.
//!
//! A record directory holds a `config.json` with an arbitrary JSON object.
//! The loader keeps every field, trims surrounding whitespace from top-level
//! string values, and stamps the directory name in as the record id. Nested
//! values (arrays, objects) pass through untouched.
//!
//! Loading is soft: a missing or malformed config logs a warning and yields
//! `None`, and the caller skips the record. Nothing here aborts a run.

use crate::naming::{CONFIG_FILE, DESCRIPTION_FILE, dir_id};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("No config found: {0}")]
    MissingConfig(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config is not a JSON object: {0}")]
    NotAnObject(PathBuf),
}

/// A normalized config record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Directory base name.
    pub id: String,
    /// Config fields with top-level strings trimmed. Never contains `id`.
    pub fields: Map<String, Value>,
}

impl Record {
    /// Drop config fields the compiler computes itself.
    pub fn strip(&mut self, keys: &[&str]) {
        for key in keys {
            self.fields.shift_remove(*key);
        }
    }

    /// Remove `key` and return its value, or `default` when absent.
    ///
    /// A present value is returned as written, whatever its type.
    pub fn take_or(&mut self, key: &str, default: bool) -> Value {
        let value = self.fields.shift_remove(key);
        if let Some(other) = value.as_ref().filter(|v| !v.is_boolean()) {
            warn!(record = %self.id, key, value = %other, "expected a boolean, passing through");
        }
        value.unwrap_or(Value::Bool(default))
    }
}

/// Load the record in `dir`, logging and returning `None` on failure.
pub fn load_record(dir: &Path) -> Option<Record> {
    match try_load_record(dir) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "skipping record");
            None
        }
    }
}

/// Load the record in `dir`.
pub fn try_load_record(dir: &Path) -> Result<Record, RecordError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Err(RecordError::MissingConfig(config_path));
    }
    let content = fs::read_to_string(&config_path)?;
    let value: Value = serde_json::from_str(&content)?;
    let Value::Object(mut fields) = value else {
        return Err(RecordError::NotAnObject(config_path));
    };

    trim_strings(&mut fields);
    fields.shift_remove("id");

    Ok(Record {
        id: dir_id(dir),
        fields,
    })
}

/// Trim leading/trailing whitespace from every top-level string value.
pub fn trim_strings(fields: &mut Map<String, Value>) {
    for value in fields.values_mut() {
        if let Value::String(s) = value {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
    }
}

/// HTML description of a material, empty when there is none.
pub fn load_description(material_dir: &Path) -> String {
    read_optional(&material_dir.join(DESCRIPTION_FILE)).unwrap_or_default()
}

/// Trimmed caption from a `*_name.txt` sidecar, empty when there is none.
pub fn read_caption(path: &Path) -> String {
    read_optional(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record_dir(tmp: &TempDir, name: &str, config: &str) -> PathBuf {
        let dir = tmp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), config).unwrap();
        dir
    }

    #[test]
    fn load_trims_top_level_strings() {
        let tmp = TempDir::new().unwrap();
        let dir = record_dir(
            &tmp,
            "acme",
            r#"{"name": "  Acme Roofing \n", "rank": 3, "tags": [" a "], "active": true}"#,
        );

        let record = load_record(&dir).unwrap();
        assert_eq!(record.fields["name"], "Acme Roofing");
        assert_eq!(record.fields["rank"], 3);
        assert_eq!(record.fields["tags"], json!([" a "]));
        assert_eq!(record.fields["active"], true);
    }

    #[test]
    fn id_comes_from_directory_name() {
        let tmp = TempDir::new().unwrap();
        let dir = record_dir(&tmp, "shingle-a", r#"{"id": "something-else", "name": "x"}"#);

        let record = load_record(&dir).unwrap();
        assert_eq!(record.id, "shingle-a");
        assert!(!record.fields.contains_key("id"));
    }

    #[test]
    fn field_order_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let dir = record_dir(&tmp, "b", r#"{"zeta": 1, "alpha": 2, "mid": 3}"#);

        let record = load_record(&dir).unwrap();
        let keys: Vec<&String> = record.fields.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_config_is_none() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        assert!(load_record(&dir).is_none());
        assert!(matches!(
            try_load_record(&dir),
            Err(RecordError::MissingConfig(_))
        ));
    }

    #[test]
    fn malformed_config_is_none() {
        let tmp = TempDir::new().unwrap();
        let dir = record_dir(&tmp, "bad", "{ not json");

        assert!(load_record(&dir).is_none());
        assert!(matches!(try_load_record(&dir), Err(RecordError::Parse(_))));
    }

    #[test]
    fn non_object_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = record_dir(&tmp, "list", r#"["a", "b"]"#);

        assert!(matches!(
            try_load_record(&dir),
            Err(RecordError::NotAnObject(_))
        ));
    }

    #[test]
    fn take_or_defaults_only_absent_keys() {
        let mut record = Record {
            id: "m".into(),
            fields: json!({"simpleMode": true, "enabled": "false", "flag": null, "other": 1})
                .as_object()
                .unwrap()
                .clone(),
        };

        assert_eq!(record.take_or("simpleMode", false), json!(true));
        assert_eq!(record.take_or("enabled", true), json!("false"));
        assert_eq!(record.take_or("flag", true), Value::Null);
        assert_eq!(record.take_or("missing", false), json!(false));
        assert!(!record.fields.contains_key("simpleMode"));
        assert!(!record.fields.contains_key("enabled"));
        assert!(record.fields.contains_key("other"));
    }

    #[test]
    fn strip_removes_computed_keys() {
        let mut record = Record {
            id: "m".into(),
            fields: json!({"image": "local.jpg", "name": "n"})
                .as_object()
                .unwrap()
                .clone(),
        };
        record.strip(&["image", "logo"]);
        assert_eq!(record.fields.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn description_present_and_absent() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_description(tmp.path()), "");

        fs::write(tmp.path().join(DESCRIPTION_FILE), "<p>Durable</p>\n").unwrap();
        assert_eq!(load_description(tmp.path()), "<p>Durable</p>\n");
    }

    #[test]
    fn caption_is_trimmed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("x_main_name.txt");
        assert_eq!(read_caption(&path), "");

        fs::write(&path, "  Autumn Blend\n").unwrap();
        assert_eq!(read_caption(&path), "Autumn Blend");
    }
}
