use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct EditorSettings {
    pub file_path: String,
    pub svg_path: String,
    pub svg_width: u32,
    pub svg_height: u32,
    pub stroke_width: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            file_path: "drawing.txt".to_string(),
            svg_path: "drawing.svg".to_string(),
            svg_width: vectorpad::svg::DEFAULT_WIDTH,
            svg_height: vectorpad::svg::DEFAULT_HEIGHT,
            stroke_width: 1.5,
        }
    }
}

/// `$HOME/.config/vectorpad.toml` if present, else `settings.toml` in the working directory.
pub(super) fn config_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join("vectorpad.toml");
        if path.exists() {
            return path;
        }
    }
    PathBuf::from("settings.toml")
}

fn is_toml(path: &str) -> bool {
    path.ends_with(".toml")
}

pub(super) fn parse_settings(text: &str, toml_first: bool) -> Option<EditorSettings> {
    let from_toml = || toml::from_str::<EditorSettings>(text).ok();
    let from_json = || serde_json::from_str::<EditorSettings>(text).ok();
    if toml_first {
        from_toml().or_else(from_json)
    } else {
        from_json().or_else(from_toml)
    }
}

pub(super) fn load_settings(path: &str) -> Option<EditorSettings> {
    let text = std::fs::read_to_string(path).ok()?;
    let settings = parse_settings(&text, is_toml(path));
    if settings.is_none() {
        log::warn!("ignoring unreadable settings file {path}");
    }
    settings
}

pub(super) fn save_settings(path: &str, settings: &EditorSettings) -> Result<(), String> {
    let text = if is_toml(path) {
        toml::to_string_pretty(settings).map_err(|e| e.to_string())?
    } else {
        serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?
    };
    std::fs::write(path, text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s = parse_settings("svg_width = 1024\n", true).unwrap();
        assert_eq!(s.svg_width, 1024);
        assert_eq!(s.svg_height, 600);
        assert_eq!(s.file_path, "drawing.txt");
    }

    #[test]
    fn json_is_accepted_as_fallback() {
        let s = parse_settings(r#"{"file_path": "a.txt", "stroke_width": 3.0}"#, true).unwrap();
        assert_eq!(s.file_path, "a.txt");
        assert_eq!(s.stroke_width, 3.0);
        assert_eq!(s.svg_path, "drawing.svg");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_settings("file_path = [", true).is_none());
    }

    #[test]
    fn save_then_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let settings = EditorSettings {
            file_path: "x.txt".to_string(),
            svg_width: 320,
            ..EditorSettings::default()
        };
        for name in ["settings.toml", "settings.json"] {
            let path = dir.path().join(name).display().to_string();
            save_settings(&path, &settings).unwrap();
            assert_eq!(load_settings(&path), Some(settings.clone()));
        }
        let missing = dir.path().join("none.toml").display().to_string();
        assert_eq!(load_settings(&missing), None);
    }
}
