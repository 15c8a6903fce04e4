use adw::Application;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use directories::BaseDirs;

use crate::api::models::Role;

const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub api_base: String,
    #[serde(default)]
    pub role: Role,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            role: Role::default(),
        }
    }
}

impl AppState {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let cfg_dir = base.config_dir();
        Some(cfg_dir.join("meshcomm.toml"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::toml_path() {
            if let Ok(bytes) = fs::read(&path) {
                if let Ok(text) = String::from_utf8(bytes) {
                    if let Ok(state) = toml::from_str::<AppState>(&text) {
                        return state;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::toml_path() {
            if let Some(parent) = path.parent() { let _ = fs::create_dir_all(parent); }
            let toml = toml::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            fs::write(path, toml)
        } else {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No config dir"))
        }
    }
}

pub fn build_ui(app: &Application) {
    crate::ui::main_window::show_main_window(app);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_targets_local_backend() {
        let state = AppState::default();
        assert_eq!(state.api_base, "http://localhost:8080");
        assert_eq!(state.role, Role::Citizen);
    }

    #[test]
    fn state_round_trips_through_toml() {
        let state = AppState {
            api_base: "http://mesh.local:9000".into(),
            role: Role::Ems,
        };
        let text = toml::to_string_pretty(&state).unwrap();
        let back: AppState = toml::from_str(&text).unwrap();
        assert_eq!(back.api_base, state.api_base);
        assert_eq!(back.role, Role::Ems);
    }

    #[test]
    fn missing_role_defaults_to_citizen() {
        let back: AppState = toml::from_str(r#"api_base = "http://x""#).unwrap();
        assert_eq!(back.role, Role::Citizen);
    }
}
