use serde::{Deserialize, Serialize};

/// Configuration from todo.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data file, relative to the working directory
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: default_data_file(),
            dashboard: DashboardConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Pending tasks due within this many days count as "Due Soon"
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            due_soon_days: default_due_soon_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme used when no saved UI state exists
    #[serde(default)]
    pub theme: ThemeName,
}

/// Light or dark presentation. Has no effect on behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("unknown theme '{}' (expected: light, dark)", s)),
        }
    }
}

/// Default: original app's file name
fn default_data_file() -> String {
    "todo_data.json".to_string()
}

fn default_due_soon_days() -> i64 {
    3
}
