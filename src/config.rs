//! # Console Configuration
//!
//! Layout of the joystick console: which joysticks exist, where they sit,
//! how they report and what they look like. Stored as TOML under
//! `~/.config/touchstick/console.toml`.
//!
//! Only the layout is stored. Handle positions are never written anywhere;
//! every joystick starts centred.
//!
//! Missing files and missing sections fall back to defaults so the console
//! always starts, even with a broken setup.

use crate::host::{Anchor, JoystickStyle, Placement};
use crate::joystick::{JoystickConfig, JoystickId, ReportMode};
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_DIR: &str = ".config/touchstick";
const CONFIG_FILE: &str = "console.toml";

/// Everything the console reads at startup
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Target frames per second for the UI
    pub fps: u8,
    /// Bound of the channel between joystick callbacks and the report sink
    pub report_channel_capacity: usize,
    /// Look of every joystick that does not bring its own style
    pub default_style: JoystickStyle,
    pub joysticks: Vec<JoystickConfig>,
}

impl Default for ConsoleConfig {
    /// Two sticks in the lower corners: absolute on the left, relative on the right
    fn default() -> Self {
        Self {
            fps: 60,
            report_channel_capacity: 256,
            default_style: JoystickStyle::default(),
            joysticks: vec![
                JoystickConfig::new(JoystickId(0), 90, 28, ReportMode::Absolute)
                    .with_placement(Placement::new(Anchor::BottomLeft, 40, -40)),
                JoystickConfig::new(JoystickId(1), 90, 28, ReportMode::Relative)
                    .with_placement(Placement::new(Anchor::BottomRight, -40, -40)),
            ],
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("Failed to parse console config: {}", e))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| eyre!("Failed to serialize console config: {}", e))
    }

    /// Reads the config at `path`, falling back to defaults if it does not exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
        {
            warn!("Config file {} does not exist, using default", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file: {}", e))?;
        let config = Self::from_toml_str(&content)?;

        info!(
            "Loaded {} joysticks from {}",
            config.joysticks.len(),
            path.display()
        );
        Ok(config)
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }

        tokio::fs::write(path, self.to_toml_string()?)
            .await
            .map_err(|e| eyre!("Failed to write config file: {}", e))?;
        info!("Config saved to {}", path.display());
        Ok(())
    }

    /// Writes the default layout if no config exists yet
    pub async fn ensure_default_config(path: &Path) -> Result<()> {
        if tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
        {
            return Ok(());
        }
        info!("No config found, writing default to {}", path.display());
        Self::default().save_to(path).await
    }
}

/// Location of the console config
pub fn config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, using current directory");
        PathBuf::from(".")
    });
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_layout() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            fps = 30

            [[joysticks]]
            id = 7
            base_radius = 60
            stick_radius = 20
            report_mode = "relative"

            [joysticks.placement]
            anchor = "top_right"
            offset_x = -10
            "#,
        )
        .unwrap();

        assert_eq!(config.fps, 30);
        assert_eq!(config.report_channel_capacity, 256);
        assert_eq!(config.default_style, JoystickStyle::default());

        let stick = &config.joysticks[0];
        assert_eq!(stick.id, JoystickId(7));
        assert_eq!(stick.report_mode, ReportMode::Relative);
        assert_eq!(stick.placement, Placement::new(Anchor::TopRight, -10, 0));
        assert_eq!(stick.style, None);
    }

    #[test]
    fn report_mode_defaults_to_absolute() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            [[joysticks]]
            id = 1
            base_radius = 40
            stick_radius = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.joysticks[0].report_mode, ReportMode::Absolute);
        assert_eq!(config.joysticks[0].placement.anchor, Anchor::Center);
    }

    #[test]
    fn rejects_unknown_report_mode() {
        let result = ConsoleConfig::from_toml_str(
            r#"
            [[joysticks]]
            id = 1
            base_radius = 40
            stick_radius = 10
            report_mode = "sideways"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn default_layout_is_valid() {
        let config = ConsoleConfig::default();
        for stick in &config.joysticks {
            assert!(stick.validate().is_ok());
        }
    }

    #[tokio::test]
    async fn ensure_default_then_load() {
        let dir = std::env::temp_dir().join(format!("touchstick-test-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert_eq!(
            ConsoleConfig::load_from(&path).await.unwrap(),
            ConsoleConfig::default()
        );

        ConsoleConfig::ensure_default_config(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(
            ConsoleConfig::load_from(&path).await.unwrap(),
            ConsoleConfig::default()
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
