use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::carousel::CarouselOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
    /// Slides in display order
    #[serde(default = "default_slides")]
    pub slides: Vec<SlideConfig>,
    /// Figures shown under the hero as count-up counters
    #[serde(default = "default_stats")]
    pub stats: Vec<StatConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            carousel: CarouselConfig::default(),
            ui: UiConfig::default(),
            keymap: KeymapConfig::default(),
            slides: default_slides(),
            stats: default_stats(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Autoplay period in milliseconds (0 = no autoplay)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Minimum time between accepted transitions in milliseconds
    #[serde(default = "default_transition_lock_ms")]
    pub transition_lock_ms: u64,
    /// Minimum horizontal drag distance in pixels to register a swipe
    #[serde(default = "default_swipe_threshold_px")]
    pub swipe_threshold_px: f64,
    /// Render indicator dots under the hero
    #[serde(default = "default_true")]
    pub show_indicators: bool,
    /// Start rotating immediately
    #[serde(default = "default_true")]
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            transition_lock_ms: default_transition_lock_ms(),
            swipe_threshold_px: default_swipe_threshold_px(),
            show_indicators: default_true(),
            autoplay: default_true(),
        }
    }
}

impl CarouselConfig {
    /// Engine options for a deck of `slide_count` slides
    pub fn options(&self, slide_count: usize) -> CarouselOptions {
        CarouselOptions {
            slide_count,
            indicator_count: self.show_indicators.then_some(slide_count),
            interval: Duration::from_millis(self.interval_ms),
            transition_lock: Duration::from_millis(self.transition_lock_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Approximate terminal cell width in pixels (for swipe distances)
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u16,
    /// Approximate terminal cell height in pixels
    #[serde(default = "default_cell_height_px")]
    pub cell_height_px: u16,
    /// Count-up animation length in milliseconds
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,
    /// Count-up easing curve
    #[serde(default = "default_counter_easing")]
    pub counter_easing: EasingType,
    /// Digit group separator for counters
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width_px: default_cell_width_px(),
            cell_height_px: default_cell_height_px(),
            counter_duration_ms: default_counter_duration_ms(),
            counter_easing: default_counter_easing(),
            thousands_separator: default_thousands_separator(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Easing curve for count-up counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the final value
    None,
    Linear,
    /// 1 - (1-t)³
    #[default]
    Cubic,
    /// 1 - (1-t)⁵
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "forest", "slate")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "forest".to_string()
}

/// Optional color overrides, each a hex string ("#22923f" or "22923f")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg: Option<String>,
    pub fg: Option<String>,
    pub muted: Option<String>,
    pub accent: Option<String>,
    pub indicator: Option<String>,
    pub progress: Option<String>,
    pub status_bg: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "h", "<C-c>", "<Left>", "<Space>", "?"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Previous slide (arrow left is always bound too)
    #[serde(default = "default_key_prev_slide")]
    pub prev_slide: String,
    /// Next slide (arrow right is always bound too)
    #[serde(default = "default_key_next_slide")]
    pub next_slide: String,
    /// Pause or resume autoplay
    #[serde(default = "default_key_toggle_autoplay")]
    pub toggle_autoplay: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            prev_slide: default_key_prev_slide(),
            next_slide: default_key_next_slide(),
            toggle_autoplay: default_key_toggle_autoplay(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_prev_slide() -> String { "h".to_string() }
fn default_key_next_slide() -> String { "l".to_string() }
fn default_key_toggle_autoplay() -> String { "<Space>".to_string() }
fn default_key_help() -> String { "?".to_string() }

/// A single hero panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Call-to-action label
    #[serde(default)]
    pub cta: Option<String>,
}

/// A counted figure ("12 Years", "2.021 Clients")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatConfig {
    pub label: String,
    pub value: u64,
    #[serde(default)]
    pub suffix: String,
}

fn default_slides() -> Vec<SlideConfig> {
    vec![
        SlideConfig {
            title: "Licensed Industrial Waste Treatment".to_string(),
            subtitle: "Collection, transport and processing under one permit".to_string(),
            cta: Some("Our Services".to_string()),
        },
        SlideConfig {
            title: "Safe Handling of Hazardous Materials".to_string(),
            subtitle: "Trained crews and certified facilities for every waste class".to_string(),
            cta: Some("Learn More".to_string()),
        },
        SlideConfig {
            title: "Sustainable Operations".to_string(),
            subtitle: "Recovery first, disposal last".to_string(),
            cta: Some("Contact Us".to_string()),
        },
    ]
}

fn default_stats() -> Vec<StatConfig> {
    vec![
        StatConfig {
            label: "Established".to_string(),
            value: 2021,
            suffix: String::new(),
        },
        StatConfig {
            label: "Clients Served".to_string(),
            value: 350,
            suffix: "+".to_string(),
        },
        StatConfig {
            label: "Tonnes Processed".to_string(),
            value: 12500,
            suffix: "+".to_string(),
        },
    ]
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("heroreel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_transition_lock_ms() -> u64 {
    1000 // keep in step with the slide fade length
}

fn default_swipe_threshold_px() -> f64 {
    50.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width_px() -> u16 {
    8
}

fn default_cell_height_px() -> u16 {
    16
}

fn default_counter_duration_ms() -> u64 {
    1800
}

fn default_counter_easing() -> EasingType {
    EasingType::Cubic
}

fn default_thousands_separator() -> char {
    '.'
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reject values the engine or the UI cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let threshold = self.carousel.swipe_threshold_px;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(crate::Error::Config(format!(
                "carousel.swipe_threshold_px must be positive, got {}",
                threshold
            )));
        }
        if self.ui.cell_width_px == 0 || self.ui.cell_height_px == 0 {
            return Err(crate::Error::Config(
                "ui.cell_width_px and ui.cell_height_px must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/heroreel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("heroreel")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("heroreel.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.carousel.interval_ms, 5000);
        assert_eq!(config.carousel.transition_lock_ms, 1000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert!(config.carousel.show_indicators);
        assert_eq!(config.ui.counter_duration_ms, 1800);
        assert_eq!(config.ui.counter_easing, EasingType::Cubic);
        assert_eq!(config.slides.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            interval_ms = 3000

            [[slides]]
            title = "Only one"
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel.interval_ms, 3000);
        assert_eq!(config.carousel.transition_lock_ms, 1000);
        assert_eq!(config.slides.len(), 1);
        assert_eq!(config.slides[0].subtitle, "");
        assert_eq!(config.slides[0].cta, None);
        assert_eq!(config.keymap.next_slide, "l");
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config: AppConfig = toml::from_str("[ui]\ntheme = \"slate\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "slate");
        assert!(config.ui.theme.colors.accent.is_none());

        let config: AppConfig = toml::from_str(
            "[ui.theme]\nname = \"forest\"\ncolors = { accent = \"#22923f\" }\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "forest");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#22923f"));
    }

    #[test]
    fn test_options_follow_indicator_flag() {
        let mut carousel = CarouselConfig::default();
        let options = carousel.options(4);
        assert_eq!(options.indicator_count, Some(4));
        assert_eq!(options.interval, Duration::from_millis(5000));

        carousel.show_indicators = false;
        assert_eq!(carousel.options(4).indicator_count, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.carousel.swipe_threshold_px = 0.0;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));

        let mut config = AppConfig::default();
        config.ui.cell_height_px = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.carousel.interval_ms = 7000;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.carousel.interval_ms, 7000);
        assert_eq!(loaded.slides, config.slides);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.carousel.interval_ms, 5000);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[carousel\ninterval_ms = ").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(crate::Error::Config(_))));
    }
}
