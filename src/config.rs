use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs shared by the placement strategies. Grid cells, spacing and
/// border mirror the original viewer's defaults; the fallback size is
/// what a node without stored geometry occupies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub items_per_row: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub border_size: f32,
    pub row_spacing: f32,
    pub fallback_width: f32,
    pub fallback_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            items_per_row: 4,
            cell_width: 400.0,
            cell_height: 400.0,
            horizontal_spacing: 50.0,
            vertical_spacing: 50.0,
            border_size: 50.0,
            row_spacing: 20.0,
            fallback_width: 200.0,
            fallback_height: 200.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Strategy name; unknown names degrade to an empty plan at layout
    /// time rather than failing here.
    pub strategy: String,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: "glossary".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Viewer-compatible config file, camelCase keys, everything optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout_mode: Option<String>,
    grid_items_per_row: Option<usize>,
    grid_horizontal_spacing: Option<f32>,
    grid_vertical_spacing: Option<f32>,
    grid_border_size: Option<f32>,
    row_spacing: Option<f32>,
    fallback_width: Option<f32>,
    fallback_height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Strict JSON first, with the same JSON5 fallback the canvas parser
/// uses for hand-edited files with comments or trailing commas.
fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("malformed config file: {json_err}"))?,
    };
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(v) = parsed.layout_mode {
        config.strategy = v;
    }
    if let Some(v) = parsed.grid_items_per_row {
        config.layout.items_per_row = v;
    }
    if let Some(v) = parsed.grid_horizontal_spacing {
        config.layout.horizontal_spacing = v;
    }
    if let Some(v) = parsed.grid_vertical_spacing {
        config.layout.vertical_spacing = v;
    }
    if let Some(v) = parsed.grid_border_size {
        config.layout.border_size = v;
    }
    if let Some(v) = parsed.row_spacing {
        config.layout.row_spacing = v;
    }
    if let Some(v) = parsed.fallback_width {
        config.layout.fallback_width = v;
    }
    if let Some(v) = parsed.fallback_height {
        config.layout.fallback_height = v;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_viewer() {
        let config = Config::default();
        assert_eq!(config.strategy, "glossary");
        assert_eq!(config.layout.items_per_row, 4);
        assert_eq!(config.layout.cell_width, 400.0);
        assert_eq!(config.layout.border_size, 50.0);
    }

    #[test]
    fn config_file_overrides_apply() {
        let parsed: ConfigFile = serde_json::from_str(
            r#"{"layoutMode": "grid", "gridItemsPerRow": 6, "gridBorderSize": 10}"#,
        )
        .unwrap();
        let config = apply_config_file(Config::default(), parsed);
        assert_eq!(config.strategy, "grid");
        assert_eq!(config.layout.items_per_row, 6);
        assert_eq!(config.layout.border_size, 10.0);
        // Untouched keys keep their defaults.
        assert_eq!(config.layout.horizontal_spacing, 50.0);
    }

    #[test]
    fn json5_fallback_accepts_hand_edited_config() {
        let config = parse_config(
            r#"{
                // layout tuning
                layoutMode: "linear",
                rowSpacing: 12,
            }"#,
        )
        .unwrap();
        assert_eq!(config.strategy, "linear");
        assert_eq!(config.layout.row_spacing, 12.0);
    }

    #[test]
    fn malformed_config_errors() {
        assert!(parse_config("not a config").is_err());
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.strategy, "glossary");
    }
}
