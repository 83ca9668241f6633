use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables for hit-testing, edge fanning, self-loop shape, and node tinting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Drawn radius of a node disc.
    pub node_radius: f32,
    /// Pointer-down hit radius for nodes.
    pub hit_radius: f32,
    /// Radius used to find the target node when a connection is released.
    pub connect_radius: f32,
    /// Max pointer distance from an edge curve that still counts as a hit.
    pub edge_tolerance: f32,
    /// Offset between neighbouring edges of a parallel bundle.
    pub fan_step: f32,
    pub loop_base_height: f32,
    pub loop_base_width: f32,
    pub loop_height_step: f32,
    pub loop_width_step: f32,
    /// Curve flattening tolerance for hit-testing, in px.
    pub flatten_tolerance: f32,
    pub palette: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            node_radius: 18.0,
            hit_radius: 22.0,
            connect_radius: 20.0,
            edge_tolerance: 10.0,
            fan_step: 50.0,
            loop_base_height: 85.0,
            loop_base_width: 35.0,
            loop_height_step: 30.0,
            loop_width_step: 20.0,
            flatten_tolerance: 0.5,
            palette: [
                "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4",
                "#14b8a6",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_value(v: serde_json::Value) -> Result<Self, ConfigError> {
        let cfg: EditorConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("node_radius", self.node_radius),
            ("hit_radius", self.hit_radius),
            ("connect_radius", self.connect_radius),
            ("edge_tolerance", self.edge_tolerance),
            ("loop_base_height", self.loop_base_height),
            ("loop_base_width", self.loop_base_width),
            ("flatten_tolerance", self.flatten_tolerance),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::OutOfRange(name));
            }
        }
        let non_negative = [
            ("fan_step", self.fan_step),
            ("loop_height_step", self.loop_height_step),
            ("loop_width_step", self.loop_width_step),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::OutOfRange(name));
            }
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json_value(json!({ "fan_step": 40.0 })).unwrap();
        assert_eq!(cfg.fan_step, 40.0);
        assert_eq!(cfg.hit_radius, 22.0);
        assert_eq!(cfg.palette.len(), 8);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json_value(json!({ "hit_radius": 0.0 })),
            Err(ConfigError::OutOfRange("hit_radius"))
        ));
        assert!(matches!(
            EditorConfig::from_json_value(json!({ "palette": [] })),
            Err(ConfigError::EmptyPalette)
        ));
        assert!(matches!(
            EditorConfig::from_json_value(json!({ "fan_step": "wide" })),
            Err(ConfigError::Parse(_))
        ));
    }
}
