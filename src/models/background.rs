use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainConfig;

/// How the page background is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Solid,
    Gradient,
    Image,
}

impl BackgroundKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solid" => Some(Self::Solid),
            "gradient" => Some(Self::Gradient),
            "image" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Tiled overlay drawn above the base background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    None,
    Dots,
    Stripes,
    Chevron,
    Zigzag,
}

impl PatternKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "dots" => Some(Self::Dots),
            "stripes" => Some(Self::Stripes),
            "chevron" => Some(Self::Chevron),
            "zigzag" => Some(Self::Zigzag),
            _ => None,
        }
    }
}

/// Two-stop linear gradient. The angle is in CSS degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub angle: i64,
    pub colors: [String; 2],
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient {
            angle: 90,
            colors: ["#74EBD5".to_string(), "#ACB6E5".to_string()],
        }
    }
}

impl Gradient {
    fn reconcile(raw: Option<&Value>, builtin: &Self) -> Self {
        let obj = match raw.and_then(Value::as_object) {
            Some(o) => o,
            None => return builtin.clone(),
        };
        let angle = obj
            .get("angle")
            .and_then(Value::as_i64)
            .unwrap_or(builtin.angle)
            .clamp(0, 360);
        let colors = match obj.get("colors").and_then(Value::as_array) {
            Some(arr) => [
                arr.first()
                    .and_then(Value::as_str)
                    .unwrap_or(&builtin.colors[0])
                    .to_string(),
                arr.get(1)
                    .and_then(Value::as_str)
                    .unwrap_or(&builtin.colors[1])
                    .to_string(),
            ],
            None => builtin.colors.clone(),
        };
        Gradient { angle, colors }
    }
}

/// Everything the page needs to paint its background.
/// Persisted under the `userBackground` key with the historical field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundConfig {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub color: String,
    pub gradient: Gradient,
    /// Data URL of an uploaded picture; empty when none was uploaded.
    pub image: String,
    pub pattern: PatternKind,
    /// Pattern overlay opacity in whole percent, 0..=100.
    pub pattern_opacity: i64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            kind: BackgroundKind::Solid,
            color: "#e5e7eb".to_string(),
            gradient: Gradient::default(),
            image: String::new(),
            pattern: PatternKind::None,
            pattern_opacity: 50,
        }
    }
}

impl DomainConfig for BackgroundConfig {
    const KEY: &'static str = "userBackground";

    fn reconcile(raw: &Value, builtin: &Self) -> Self {
        let obj = match raw.as_object() {
            Some(o) => o,
            None => return builtin.clone(),
        };
        BackgroundConfig {
            kind: obj
                .get("type")
                .and_then(Value::as_str)
                .and_then(BackgroundKind::parse)
                .unwrap_or(builtin.kind),
            color: obj
                .get("color")
                .and_then(Value::as_str)
                .unwrap_or(&builtin.color)
                .to_string(),
            gradient: Gradient::reconcile(obj.get("gradient"), &builtin.gradient),
            image: obj
                .get("image")
                .and_then(Value::as_str)
                .unwrap_or(&builtin.image)
                .to_string(),
            pattern: obj
                .get("pattern")
                .and_then(Value::as_str)
                .and_then(PatternKind::parse)
                .unwrap_or(builtin.pattern),
            pattern_opacity: obj
                .get("patternOpacity")
                .and_then(Value::as_i64)
                .unwrap_or(builtin.pattern_opacity)
                .clamp(0, 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> BackgroundConfig {
        BackgroundConfig::default()
    }

    #[test]
    fn first_run_defaults() {
        let bg = defaults();
        assert_eq!(bg.kind, BackgroundKind::Solid);
        assert_eq!(bg.color, "#e5e7eb");
        assert_eq!(bg.gradient.angle, 90);
        assert_eq!(bg.gradient.colors, ["#74EBD5".to_string(), "#ACB6E5".to_string()]);
        assert_eq!(bg.image, "");
        assert_eq!(bg.pattern, PatternKind::None);
        assert_eq!(bg.pattern_opacity, 50);
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let value = serde_json::to_value(defaults()).unwrap();
        assert_eq!(value["type"], "solid");
        assert_eq!(value["patternOpacity"], 50);
        assert_eq!(value["pattern"], "none");
        assert_eq!(value["gradient"]["colors"][1], "#ACB6E5");
    }

    #[test]
    fn reconcile_non_object_yields_defaults() {
        for raw in [json!(null), json!("solid"), json!(17), json!([1, 2])] {
            assert_eq!(BackgroundConfig::reconcile(&raw, &defaults()), defaults());
        }
    }

    #[test]
    fn reconcile_fills_missing_fields() {
        let raw = json!({ "type": "gradient" });
        let bg = BackgroundConfig::reconcile(&raw, &defaults());
        assert_eq!(bg.kind, BackgroundKind::Gradient);
        assert_eq!(bg.color, "#e5e7eb");
        assert_eq!(bg.pattern_opacity, 50);
    }

    #[test]
    fn reconcile_guards_field_types() {
        let raw = json!({
            "type": "plaid",
            "color": 42,
            "gradient": "not-an-object",
            "pattern": ["dots"],
            "patternOpacity": "70"
        });
        let bg = BackgroundConfig::reconcile(&raw, &defaults());
        assert_eq!(bg, defaults());
    }

    #[test]
    fn reconcile_clamps_ranges() {
        let raw = json!({ "gradient": { "angle": 720 }, "patternOpacity": -5 });
        let bg = BackgroundConfig::reconcile(&raw, &defaults());
        assert_eq!(bg.gradient.angle, 360);
        assert_eq!(bg.pattern_opacity, 0);
    }

    #[test]
    fn reconcile_keeps_valid_values() {
        let raw = json!({
            "type": "image",
            "image": "data:image/png;base64,AAAA",
            "pattern": "zigzag",
            "patternOpacity": 35,
            "gradient": { "angle": 180, "colors": ["#000000", "#ffffff"] }
        });
        let bg = BackgroundConfig::reconcile(&raw, &defaults());
        assert_eq!(bg.kind, BackgroundKind::Image);
        assert_eq!(bg.image, "data:image/png;base64,AAAA");
        assert_eq!(bg.pattern, PatternKind::Zigzag);
        assert_eq!(bg.pattern_opacity, 35);
        assert_eq!(bg.gradient.angle, 180);
        assert_eq!(bg.gradient.colors[0], "#000000");
    }

    #[test]
    fn reconcile_merges_partial_gradient_colors() {
        let raw = json!({ "gradient": { "colors": ["#111111"] } });
        let bg = BackgroundConfig::reconcile(&raw, &defaults());
        assert_eq!(bg.gradient.colors[0], "#111111");
        assert_eq!(bg.gradient.colors[1], "#ACB6E5");
        assert_eq!(bg.gradient.angle, 90);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let raw = json!({ "type": "gradient", "patternOpacity": 200, "junk": true });
        let once = BackgroundConfig::reconcile(&raw, &defaults());
        let twice =
            BackgroundConfig::reconcile(&serde_json::to_value(&once).unwrap(), &defaults());
        assert_eq!(once, twice);
    }
}
