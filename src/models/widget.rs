use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainConfig;

/// Icon size bounds for the social links widget, in pixels.
pub const MIN_ICON_SIZE: f64 = 24.0;
pub const MAX_ICON_SIZE: f64 = 72.0;

/// Where the widget sits, in page pixels from the top-left corner.
/// Unconstrained: it may be dragged partly or fully off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

/// Page dimensions, used to place the widget on first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i64,
    pub height: i64,
}

/// Which way the widget lays its icons out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// Placement and appearance of the social links widget.
/// Persisted under the `socialLinksSettings` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    pub position: Position,
    pub orientation: Orientation,
    /// Icon size in pixels; fractional after wheel resizing.
    pub size: f64,
    pub icon_color: String,
}

impl WidgetSettings {
    /// First-run settings: docked near the right edge, vertically centered.
    pub fn default_for(viewport: Viewport) -> Self {
        WidgetSettings {
            position: Position {
                x: viewport.width - 80,
                y: viewport.height / 2 - 150,
            },
            orientation: Orientation::Vertical,
            size: 40.0,
            icon_color: "#ffffff".to_string(),
        }
    }
}

impl Position {
    fn reconcile(raw: Option<&Value>, builtin: Position) -> Position {
        let obj = match raw.and_then(Value::as_object) {
            Some(o) => o,
            None => return builtin,
        };
        // Drags on zoomed displays can persist fractional coordinates.
        let coord = |key: &str, fallback: i64| -> i64 {
            obj.get(key)
                .and_then(Value::as_f64)
                .map(|v| v.round() as i64)
                .unwrap_or(fallback)
        };
        Position {
            x: coord("x", builtin.x),
            y: coord("y", builtin.y),
        }
    }
}

impl DomainConfig for WidgetSettings {
    const KEY: &'static str = "socialLinksSettings";

    fn reconcile(raw: &Value, builtin: &Self) -> Self {
        let obj = match raw.as_object() {
            Some(o) => o,
            None => return builtin.clone(),
        };
        WidgetSettings {
            position: Position::reconcile(obj.get("position"), builtin.position),
            orientation: obj
                .get("orientation")
                .and_then(Value::as_str)
                .and_then(Orientation::parse)
                .unwrap_or(builtin.orientation),
            size: obj
                .get("size")
                .and_then(Value::as_f64)
                .unwrap_or(builtin.size)
                .clamp(MIN_ICON_SIZE, MAX_ICON_SIZE),
            icon_color: obj
                .get("iconColor")
                .and_then(Value::as_str)
                .unwrap_or(&builtin.icon_color)
                .to_string(),
        }
    }
}
