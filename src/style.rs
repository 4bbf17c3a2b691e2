use serde::Serialize;

use crate::models::background::{BackgroundConfig, BackgroundKind, PatternKind};

/// One background-image layer. Where several stack, earlier entries paint
/// on top (CSS background-image order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Layer {
    Gradient { angle: i64, from: String, to: String },
    Image { url: String },
    Pattern { kind: PatternKind, opacity: f64 },
}

impl Layer {
    /// CSS background-image value for this layer.
    pub fn to_css(&self) -> String {
        match self {
            Layer::Gradient { angle, from, to } => {
                format!("linear-gradient({angle}deg, {from}, {to})")
            }
            Layer::Image { url } => format!("url({url})"),
            Layer::Pattern { kind, opacity } => pattern_css(*kind, *opacity),
        }
    }
}

fn pattern_css(kind: PatternKind, opacity: f64) -> String {
    match kind {
        PatternKind::None => String::new(),
        PatternKind::Dots => {
            format!("radial-gradient(rgba(0,0,0,{opacity}) 1px, transparent 1px)")
        }
        PatternKind::Stripes => format!(
            "repeating-linear-gradient(45deg, rgba(0,0,0,{opacity}), rgba(0,0,0,{opacity}) 10px, transparent 10px, transparent 20px)"
        ),
        PatternKind::Chevron => format!(
            "repeating-linear-gradient(135deg, rgba(0,0,0,{opacity}) 0, rgba(0,0,0,{opacity}) 10px, transparent 10px, transparent 20px)"
        ),
        PatternKind::Zigzag => format!(
            "repeating-linear-gradient(45deg, rgba(0,0,0,{opacity}) 0 10px, transparent 10px 20px), repeating-linear-gradient(-45deg, rgba(0,0,0,{opacity}) 0 10px, transparent 10px 20px)"
        ),
    }
}

/// Style directives for the page background, ready for a CSS-speaking shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundStyle {
    /// Flat color behind everything; only set for solid backgrounds.
    pub fill: Option<String>,
    /// Image layers, topmost first. A pattern overlay always precedes the base.
    pub layers: Vec<Layer>,
    /// background-size, when one applies ("cover" or the dot tile).
    pub size: Option<String>,
    pub position: String,
}

impl BackgroundStyle {
    /// Render the directives as CSS declarations, one per line.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if let Some(fill) = &self.fill {
            out.push_str(&format!("background-color: {fill};\n"));
        }
        if !self.layers.is_empty() {
            let images: Vec<String> = self.layers.iter().map(Layer::to_css).collect();
            out.push_str(&format!("background-image: {};\n", images.join(", ")));
        }
        if let Some(size) = &self.size {
            out.push_str(&format!("background-size: {size};\n"));
        }
        out.push_str(&format!("background-position: {};\n", self.position));
        out
    }
}

/// Compile a background configuration into style directives.
/// Pure: equal configurations always compile to equal directives.
pub fn compile(config: &BackgroundConfig) -> BackgroundStyle {
    let mut layers = Vec::new();

    if config.pattern != PatternKind::None {
        layers.push(Layer::Pattern {
            kind: config.pattern,
            opacity: config.pattern_opacity as f64 / 100.0,
        });
    }

    let mut fill = None;
    match config.kind {
        BackgroundKind::Solid => fill = Some(config.color.clone()),
        BackgroundKind::Gradient => layers.push(Layer::Gradient {
            angle: config.gradient.angle,
            from: config.gradient.colors[0].clone(),
            to: config.gradient.colors[1].clone(),
        }),
        // An image base is emitted even while no upload happened yet;
        // url() with an empty argument is how the page has always rendered.
        BackgroundKind::Image => layers.push(Layer::Image {
            url: config.image.clone(),
        }),
    }

    let size = if config.kind == BackgroundKind::Image {
        Some("cover".to_string())
    } else if config.pattern == PatternKind::Dots {
        Some("15px 15px".to_string())
    } else {
        None
    };

    BackgroundStyle {
        fill,
        layers,
        size,
        position: "center".to_string(),
    }
}
