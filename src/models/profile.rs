use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainConfig;

/// Font families offered by the text styling panel.
pub const FONT_FAMILIES: &[&str] = &["Inter", "Arial", "Helvetica", "Times New Roman", "Georgia"];

/// Profile photo size slider bounds, in pixels.
pub const IMAGE_SIZE_MIN: i64 = 64;
pub const IMAGE_SIZE_MAX: i64 = 256;

/// Text size slider bounds, in pixels.
pub const FONT_SIZE_MIN: i64 = 12;
pub const FONT_SIZE_MAX: i64 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "italic" => Some(Self::Italic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// The profile photo: a data URL plus its rendered size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub src: String,
    pub size: i64,
}

impl Default for ProfileImage {
    fn default() -> Self {
        ProfileImage {
            src: String::new(),
            size: 128,
        }
    }
}

impl ProfileImage {
    /// Early builds stored the image as a bare data-URL string. Anything
    /// that is not an object contributes no fields.
    fn reconcile(raw: Option<&Value>, builtin: &Self) -> Self {
        let obj = match raw.and_then(Value::as_object) {
            Some(o) => o,
            None => return builtin.clone(),
        };
        ProfileImage {
            src: obj
                .get("src")
                .and_then(Value::as_str)
                .unwrap_or(&builtin.src)
                .to_string(),
            size: obj
                .get("size")
                .and_then(Value::as_i64)
                .unwrap_or(builtin.size),
        }
    }
}

/// One styled line of profile text (name, profession, or description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub font_style: FontStyle,
    /// CSS length, e.g. "24px".
    pub font_size: String,
    pub font_color: String,
    pub font_weight: FontWeight,
    pub font_family: String,
    pub text_align: TextAlign,
}

impl TextBlock {
    /// Copy of this block resized from the text size slider.
    pub fn with_font_size(&self, px: i64) -> Self {
        let mut next = self.clone();
        next.font_size = format!("{}px", px.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX));
        next
    }

    fn reconcile(raw: Option<&Value>, builtin: &Self) -> Self {
        let obj = match raw.and_then(Value::as_object) {
            Some(o) => o,
            None => return builtin.clone(),
        };
        let text_field = |key: &str, fallback: &str| -> String {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        TextBlock {
            text: text_field("text", &builtin.text),
            font_style: obj
                .get("fontStyle")
                .and_then(Value::as_str)
                .and_then(FontStyle::parse)
                .unwrap_or(builtin.font_style),
            font_size: text_field("fontSize", &builtin.font_size),
            font_color: text_field("fontColor", &builtin.font_color),
            font_weight: obj
                .get("fontWeight")
                .and_then(Value::as_str)
                .and_then(FontWeight::parse)
                .unwrap_or(builtin.font_weight),
            font_family: text_field("fontFamily", &builtin.font_family),
            text_align: obj
                .get("textAlign")
                .and_then(Value::as_str)
                .and_then(TextAlign::parse)
                .unwrap_or(builtin.text_align),
        }
    }
}

/// The profile card: photo plus three styled text blocks.
/// Persisted under the `profile` key. Unknown top-level keys from older or
/// newer builds ride along in `extra` and are written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub image: ProfileImage,
    pub name: TextBlock,
    pub profession: TextBlock,
    pub description: TextBlock,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let block = |text: &str, font_size: &str, font_color: &str, font_weight: FontWeight| {
            TextBlock {
                text: text.to_string(),
                font_style: FontStyle::Normal,
                font_size: font_size.to_string(),
                font_color: font_color.to_string(),
                font_weight,
                font_family: "Arial".to_string(),
                text_align: TextAlign::Left,
            }
        };
        ProfileConfig {
            image: ProfileImage::default(),
            name: block("Your Name", "24px", "#1F2937", FontWeight::Bold),
            profession: block("Your Profession", "18px", "#374151", FontWeight::Normal),
            description: block("A little bit about yourself.", "16px", "#6B7280", FontWeight::Normal),
            extra: Map::new(),
        }
    }
}

impl DomainConfig for ProfileConfig {
    const KEY: &'static str = "profile";

    fn reconcile(raw: &Value, builtin: &Self) -> Self {
        let obj = match raw.as_object() {
            Some(o) => o,
            None => return builtin.clone(),
        };
        let mut extra = builtin.extra.clone();
        for (key, value) in obj {
            if !matches!(key.as_str(), "image" | "name" | "profession" | "description") {
                extra.insert(key.clone(), value.clone());
            }
        }
        ProfileConfig {
            image: ProfileImage::reconcile(obj.get("image"), &builtin.image),
            name: TextBlock::reconcile(obj.get("name"), &builtin.name),
            profession: TextBlock::reconcile(obj.get("profession"), &builtin.profession),
            description: TextBlock::reconcile(obj.get("description"), &builtin.description),
            extra,
        }
    }
}
