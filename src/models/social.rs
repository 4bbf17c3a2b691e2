use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainConfig;

/// The platforms a page can link to. The set is fixed; a platform with an
/// empty URL is simply not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Instagram,
    Youtube,
    Facebook,
    Tiktok,
    Discord,
}

impl Platform {
    /// Display order on the page and in the settings panel.
    pub const ALL: [Platform; 6] = [
        Platform::X,
        Platform::Instagram,
        Platform::Youtube,
        Platform::Facebook,
        Platform::Tiktok,
        Platform::Discord,
    ];

    /// Storage field name for this platform.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::X => "x",
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
            Platform::Discord => "discord",
        }
    }

    /// Human-readable name shown next to the link input.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::X => "X / Twitter",
            Platform::Instagram => "Instagram",
            Platform::Youtube => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Tiktok => "TikTok",
            Platform::Discord => "Discord",
        }
    }
}

/// One URL per platform, possibly empty. Persisted under `userSocialLinks`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub x: String,
    pub instagram: String,
    pub youtube: String,
    pub facebook: String,
    pub tiktok: String,
    pub discord: String,
}

impl SocialLinks {
    pub fn url(&self, platform: Platform) -> &str {
        match platform {
            Platform::X => &self.x,
            Platform::Instagram => &self.instagram,
            Platform::Youtube => &self.youtube,
            Platform::Facebook => &self.facebook,
            Platform::Tiktok => &self.tiktok,
            Platform::Discord => &self.discord,
        }
    }

    fn slot_mut(&mut self, platform: Platform) -> &mut String {
        match platform {
            Platform::X => &mut self.x,
            Platform::Instagram => &mut self.instagram,
            Platform::Youtube => &mut self.youtube,
            Platform::Facebook => &mut self.facebook,
            Platform::Tiktok => &mut self.tiktok,
            Platform::Discord => &mut self.discord,
        }
    }

    /// Copy of these links with one platform URL replaced.
    /// The URL is stored as typed; only emptiness decides visibility.
    pub fn with_url(&self, platform: Platform, url: &str) -> Self {
        let mut next = self.clone();
        *next.slot_mut(platform) = url.to_string();
        next
    }

    /// Platforms with a configured link, in display order.
    pub fn visible(&self) -> Vec<(Platform, &str)> {
        Platform::ALL
            .iter()
            .map(|&p| (p, self.url(p)))
            .filter(|(_, url)| !url.is_empty())
            .collect()
    }
}

impl DomainConfig for SocialLinks {
    const KEY: &'static str = "userSocialLinks";

    fn reconcile(raw: &Value, builtin: &Self) -> Self {
        let obj = match raw.as_object() {
            Some(o) => o,
            None => return builtin.clone(),
        };
        let field = |key: &str, fallback: &str| -> String {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        SocialLinks {
            x: field("x", &builtin.x),
            instagram: field("instagram", &builtin.instagram),
            youtube: field("youtube", &builtin.youtube),
            facebook: field("facebook", &builtin.facebook),
            tiktok: field("tiktok", &builtin.tiktok),
            discord: field("discord", &builtin.discord),
        }
    }
}
