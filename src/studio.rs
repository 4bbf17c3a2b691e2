use std::sync::Arc;

use chrono::NaiveDateTime;
use log::info;

use crate::boot;
use crate::config::{AppConfig, Backend};
use crate::domain::Domain;
use crate::images;
use crate::interaction::{wheel_resize, Pointer, WidgetController};
use crate::models::background::{BackgroundConfig, BackgroundKind};
use crate::models::profile::{ProfileConfig, IMAGE_SIZE_MAX, IMAGE_SIZE_MIN};
use crate::models::social::{Platform, SocialLinks};
use crate::models::widget::{Position, Viewport, WidgetSettings};
use crate::store::file::FileStore;
use crate::store::sqlite::SqliteStore;
use crate::store::StateStore;
use crate::style::{self, BackgroundStyle};

/// The page customizer: every configuration domain loaded and ready, plus
/// the drag state for the social links widget. All mutation goes through
/// here so each change is persisted the moment it happens.
pub struct Studio {
    background: Domain<BackgroundConfig>,
    profile: Domain<ProfileConfig>,
    social: Domain<SocialLinks>,
    widget: Domain<WidgetSettings>,
    controller: WidgetController,
}

impl Studio {
    /// Prepare the data directory, open the configured store backend, and
    /// load all domains. The viewport places the widget on first run only;
    /// a persisted position wins over it.
    pub fn open(config: &AppConfig, viewport: Viewport) -> Result<Studio, String> {
        boot::prepare(config)?;
        info!(
            "Opening {:?} state store at {}",
            config.backend,
            config.storage_path.display()
        );
        let store: Arc<dyn StateStore> = match config.backend {
            Backend::Sqlite => Arc::new(SqliteStore::open_at(
                &config.storage_path.to_string_lossy(),
            )?),
            Backend::File => Arc::new(FileStore::open(&config.storage_path)?),
        };
        Ok(Self::with_store(store, viewport))
    }

    /// Load all domains from an already opened store.
    pub fn with_store(store: Arc<dyn StateStore>, viewport: Viewport) -> Studio {
        Studio {
            background: Domain::load(store.clone(), BackgroundConfig::default()),
            profile: Domain::load(store.clone(), ProfileConfig::default()),
            social: Domain::load(store.clone(), SocialLinks::default()),
            widget: Domain::load(store, WidgetSettings::default_for(viewport)),
            controller: WidgetController::new(),
        }
    }

    // ── Current state ────────────────────────────────────────────

    pub fn background(&self) -> &BackgroundConfig {
        self.background.get()
    }

    pub fn profile(&self) -> &ProfileConfig {
        self.profile.get()
    }

    pub fn social_links(&self) -> &SocialLinks {
        self.social.get()
    }

    pub fn widget(&self) -> &WidgetSettings {
        self.widget.get()
    }

    /// CSS-ready rendering of the current background.
    pub fn background_style(&self) -> BackgroundStyle {
        style::compile(self.background.get())
    }

    /// Most recent write across all domains, for a saved indicator.
    pub fn last_saved(&self) -> Option<NaiveDateTime> {
        [
            self.background.last_saved(),
            self.profile.last_saved(),
            self.social.last_saved(),
            self.widget.last_saved(),
        ]
        .into_iter()
        .flatten()
        .max()
    }

    // ── General updaters ─────────────────────────────────────────

    pub fn update_background(&mut self, f: impl FnOnce(&BackgroundConfig) -> BackgroundConfig) {
        self.background.update(f);
    }

    pub fn update_profile(&mut self, f: impl FnOnce(&ProfileConfig) -> ProfileConfig) {
        self.profile.update(f);
    }

    pub fn update_social_links(&mut self, f: impl FnOnce(&SocialLinks) -> SocialLinks) {
        self.social.update(f);
    }

    pub fn update_widget(&mut self, f: impl FnOnce(&WidgetSettings) -> WidgetSettings) {
        self.widget.update(f);
    }

    // ── Social links ─────────────────────────────────────────────

    /// Set one platform link. The URL is stored as typed; clearing it to
    /// empty hides the icon.
    pub fn set_link(&mut self, platform: Platform, url: &str) {
        self.social.update(|links| links.with_url(platform, url));
    }

    // ── Profile ──────────────────────────────────────────────────

    /// Validate an uploaded photo and put it on the profile card.
    pub fn upload_profile_photo(&mut self, bytes: &[u8]) -> Result<(), String> {
        let data_url = images::to_data_url(bytes)?;
        self.apply_profile_photo(&data_url);
        Ok(())
    }

    /// Put an already encoded photo on the profile card. The current size is
    /// kept, except that a zero size (hand-edited state) becomes 32 so the
    /// new photo is not invisible.
    pub fn apply_profile_photo(&mut self, data_url: &str) {
        self.profile.update(|p| {
            let mut next = p.clone();
            next.image.src = data_url.to_string();
            if next.image.size == 0 {
                next.image.size = 32;
            }
            next
        });
    }

    /// Resize the profile photo from the size slider.
    pub fn set_profile_image_size(&mut self, size: i64) {
        let size = size.clamp(IMAGE_SIZE_MIN, IMAGE_SIZE_MAX);
        self.profile.update(|p| {
            let mut next = p.clone();
            next.image.size = size;
            next
        });
    }

    // ── Background ───────────────────────────────────────────────

    /// Validate an uploaded picture and make it the page background.
    pub fn upload_background_image(&mut self, bytes: &[u8]) -> Result<(), String> {
        let data_url = images::to_data_url(bytes)?;
        self.apply_background_image(&data_url);
        Ok(())
    }

    /// Store an encoded picture and switch the background kind to `image`.
    pub fn apply_background_image(&mut self, data_url: &str) {
        self.background.update(|bg| {
            let mut next = bg.clone();
            next.image = data_url.to_string();
            next.kind = BackgroundKind::Image;
            next
        });
    }

    // ── Widget interaction ───────────────────────────────────────

    /// Begin dragging the widget from the given pointer location.
    pub fn widget_press(&mut self, pointer: Pointer) {
        let anchor = self.widget.get().position;
        self.controller.press(pointer, anchor);
    }

    /// Track pointer motion during a drag. Moves and persists the widget and
    /// returns the new position; outside a drag nothing happens.
    pub fn widget_motion(&mut self, pointer: Pointer) -> Option<Position> {
        let position = self.controller.motion(pointer)?;
        self.widget.update(|w| {
            let mut next = w.clone();
            next.position = position;
            next
        });
        Some(position)
    }

    pub fn widget_release(&mut self) {
        self.controller.release();
    }

    pub fn widget_is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Resize the widget icons from a wheel event over them. Returns the new
    /// size so the shell can update without re-reading.
    pub fn widget_wheel(&mut self, delta_y: f64) -> f64 {
        let size = wheel_resize(self.widget.get().size, delta_y);
        self.widget.update(|w| {
            let mut next = w.clone();
            next.size = size;
            next
        });
        size
    }

    /// Flip the widget between vertical and horizontal layout.
    pub fn toggle_orientation(&mut self) {
        self.widget.update(|w| {
            let mut next = w.clone();
            next.orientation = w.orientation.toggled();
            next
        });
    }

    pub fn set_icon_color(&mut self, color: &str) {
        self.widget.update(|w| {
            let mut next = w.clone();
            next.icon_color = color.to_string();
            next
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::background::PatternKind;
    use crate::models::widget::Orientation;
    use serde_json::Value;

    const VIEWPORT: Viewport = Viewport {
        width: 1280,
        height: 800,
    };

    fn memory_store() -> Arc<dyn StateStore> {
        let manager = r2d2_sqlite::SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)
            .expect("Failed to create in-memory pool");
        crate::db::run_migrations(&pool).expect("migrations failed");
        Arc::new(SqliteStore::new(pool))
    }

    fn studio() -> Studio {
        Studio::with_store(memory_store(), VIEWPORT)
    }

    fn saved(store: &Arc<dyn StateStore>, key: &str) -> Value {
        serde_json::from_str(&store.get(key).expect("nothing was saved")).unwrap()
    }

    #[test]
    fn first_open_serves_defaults() {
        let s = studio();
        assert_eq!(*s.background(), BackgroundConfig::default());
        assert_eq!(*s.profile(), ProfileConfig::default());
        assert_eq!(*s.social_links(), SocialLinks::default());
        assert_eq!(s.widget().position, Position { x: 1200, y: 250 });
        assert!(s.last_saved().is_none());
    }

    #[test]
    fn set_link_persists_the_document() {
        let store = memory_store();
        let mut s = Studio::with_store(store.clone(), VIEWPORT);
        s.set_link(Platform::Youtube, "https://youtube.com/@ada");

        let raw = saved(&store, "userSocialLinks");
        assert_eq!(raw["youtube"], "https://youtube.com/@ada");
        assert_eq!(raw["x"], "");
        assert!(s.last_saved().is_some());
    }

    #[test]
    fn profile_photo_keeps_the_current_size() {
        let mut s = studio();
        s.set_profile_image_size(200);
        s.apply_profile_photo("data:image/png;base64,AAAA");
        assert_eq!(s.profile().image.src, "data:image/png;base64,AAAA");
        assert_eq!(s.profile().image.size, 200);
    }

    #[test]
    fn profile_photo_rescues_a_zero_size() {
        let store = memory_store();
        store
            .set("profile", r#"{"image":{"src":"","size":0}}"#)
            .unwrap();
        let mut s = Studio::with_store(store, VIEWPORT);
        s.apply_profile_photo("data:image/png;base64,AAAA");
        assert_eq!(s.profile().image.size, 32);
    }

    #[test]
    fn image_size_slider_clamps() {
        let mut s = studio();
        s.set_profile_image_size(10_000);
        assert_eq!(s.profile().image.size, IMAGE_SIZE_MAX);
        s.set_profile_image_size(-4);
        assert_eq!(s.profile().image.size, IMAGE_SIZE_MIN);
    }

    #[test]
    fn background_picture_switches_the_kind() {
        let store = memory_store();
        let mut s = Studio::with_store(store.clone(), VIEWPORT);
        s.apply_background_image("data:image/png;base64,BBBB");

        assert_eq!(s.background().kind, BackgroundKind::Image);
        let raw = saved(&store, "userBackground");
        assert_eq!(raw["type"], "image");
        assert_eq!(raw["image"], "data:image/png;base64,BBBB");
    }

    #[test]
    fn drag_moves_and_persists_the_widget() {
        let store = memory_store();
        let mut s = Studio::with_store(store.clone(), VIEWPORT);

        assert!(s.widget_motion(Pointer { x: 5.0, y: 5.0 }).is_none());

        s.widget_press(Pointer { x: 100.0, y: 100.0 });
        assert!(s.widget_is_dragging());
        let moved = s.widget_motion(Pointer { x: 130.0, y: 90.0 }).unwrap();
        assert_eq!(moved, Position { x: 1230, y: 240 });
        assert_eq!(s.widget().position, moved);

        s.widget_release();
        assert!(!s.widget_is_dragging());
        assert!(s.widget_motion(Pointer { x: 500.0, y: 500.0 }).is_none());

        let raw = saved(&store, "socialLinksSettings");
        assert_eq!(raw["position"]["x"], 1230);
        assert_eq!(raw["position"]["y"], 240);
    }

    #[test]
    fn wheel_resizes_within_bounds() {
        let mut s = studio();
        assert_eq!(s.widget_wheel(-500.0), 50.0);
        assert_eq!(s.widget().size, 50.0);
        assert_eq!(s.widget_wheel(-5000.0), 72.0);
        assert_eq!(s.widget_wheel(5000.0), 24.0);
    }

    #[test]
    fn orientation_and_color_round_trip() {
        let store = memory_store();
        let mut s = Studio::with_store(store.clone(), VIEWPORT);
        s.toggle_orientation();
        s.set_icon_color("#222222");
        assert_eq!(s.widget().orientation, Orientation::Horizontal);

        let raw = saved(&store, "socialLinksSettings");
        assert_eq!(raw["orientation"], "horizontal");
        assert_eq!(raw["iconColor"], "#222222");
    }

    #[test]
    fn general_updater_reaches_any_field() {
        let mut s = studio();
        s.update_background(|bg| {
            let mut next = bg.clone();
            next.pattern = PatternKind::Chevron;
            next.pattern_opacity = 80;
            next
        });
        assert_eq!(s.background().pattern, PatternKind::Chevron);
        assert!(s
            .background_style()
            .css()
            .contains("background-image:"));
    }

    #[test]
    fn persisted_state_outlives_the_studio() {
        let store = memory_store();
        {
            let mut s = Studio::with_store(store.clone(), VIEWPORT);
            s.set_link(Platform::X, "https://x.com/ada");
            s.widget_wheel(-100.0);
        }
        let s = Studio::with_store(store, VIEWPORT);
        assert_eq!(s.social_links().x, "https://x.com/ada");
        assert_eq!(s.widget().size, 42.0);
    }
}
