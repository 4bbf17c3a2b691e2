//! Persisted customization core for a link-in-bio page studio.
//!
//! State is split into independent domains (background, profile, social
//! links, widget placement), each stored as one JSON document under a fixed
//! key. [`Studio`] ties the domains together for an embedding shell.

pub mod boot;
pub mod config;
pub mod db;
pub mod domain;
pub mod images;
pub mod interaction;
pub mod models;
pub mod store;
pub mod studio;
pub mod style;


pub use config::AppConfig;
pub use models::widget::Viewport;
pub use studio::Studio;
