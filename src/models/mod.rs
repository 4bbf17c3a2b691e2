pub mod background;
pub mod profile;
pub mod social;
pub mod widget;
