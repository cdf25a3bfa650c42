//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields so partial YAML files fill in the rest.

pub fn screen_width() -> u32 {
    1200
}

pub fn screen_height() -> u32 {
    800
}

pub fn frame_rate() -> u32 {
    60
}

pub fn physics_rate() -> u32 {
    120
}
