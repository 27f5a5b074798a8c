//! Component kit shared by the Mero Samaj pages.
//!
//! Each component lives in `components/<name>/` with its stylesheet next to it.
//! Global tokens (colors, spacing, radii) come from `assets/theme.css` in the app.

pub mod components;

pub use components::*;
