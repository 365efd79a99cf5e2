// src/export/mod.rs
pub mod png;

pub use png::{render_image, save_png};
