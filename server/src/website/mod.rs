//! Tenant website
//!
//! Block-based landing pages: the typed block configs, validation at
//! the editor boundary, and the server-side HTML renderer.

pub mod blocks;
pub mod renderer;

pub use blocks::{Block, CtaBlock, GalleryBlock, HeroBlock, MenuPreviewBlock, validate_blocks};
pub use renderer::{Layout, render_page};
