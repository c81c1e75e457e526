// src/output/mod.rs
//! Turning batches and products into terminal text.
//!
//! Rendering (pure, template-driven) is kept apart from writing, which is
//! the only place that touches stdout.

mod render;
mod writer;

pub use render::ResultRenderer;
pub use writer::write_block;
