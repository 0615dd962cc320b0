//! Markdown rendering of managed content blocks.
//!
//! [`BlockRenderer`] turns a frame's extracted specification into the
//! MDX block embedded below each frame marker: an optional heading, a
//! screenshot `<Frame>`, and an `<AccordionGroup>` with one accordion
//! per specification category. Rendering is deterministic so an
//! unchanged specification reproduces the block byte for byte.

pub mod engine;
pub mod error;
pub mod sections;

pub use engine::BlockRenderer;
pub use error::RenderError;
pub use sections::{sections, Section};
