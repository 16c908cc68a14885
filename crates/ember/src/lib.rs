pub mod build;
pub mod config;
pub mod content;
pub mod excerpt;
pub mod input;
pub mod output;
pub mod render;

mod markdown;

pub use build::build;
pub use excerpt::excerpt;
pub use render::block::{Block, HeadingLevel};
pub use render::markdown::{MarkdownConverter, Options, convert};
