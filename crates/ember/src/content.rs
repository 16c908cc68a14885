pub mod article;
pub mod discovery;
