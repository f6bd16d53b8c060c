pub mod canvas;
pub mod error;
pub mod filter;
pub mod form;
pub mod glyph;
pub mod highlight;
pub mod models;
pub mod video;
pub mod votes;
pub mod workflow;
