pub mod engine;
pub mod index;
pub mod matcher;
pub mod payload;
pub mod renderer;
pub mod rules;
pub mod segmenter;
pub mod types;
