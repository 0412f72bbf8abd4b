// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::config::EngineConfig;
pub use crate::core::engine::TajweedEngine;
pub use crate::core::index::AnnotationIndex;
pub use crate::core::renderer::render;
pub use crate::core::types::{ExternalWord, MatchedWord, RuleAnnotation, VerseKey, WordUnit};
pub use crate::error::{Result, TajweedError};
