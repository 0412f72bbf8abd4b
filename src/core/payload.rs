// File: src/core/payload.rs
//! Shapes of the word-segmented verse API (`verses/by_page?words=true`).
//! Fetching is the caller's job; this only maps decoded payloads.

use crate::core::types::{ExternalWord, VerseKey};
use crate::error::Result;
use serde::Deserialize;

const END_MARKER_TYPE: &str = "end";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiWord {
    pub text_uthmani: String,
    #[serde(default)]
    pub char_type_name: String,
    pub line_number: u32,
    pub position: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVerse {
    pub verse_key: String,
    #[serde(default)]
    pub words: Vec<ApiWord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage {
    pub verses: Vec<ApiVerse>,
}

impl ApiVerse {
    pub fn key(&self) -> Result<VerseKey> {
        self.verse_key.parse()
    }

    pub fn external_words(&self) -> Result<Vec<ExternalWord>> {
        let verse_key = self.key()?;
        Ok(self
            .words
            .iter()
            .map(|w| ExternalWord {
                text: w.text_uthmani.clone(),
                is_end_marker: w.char_type_name == END_MARKER_TYPE,
                line_number: w.line_number,
                position: w.position,
                verse_key,
            })
            .collect())
    }
}

impl ApiPage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
