// src/core/types.rs
use crate::error::{Result, TajweedError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SURAH_COUNT: u16 = 114;

/// Identifier of a tajweed rule as it appears in the annotation dataset.
/// Kept as a free-form string: unknown ids must survive loading.
pub type RuleId = String;

/// Identity of a verse, the join key between both data sources.
/// Serialized in its `surah:ayah` form; deserializing goes through the
/// same range checks as [`VerseKey::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VerseKey {
    surah: u16,
    ayah: u16,
}

impl VerseKey {
    pub fn new(surah: u16, ayah: u16) -> Result<Self> {
        if surah == 0 || surah > SURAH_COUNT || ayah == 0 {
            return Err(TajweedError::InvalidVerseKey(format!("{}:{}", surah, ayah)));
        }
        Ok(Self { surah, ayah })
    }

    pub fn surah(&self) -> u16 {
        self.surah
    }

    pub fn ayah(&self) -> u16 {
        self.ayah
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = TajweedError;

    /// Parses the `surah:ayah` form used by the verse APIs, e.g. `2:255`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TajweedError::InvalidVerseKey(s.to_string());
        let (surah, ayah) = s.trim().split_once(':').ok_or_else(invalid)?;
        let surah = surah.trim().parse().map_err(|_| invalid())?;
        let ayah = ayah.trim().parse().map_err(|_| invalid())?;
        VerseKey::new(surah, ayah)
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for VerseKey {
    type Error = TajweedError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A rule span over a verse's plain text.
/// Offsets count Unicode code points, `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAnnotation {
    pub rule: RuleId,
    pub start: usize,
    pub end: usize,
}

impl RuleAnnotation {
    pub fn new(rule: impl Into<RuleId>, start: usize, end: usize) -> Self {
        Self { rule: rule.into(), start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedVerseText {
    pub key: VerseKey,
    pub text: String,
    pub annotations: Vec<RuleAnnotation>,
}

/// One whitespace-delimited word of a verse with its own standalone markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordUnit {
    pub text: String,
    pub markup: String,
}

/// A word as segmented by the external verse API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalWord {
    pub text: String,
    pub is_end_marker: bool,
    pub line_number: u32,
    pub position: u32,
    pub verse_key: VerseKey,
}

/// An external word with the tajweed markup of its source-A counterpart.
/// `tajweed_markup` is `None` for end markers and verses without data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedWord {
    #[serde(flatten)]
    pub word: ExternalWord,
    pub tajweed_markup: Option<String>,
}
