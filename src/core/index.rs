// File: src/core/index.rs
use crate::config::EngineConfig;
use crate::core::types::{AnnotatedVerseText, RuleAnnotation, VerseKey};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

/// Annotation record as stored in the cpfair dataset.
#[derive(Debug, Deserialize)]
struct RawVerseRecord {
    surah: u16,
    ayah: u16,
    #[serde(default)]
    annotations: Vec<RawAnnotation>,
}

/// Offsets are signed here so that a bad span drops alone instead of
/// failing the whole dataset.
#[derive(Debug, Deserialize)]
struct RawAnnotation {
    rule: String,
    start: i64,
    end: i64,
}

impl RawAnnotation {
    fn into_annotation(self) -> Option<RuleAnnotation> {
        let start = usize::try_from(self.start).ok()?;
        let end = usize::try_from(self.end).ok()?;
        (start < end).then(|| RuleAnnotation { rule: self.rule, start, end })
    }
}

/// Immutable lookup of verse texts and their character-level rule spans.
/// Built once, then shared read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationIndex {
    texts: HashMap<VerseKey, String>,
    annotations: HashMap<VerseKey, Vec<RuleAnnotation>>,
}

impl AnnotationIndex {
    pub fn new(
        texts: HashMap<VerseKey, String>,
        annotations: HashMap<VerseKey, Vec<RuleAnnotation>>,
    ) -> Self {
        Self { texts, annotations }
    }

    /// Builds the index from the raw contents of both datasets.
    pub fn from_sources(text_raw: &str, annotations_json: &str) -> Result<Self> {
        let texts = parse_text_dataset(text_raw);
        let annotations = parse_annotation_records(annotations_json)?;
        let index = Self::new(texts, annotations);
        log::debug!(
            "annotation index built: {} texts, {} annotated verses, {} joinable",
            index.texts.len(),
            index.annotations.len(),
            index.len()
        );
        Ok(index)
    }

    /// Reads both dataset files named by the config.
    pub fn load(config: &EngineConfig) -> Result<Self> {
        let text_raw = fs::read_to_string(&config.text_path)?;
        let annotations_json = fs::read_to_string(&config.annotations_path)?;
        Self::from_sources(&text_raw, &annotations_json)
    }

    pub fn lookup_text(&self, key: VerseKey) -> Option<&str> {
        self.texts.get(&key).map(String::as_str)
    }

    /// Empty when the verse has no annotation entry.
    pub fn lookup_annotations(&self, key: VerseKey) -> &[RuleAnnotation] {
        self.annotations.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff both a text and an annotation entry (possibly empty) exist.
    pub fn has_data(&self, key: VerseKey) -> bool {
        self.texts.contains_key(&key) && self.annotations.contains_key(&key)
    }

    pub fn annotated(&self, key: VerseKey) -> Option<AnnotatedVerseText> {
        if !self.has_data(key) {
            return None;
        }
        Some(AnnotatedVerseText {
            key,
            text: self.lookup_text(key)?.to_string(),
            annotations: self.lookup_annotations(key).to_vec(),
        })
    }

    /// Number of verses carrying both entries.
    pub fn len(&self) -> usize {
        self.texts.keys().filter(|k| self.annotations.contains_key(k)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses `surah|ayah|text` lines. Only the first two pipes delimit; blank
/// and malformed lines are skipped. A repeated key replaces the earlier one.
pub fn parse_text_dataset(raw: &str) -> HashMap<VerseKey, String> {
    let mut texts = HashMap::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, '|');
        let (Some(surah), Some(ayah), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
            log::warn!("text dataset line {}: expected surah|ayah|text", line_no + 1);
            continue;
        };
        let key = match (surah.trim().parse::<u16>(), ayah.trim().parse::<u16>()) {
            (Ok(s), Ok(a)) => VerseKey::new(s, a),
            _ => {
                log::warn!("text dataset line {}: non-numeric verse key", line_no + 1);
                continue;
            }
        };
        match key {
            Ok(key) => {
                texts.insert(key, text.to_string());
            }
            Err(e) => log::warn!("text dataset line {}: {}", line_no + 1, e),
        }
    }
    texts
}

/// Parses the JSON array of `{surah, ayah, annotations}` records, dropping
/// records with an invalid key and spans with negative or empty ranges.
pub fn parse_annotation_records(json: &str) -> Result<HashMap<VerseKey, Vec<RuleAnnotation>>> {
    let records: Vec<RawVerseRecord> = serde_json::from_str(json)?;
    let mut annotations = HashMap::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        let key = match VerseKey::new(record.surah, record.ayah) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("annotation dataset: {}", e);
                continue;
            }
        };
        let total = record.annotations.len();
        let spans: Vec<RuleAnnotation> = record
            .annotations
            .into_iter()
            .filter_map(RawAnnotation::into_annotation)
            .collect();
        dropped += total - spans.len();
        annotations.insert(key, spans);
    }

    if dropped > 0 {
        log::warn!("annotation dataset: dropped {} malformed spans", dropped);
    }
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: u16, a: u16) -> VerseKey {
        VerseKey::new(s, a).unwrap()
    }

    #[test]
    fn text_dataset_keeps_inner_pipes_and_skips_noise() {
        let raw = "1|1|بِسْمِ اللَّهِ\n\n   \n1|2|a|b|c\nbroken line\nx|1|nope\n0|1|bad surah\n";
        let texts = parse_text_dataset(raw);
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[&key(1, 1)], "بِسْمِ اللَّهِ");
        assert_eq!(texts[&key(1, 2)], "a|b|c");
    }

    #[test]
    fn text_dataset_later_duplicate_wins() {
        let texts = parse_text_dataset("2|1|old\r\n2|1|new\r\n");
        assert_eq!(texts[&key(2, 1)], "new");
    }

    #[test]
    fn annotation_records_default_and_drop_bad_spans() {
        let json = r#"[
            {"surah": 1, "ayah": 1, "annotations": [
                {"rule": "ghunnah", "start": 0, "end": 4},
                {"rule": "ghunnah", "start": -1, "end": 2},
                {"rule": "madd_2", "start": 3, "end": 3}
            ]},
            {"surah": 1, "ayah": 2},
            {"surah": 200, "ayah": 1, "annotations": []}
        ]"#;
        let anns = parse_annotation_records(json).unwrap();
        assert_eq!(anns.len(), 2);
        assert_eq!(anns[&key(1, 1)], vec![RuleAnnotation::new("ghunnah", 0, 4)]);
        assert!(anns[&key(1, 2)].is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_annotation_records("{not json").is_err());
    }

    #[test]
    fn has_data_needs_both_sources() {
        let index = AnnotationIndex::from_sources(
            "1|1|ab cd\n1|2|only text\n",
            r#"[{"surah":1,"ayah":1,"annotations":[]},{"surah":1,"ayah":3,"annotations":[]}]"#,
        )
        .unwrap();

        assert!(index.has_data(key(1, 1)));
        assert!(!index.has_data(key(1, 2)));
        assert!(!index.has_data(key(1, 3)));
        assert_eq!(index.lookup_text(key(1, 2)), Some("only text"));
        assert!(index.lookup_annotations(key(1, 2)).is_empty());
        assert!(index.lookup_annotations(key(9, 9)).is_empty());
        assert_eq!(index.len(), 1);

        let verse = index.annotated(key(1, 1)).unwrap();
        assert_eq!(verse.text, "ab cd");
        assert!(index.annotated(key(1, 2)).is_none());
    }
}
