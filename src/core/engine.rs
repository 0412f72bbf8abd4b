use crate::core::index::AnnotationIndex;
use crate::core::matcher;
use crate::core::renderer::render;
use crate::core::rules::{self, LegendEntry};
use crate::core::segmenter::segment_with_tajweed;
use crate::core::types::{ExternalWord, MatchedWord, VerseKey, WordUnit};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::persistence::{load_snapshot, save_snapshot, SourceFingerprint};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// The engine owns the immutable index plus a per-verse word cache.
// Cached values are pure functions of the index, so the cache may be
// dropped or raced on first fill without affecting results.
pub struct TajweedEngine {
    index: AnnotationIndex,
    word_cache: RwLock<HashMap<VerseKey, Arc<Vec<WordUnit>>>>,
}

impl TajweedEngine {
    pub fn new(index: AnnotationIndex) -> Self {
        log::debug!("tajweed engine ready with {} verses", index.len());
        Self {
            index,
            word_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Loads the index from the snapshot when one is configured and was
    /// built from the current datasets, otherwise parses the datasets and
    /// refreshes the snapshot.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let Some(path) = &config.snapshot_path else {
            return Ok(Self::new(AnnotationIndex::load(config)?));
        };

        let fingerprint = SourceFingerprint::of(config)?;
        match load_snapshot(path, &fingerprint) {
            Ok(index) => {
                log::info!("loaded index snapshot from {}", path.display());
                return Ok(Self::new(index));
            }
            Err(e) => log::info!("no usable snapshot at {} ({}), rebuilding", path.display(), e),
        }

        let index = AnnotationIndex::load(config)?;
        if let Err(e) = save_snapshot(&index, &fingerprint, path) {
            log::warn!("could not write index snapshot to {}: {}", path.display(), e);
        }
        Ok(Self::new(index))
    }

    pub fn index(&self) -> &AnnotationIndex {
        &self.index
    }

    /// Per-word markup of a verse, computed once per key.
    pub fn verse_words(&self, key: VerseKey) -> Option<Arc<Vec<WordUnit>>> {
        if let Some(words) = self.read_cache().get(&key) {
            return Some(Arc::clone(words));
        }

        let words = Arc::new(segment_with_tajweed(&self.index, key)?);
        let mut cache = self.word_cache.write().unwrap_or_else(|e| e.into_inner());
        Some(Arc::clone(cache.entry(key).or_insert(words)))
    }

    pub fn attach_tajweed(&self, key: VerseKey, external: Vec<ExternalWord>) -> Vec<MatchedWord> {
        let words = self.verse_words(key);
        matcher::attach_tajweed(words.as_deref().map(Vec::as_slice), external)
    }

    /// Whole-verse markup, or `None` if the verse has no tajweed data.
    pub fn verse_markup(&self, key: VerseKey) -> Option<String> {
        if !self.index.has_data(key) {
            return None;
        }
        let text = self.index.lookup_text(key)?;
        Some(render(text, self.index.lookup_annotations(key)))
    }

    /// Whole-verse markup, falling back to the external words (end markers
    /// excluded) joined by single spaces.
    pub fn verse_markup_or_plain(&self, key: VerseKey, external: &[ExternalWord]) -> String {
        self.verse_markup(key).unwrap_or_else(|| {
            external
                .iter()
                .filter(|w| !w.is_end_marker)
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        rules::legend()
    }

    pub fn cached_verses(&self) -> usize {
        self.read_cache().len()
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<VerseKey, Arc<Vec<WordUnit>>>> {
        self.word_cache.read().unwrap_or_else(|e| e.into_inner())
    }
}
