// File: src/core/segmenter.rs
use crate::core::index::AnnotationIndex;
use crate::core::renderer::render;
use crate::core::types::{RuleAnnotation, VerseKey, WordUnit};

/// Splits a verse into words and renders each word with the part of every
/// annotation that falls inside it.
///
/// Words are assumed to be joined by exactly one space in `text`, so the
/// running offset advances by `len(word) + 1`. A span crossing a word
/// boundary is clamped on each side independently; the separating space is
/// never wrapped. Spans running past the end of the verse are dropped
/// before splitting, as [`render`] drops them for the whole verse.
pub fn segment_words(text: &str, annotations: &[RuleAnnotation]) -> Vec<WordUnit> {
    let text_len = text.chars().count();
    let valid: Vec<RuleAnnotation> = annotations
        .iter()
        .filter(|ann| ann.start < ann.end && ann.end <= text_len)
        .cloned()
        .collect();

    let mut words = Vec::new();
    let mut char_offset = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let word_end = char_offset + word_len;

        let local = localize(&valid, char_offset, word_end);
        words.push(WordUnit {
            text: word.to_string(),
            markup: render(word, &local),
        });

        char_offset = word_end + 1;
    }

    words
}

/// Re-expresses the annotations overlapping `[word_start, word_end)`
/// relative to the word, clamped to its bounds.
fn localize(annotations: &[RuleAnnotation], word_start: usize, word_end: usize) -> Vec<RuleAnnotation> {
    annotations
        .iter()
        .filter(|ann| ann.start < word_end && ann.end > word_start)
        .map(|ann| RuleAnnotation {
            rule: ann.rule.clone(),
            start: ann.start.saturating_sub(word_start),
            end: ann.end.min(word_end) - word_start,
        })
        .collect()
}

/// Word list of a verse with per-word markup, or `None` if the index has no
/// data for `key`.
pub fn segment_with_tajweed(index: &AnnotationIndex, key: VerseKey) -> Option<Vec<WordUnit>> {
    if !index.has_data(key) {
        return None;
    }
    let text = index.lookup_text(key)?;
    Some(segment_words(text, index.lookup_annotations(key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::renderer::strip_markup;

    const GHUNNAH_OPEN: &str = "<span class=\"tj-ghunnah\" style=\"color:#169200\">";

    #[test]
    fn span_across_the_space_is_clamped_per_word() {
        let words = segment_words("ab cd", &[RuleAnnotation::new("ghunnah", 1, 4)]);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "ab");
        assert_eq!(words[0].markup, format!("a{}b</span>", GHUNNAH_OPEN));
        assert_eq!(words[1].text, "cd");
        assert_eq!(words[1].markup, format!("{}c</span>d", GHUNNAH_OPEN));
    }

    #[test]
    fn localize_clamps_both_sides() {
        let anns = [RuleAnnotation::new("ghunnah", 1, 4)];
        assert_eq!(localize(&anns, 0, 2), vec![RuleAnnotation::new("ghunnah", 1, 2)]);
        assert_eq!(localize(&anns, 3, 5), vec![RuleAnnotation::new("ghunnah", 0, 1)]);
        // Touching but not overlapping.
        assert!(localize(&anns, 4, 6).is_empty());
    }

    #[test]
    fn word_count_matches_plain_text() {
        let text = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
        let words = segment_words(text, &[]);
        assert_eq!(words.len(), 4);
        for (unit, plain) in words.iter().zip(text.split(' ')) {
            assert_eq!(unit.text, plain);
            assert_eq!(unit.markup, plain);
        }
    }

    #[test]
    fn offsets_follow_code_points_across_words() {
        let text = "بِسْمِ اللَّهِ";
        let second_start = text.split(' ').next().unwrap().chars().count() + 1;
        let words = segment_words(
            text,
            &[RuleAnnotation::new("lam_shamsiyyah", second_start + 1, second_start + 2)],
        );
        assert_eq!(words[0].markup, words[0].text);
        assert!(words[1].markup.contains("tj-lam_shamsiyyah"));
        assert_eq!(strip_markup(&words[1].markup), words[1].text);
    }

    #[test]
    fn span_past_the_verse_end_is_dropped_like_render() {
        let anns = [RuleAnnotation::new("ghunnah", 3, 9)];
        assert_eq!(render("ab cd", &anns), "ab cd");

        let words = segment_words("ab cd", &anns);
        assert_eq!(words[0].markup, "ab");
        assert_eq!(words[1].markup, "cd");
    }

    #[test]
    fn empty_text_yields_no_words() {
        assert!(segment_words("", &[RuleAnnotation::new("ghunnah", 0, 1)]).is_empty());
    }
}
