// File: src/core/matcher.rs
use crate::core::types::{ExternalWord, MatchedWord, WordUnit};

/// Attaches source-A markup to the external API's words by ordinal position.
///
/// End markers never consume a source-A word and get no markup. If source A
/// runs out of words, the remaining external words fall back to their own
/// plain text. The output always has the length and order of `external`.
pub fn attach_tajweed(words: Option<&[WordUnit]>, external: Vec<ExternalWord>) -> Vec<MatchedWord> {
    let Some(words) = words else {
        return external
            .into_iter()
            .map(|word| MatchedWord { word, tajweed_markup: None })
            .collect();
    };

    let mut cursor = 0usize;
    let mut short = 0usize;
    let matched: Vec<MatchedWord> = external
        .into_iter()
        .map(|word| {
            let tajweed_markup = if word.is_end_marker {
                None
            } else if let Some(unit) = words.get(cursor) {
                cursor += 1;
                Some(unit.markup.clone())
            } else {
                short += 1;
                Some(word.text.clone())
            };
            MatchedWord { word, tajweed_markup }
        })
        .collect();

    if short > 0 {
        if let Some(first) = matched.first() {
            log::debug!(
                "verse {}: {} external words past the annotated text, left plain",
                first.word.verse_key,
                short
            );
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VerseKey;

    fn external(text: &str, position: u32, is_end_marker: bool) -> ExternalWord {
        ExternalWord {
            text: text.to_string(),
            is_end_marker,
            line_number: 1,
            position,
            verse_key: VerseKey::new(1, 1).unwrap(),
        }
    }

    fn unit(text: &str) -> WordUnit {
        WordUnit { text: text.to_string(), markup: format!("<b>{}</b>", text) }
    }

    fn markups(matched: &[MatchedWord]) -> Vec<Option<&str>> {
        matched.iter().map(|m| m.tajweed_markup.as_deref()).collect()
    }

    #[test]
    fn end_marker_does_not_consume_a_word() {
        let units = [unit("a"), unit("b"), unit("c")];
        let ext = vec![
            external("w0", 1, false),
            external("w1", 2, false),
            external("١", 3, true),
            external("w2", 4, false),
        ];
        let matched = attach_tajweed(Some(&units[..]), ext);
        assert_eq!(
            markups(&matched),
            vec![Some("<b>a</b>"), Some("<b>b</b>"), None, Some("<b>c</b>")]
        );
    }

    #[test]
    fn missing_source_words_degrade_to_plain_text() {
        let units = [unit("a")];
        let matched = attach_tajweed(Some(&units[..]), vec![external("w0", 1, false), external("w1", 2, false)]);
        assert_eq!(markups(&matched), vec![Some("<b>a</b>"), Some("w1")]);
    }

    #[test]
    fn no_data_leaves_every_word_unmarked() {
        let ext = vec![external("w0", 1, false), external("١", 2, true)];
        let matched = attach_tajweed(None, ext.clone());
        assert_eq!(markups(&matched), vec![None, None]);
        let words: Vec<ExternalWord> = matched.into_iter().map(|m| m.word).collect();
        assert_eq!(words, ext);
    }

    #[test]
    fn extra_source_words_are_ignored() {
        let units = [unit("a"), unit("b")];
        let matched = attach_tajweed(Some(&units[..]), vec![external("w0", 1, false)]);
        assert_eq!(markups(&matched), vec![Some("<b>a</b>")]);
    }
}
