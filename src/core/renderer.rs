// File: src/core/renderer.rs
use crate::core::rules::{rule_style, RuleStyle};
use crate::core::types::RuleAnnotation;

/// Wraps every annotated span of `text` in a rule-coloured `<span>`.
///
/// Offsets address Unicode code points, so harakat count as characters of
/// their own. Spans are spliced from the highest `start` down, which keeps
/// the offsets of spans not yet processed valid. Unknown rules, zero-width
/// spans and spans running past the text are left unstyled.
///
/// With no annotations the text is returned untouched, which callers use to
/// detect that no tajweed is available.
pub fn render(text: &str, annotations: &[RuleAnnotation]) -> String {
    if annotations.is_empty() {
        return text.to_string();
    }

    let mut sorted: Vec<&RuleAnnotation> = annotations.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    // One piece per code point until a span is spliced in.
    let mut pieces: Vec<String> = text.chars().map(String::from).collect();

    for ann in sorted {
        let Some(style) = rule_style(&ann.rule) else {
            log::trace!("unknown tajweed rule '{}', span left unstyled", ann.rule);
            continue;
        };
        if ann.start >= ann.end || ann.end > pieces.len() {
            log::trace!("malformed span {}..{} for '{}' skipped", ann.start, ann.end, ann.rule);
            continue;
        }

        let segment: String = pieces[ann.start..ann.end].concat();
        let wrapped = format!(
            "<span class=\"tj-{}\" style=\"color:{}\">{}</span>",
            style.css_class, style.color, segment
        );
        pieces.splice(ann.start..ann.end, std::iter::once(wrapped));
    }

    pieces.concat()
}

/// A run of text carrying at most one rule style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: Option<&'static RuleStyle>,
}

/// Partitions `text` into plain and styled runs, with the same skipping
/// rules as [`render`]. Used by outputs that are not HTML.
///
/// Where spans overlap, the one with the lower `start` wins the shared
/// characters, mirroring the outermost wrapper `render` would emit.
pub fn segments(text: &str, annotations: &[RuleAnnotation]) -> Vec<StyledSegment> {
    let chars: Vec<char> = text.chars().collect();
    let mut styles: Vec<Option<&'static RuleStyle>> = vec![None; chars.len()];

    let mut sorted: Vec<&RuleAnnotation> = annotations.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));
    for ann in sorted {
        let Some(style) = rule_style(&ann.rule) else { continue };
        if ann.start >= ann.end || ann.end > chars.len() {
            continue;
        }
        for slot in &mut styles[ann.start..ann.end] {
            *slot = Some(style);
        }
    }

    let mut out: Vec<StyledSegment> = Vec::new();
    for (c, style) in chars.into_iter().zip(styles) {
        match out.last_mut() {
            Some(last) if last.style == style => last.text.push(c),
            _ => out.push(StyledSegment { text: c.to_string(), style }),
        }
    }
    out
}

/// Removes every tag, keeping only the text between them.
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(rule: &str, start: usize, end: usize) -> RuleAnnotation {
        RuleAnnotation::new(rule, start, end)
    }

    #[test]
    fn no_annotations_is_passthrough() {
        assert_eq!(render("", &[]), "");
        assert_eq!(render("a < b & c", &[]), "a < b & c");
        assert_eq!(render("بِسْمِ", &[]), "بِسْمِ");
    }

    #[test]
    fn bismillah_ghunnah_scenario() {
        let text = "بِسْمِ اللَّهِ";
        let out = render(text, &[ann("ghunnah", 0, 4)]);

        let head: String = text.chars().take(4).collect();
        let tail: String = text.chars().skip(4).collect();
        assert_eq!(
            out,
            format!("<span class=\"tj-ghunnah\" style=\"color:#169200\">{}</span>{}", head, tail)
        );
        assert_eq!(strip_markup(&out), text);
    }

    #[test]
    fn offsets_are_code_points_not_bytes() {
        // Every letter here carries a diacritic, so bytes and code points diverge.
        let text = "بِسْمِ";
        assert_eq!(text.chars().count(), 6);
        let out = render(text, &[ann("qalqalah", 2, 4)]);
        assert_eq!(
            out,
            "بِ<span class=\"tj-qalqalah\" style=\"color:#26BFFD\">سْ</span>مِ"
        );
    }

    #[test]
    fn unknown_rule_leaves_text_untouched() {
        let text = "بِسْمِ اللَّهِ";
        assert_eq!(render(text, &[ann("xyz_unrecognized", 0, 4)]), text);
    }

    #[test]
    fn zero_width_and_overlong_spans_are_skipped() {
        assert_eq!(render("abcd", &[ann("ghunnah", 2, 2)]), "abcd");
        assert_eq!(render("abcd", &[ann("ghunnah", 3, 9)]), "abcd");
        // A bad span does not stop the good ones.
        let out = render("abcd", &[ann("ghunnah", 3, 9), ann("ikhfa", 0, 1)]);
        assert_eq!(out, "<span class=\"tj-ikhfa\" style=\"color:#169200\">a</span>bcd");
    }

    #[test]
    fn content_is_preserved_in_any_input_order() {
        let text = "اللَّهِ الرَّحْمَٰنِ";
        let forward = vec![ann("lam_shamsiyyah", 1, 2), ann("madd_2", 5, 7), ann("ghunnah", 10, 13)];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = render(text, &forward);
        let b = render(text, &reversed);
        assert_eq!(a, b);
        assert_eq!(strip_markup(&a), text);
        assert_eq!(a.matches("<span").count(), 3);
    }

    #[test]
    fn adjacent_spans_each_get_a_wrapper() {
        let out = render("abcd", &[ann("ghunnah", 0, 2), ann("iqlab", 2, 4)]);
        assert_eq!(
            out,
            "<span class=\"tj-ghunnah\" style=\"color:#169200\">ab</span>\
             <span class=\"tj-iqlab\" style=\"color:#58B800\">cd</span>"
        );
    }

    #[test]
    fn segments_partition_the_text() {
        let segs = segments("abcdef", &[ann("ghunnah", 1, 3), ann("nope", 4, 5)]);
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "bc", "def"]);
        assert_eq!(segs[1].style.map(|s| s.css_class), Some("ghunnah"));
        assert!(segs[0].style.is_none() && segs[2].style.is_none());
    }

    #[test]
    fn strip_markup_keeps_bare_text() {
        assert_eq!(strip_markup("<span class=\"x\">ab</span>c"), "abc");
    }
}
