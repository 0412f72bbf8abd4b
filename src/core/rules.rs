// File: src/core/rules.rs
use serde::Serialize;

/// Display attributes of a tajweed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStyle {
    pub css_class: &'static str,
    pub color: &'static str,
    pub display_name: &'static str,
}

const fn style(css_class: &'static str, color: &'static str, display_name: &'static str) -> RuleStyle {
    RuleStyle { css_class, color, display_name }
}

/// Rules of the character-level annotation dataset, in legend order.
pub const TAJWEED_RULES: &[(&str, RuleStyle)] = &[
    // Silent / not pronounced
    ("hamzat_wasl", style("hamzat_wasl", "#AAAAAA", "Hamzat al-Wasl")),
    ("lam_shamsiyyah", style("lam_shamsiyyah", "#AAAAAA", "Lam Shamsiyyah")),
    ("silent", style("silent", "#AAAAAA", "Silent Letter")),
    // Madd, coloured by duration
    ("madd_2", style("madd_normal", "#D4A017", "Madd Normal (2)")),
    ("madd_246", style("madd_permissible", "#FF7E1E", "Madd Permissible (2/4/6)")),
    ("madd_muttasil", style("madd_muttasil", "#DD0008", "Madd Muttasil (4/5)")),
    ("madd_munfasil", style("madd_munfasil", "#FF7E1E", "Madd Munfasil (4/5)")),
    ("madd_6", style("madd_necessary", "#8B0000", "Madd Lazim (6)")),
    ("qalqalah", style("qalqalah", "#26BFFD", "Qalqalah")),
    ("ghunnah", style("ghunnah", "#169200", "Ghunnah")),
    ("ikhfa", style("ikhfa", "#169200", "Ikhfa")),
    ("ikhfa_shafawi", style("ikhfa_shafawi", "#169777", "Ikhfa Shafawi")),
    ("idghaam_ghunnah", style("idghaam_ghunnah", "#169777", "Idghaam with Ghunnah")),
    ("idghaam_no_ghunnah", style("idghaam_no_ghunnah", "#169200", "Idghaam without Ghunnah")),
    ("idghaam_shafawi", style("idghaam_shafawi", "#58B800", "Idghaam Shafawi")),
    ("idghaam_mutajanisayn", style("idghaam_mutajanisayn", "#A1A1A1", "Idghaam Mutajanisayn")),
    ("idghaam_mutaqaribayn", style("idghaam_mutaqaribayn", "#A1A1A1", "Idghaam Mutaqaribayn")),
    ("iqlab", style("iqlab", "#58B800", "Iqlab")),
];

/// Classes emitted inside `<tajweed class=...>` tags by the Quran.com API.
pub const QURAN_COM_CLASSES: &[(&str, RuleStyle)] = &[
    ("ham_wasl", style("ham_wasl", "#AAAAAA", "Hamza Wasl")),
    ("slnt", style("slnt", "#AAAAAA", "Silent")),
    ("laam_shamsiyah", style("laam_shamsiyah", "#AAAAAA", "Lam Shamsiyya")),
    ("madda_normal", style("madda_normal", "#537FFF", "Madd Normal")),
    ("madda_permissible", style("madda_permissible", "#4DBA6F", "Madd Permissible")),
    ("madda_obligatory", style("madda_obligatory", "#000EAD", "Madd Obligatory")),
    ("madda_necessary", style("madda_necessary", "#DD2222", "Madd Necessary")),
    ("qalpieces", style("qalpieces", "#DD2222", "Qalqala")),
    ("ikhf_shfw", style("ikhf_shfw", "#D500B7", "Ikhfa Shafawi")),
    ("ikhf", style("ikhf", "#9400A8", "Ikhfa")),
    ("idghm_shfw", style("idghm_shfw", "#58B800", "Idgham Shafawi")),
    ("iqlb", style("iqlb", "#26BFFD", "Iqlab")),
    ("idgh_ghn", style("idgh_ghn", "#169777", "Idgham with Ghunna")),
    ("idgh_w_ghn", style("idgh_w_ghn", "#169200", "Idgham without Ghunna")),
    ("idgh_mus", style("idgh_mus", "#A1A1A1", "Idgham Mutajanisayn")),
    ("ghn", style("ghn", "#FF7E1E", "Ghunna")),
];

pub fn rule_style(id: &str) -> Option<&'static RuleStyle> {
    TAJWEED_RULES.iter().find(|(rule, _)| *rule == id).map(|(_, s)| s)
}

pub fn quran_com_class(class: &str) -> Option<&'static RuleStyle> {
    QURAN_COM_CLASSES.iter().find(|(c, _)| *c == class).map(|(_, s)| s)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub id: &'static str,
    pub css_class: &'static str,
    pub color: &'static str,
    pub display_name: &'static str,
}

/// All known rules with their display attributes, for UI legends.
pub fn legend() -> Vec<LegendEntry> {
    TAJWEED_RULES
        .iter()
        .map(|&(id, s)| LegendEntry {
            id,
            css_class: s.css_class,
            color: s.color,
            display_name: s.display_name,
        })
        .collect()
}

/// Parses a `#RRGGBB` colour into its components.
pub fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
