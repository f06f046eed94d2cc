//! Best-effort repair of OCR transcriptions into JSON text.
//!
//! Rules are plain substring rewrites tuned against OCR output of rendered
//! JSON reports. Each rule sees the cumulative output of the rules before it.

use tracing::trace;

/// One substring rewrite applied by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementRule {
    pub name: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

const fn rule(name: &'static str, from: &'static str, to: &'static str) -> ReplacementRule {
    ReplacementRule { name, from, to }
}

/// Unconditional rewrites, in application order.
pub const NORMALIZATION_RULES: [ReplacementRule; 7] = [
    // OCR reads quote/brace fragments as a capital I.
    rule("strip_stray_i", "I", ""),
    rule("single_to_double_quote", "'", "\""),
    rule("separate_adjacent_objects", "}{", "}, {"),
    rule("split_doubled_quotes", "\"\"", "\", \""),
    rule("strip_comma_after_open_brace", "{, ", "{"),
    // Also eats real separators between array elements; the extractor
    // rebuilds the array so the loss is harmless there.
    rule("strip_comma_before_open_brace", ", {", "{"),
    rule("separate_spaced_objects", "} {", "}, {"),
];

/// Applied only when the text contains no `[` at all.
pub const BARE_SERIES_OBJECT_RULE: ReplacementRule = rule(
    "wrap_bare_series_object",
    "\"time_series\":{",
    "\"time_series\":[{",
);

pub const CLOSE_SERIES_ARRAY_RULE: ReplacementRule = rule("close_series_array", "}]", "}]}");

/// Applies every repair rule to `raw`. Never fails; empty input stays empty.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_owned();
    for rule in &NORMALIZATION_RULES {
        text = apply_rule(text, rule);
    }

    if !text.contains('[') {
        text = apply_rule(text, &BARE_SERIES_OBJECT_RULE);
    }
    apply_rule(text, &CLOSE_SERIES_ARRAY_RULE)
}

fn apply_rule(text: String, rule: &ReplacementRule) -> String {
    if !text.contains(rule.from) {
        return text;
    }
    let rewritten = text.replace(rule.from, rule.to);
    trace!(
        rule = rule.name,
        before_len = text.len(),
        after_len = rewritten.len(),
        "normalization rule applied"
    );
    rewritten
}
