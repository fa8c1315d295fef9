//! Rewrites raw recognizer output into the notation the parser accepts.
//!
//! Handwriting recognizers tend to read a multiplication cross as the letter
//! `x` and keep typographic glyphs for multiply and divide. Normalization maps
//! those onto `*` and `/` and leaves everything else for the parser to judge.

/// Glyph substitutions, applied after lowercasing and in this order.
const SUBSTITUTIONS: &[(char, char)] = &[('x', '*'), ('×', '*'), ('÷', '/')];

/// Normalize recognized text.
///
/// Lowercases the whole string, then replaces `x` and `×` with `*` and `÷`
/// with `/`. Never fails; the result may still be syntactically invalid.
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();

    lower
        .chars()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |&(_, to)| to)
        })
        .collect()
}
