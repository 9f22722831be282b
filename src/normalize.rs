/// Glyphs of calculator keyboards and their canonical counterparts. The replacements are
/// applied in this order.
const SUBSTITUTIONS: [(char, &str); 5] = [
    ('\u{00d7}', "*"),  // multiplication sign
    ('\u{00f7}', "/"),  // division sign
    ('\u{2013}', "-"),  // en dash
    ('\u{2014}', "-"),  // em dash
    ('^', "**"),
];

/// Rewrites user-facing symbols into the operator tokens understood by the parser. All
/// other characters are left untouched.
///
/// ```rust
/// use safecalc::normalize;
/// assert_eq!(normalize("3×4÷2^2 – 1"), "3*4/2**2 - 1");
/// ```
pub fn normalize(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (glyph, canonical)| {
            if acc.contains(*glyph) {
                acc.replace(*glyph, canonical)
            } else {
                acc
            }
        })
}
