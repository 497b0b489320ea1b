//! Character reference decoding.
//!
//! Decoding is one left-to-right pass over the text: the output of a
//! reference is never scanned again. That is what keeps `&amp;` safe to use
//! as an escape for the other references (`&amp;lt;` is the literal `&lt;`,
//! never `<`), with no ordering games between table entries.
//!
//! The same rule applies to numeric references: `&amp;#65;` decodes to the
//! literal `&#65;`, not `A`, even though a named-then-numeric two-sweep
//! decoder would produce `A`. A password containing the text `&#65;` must
//! come out unchanged.
//!
//! Soft hyphens (`&shy;`, `&#173;`, `&#xAD;`, or a raw U+00AD) are line-break
//! hints that the page drops into long passwords. They decode to nothing.

use regex::Captures;
use tracing::trace;

const SOFT_HYPHEN: char = '\u{AD}';

/// Named references the page uses. Anything else is left verbatim.
const NAMED: &[(&str, &str)] = &[
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", " "),
    ("shy", ""),
    ("amp", "&"),
];

pub fn decode_entities(text: &str) -> String {
    let mut decoded = 0usize;
    let out = regex!(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);").replace_all(text, |caps: &Captures<'_>| {
        match decode_reference(&caps[1]) {
            Some(value) => {
                decoded += 1;
                value
            }
            None => caps[0].to_owned(),
        }
    });

    trace!(target: "passgrab", decoded, "decoded character references");

    if out.contains(SOFT_HYPHEN) { out.replace(SOFT_HYPHEN, "") } else { out.into_owned() }
}

/// Expand the body of one reference (`lt`, `#39`, `#x7B`). `None` leaves the
/// reference untouched.
fn decode_reference(body: &str) -> Option<String> {
    let Some(number) = body.strip_prefix('#') else {
        return NAMED.iter().find(|(name, _)| *name == body).map(|(_, value)| (*value).to_owned());
    };

    let value = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    let c = char::from_u32(value)?;

    Some(if c == SOFT_HYPHEN { String::new() } else { c.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_table() {
        let cases = [
            ("&lt;", "<"),
            ("&gt;", ">"),
            ("&quot;", "\""),
            ("&#39;", "'"),
            ("&apos;", "'"),
            ("&#96;", "`"),
            ("&#124;", "|"),
            ("&nbsp;", " "),
            ("&shy;", ""),
            ("&#173;", ""),
            ("&amp;", "&"),
        ];
        for (input, expected) in cases {
            assert_eq!(decode_entities(input), expected, "input: {input}");
        }
    }

    #[test]
    fn amp_is_never_decoded_twice() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;#65;"), "&#65;");
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
    }

    #[test]
    fn numeric_references() {
        assert_eq!(decode_entities("&#123;&#x7B;&#X7b;"), "{{{");
        assert_eq!(decode_entities("&#65;&#x42;C"), "ABC");
    }

    #[test]
    fn invalid_codepoints_stay_verbatim() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#x110000;"), "&#x110000;");
        assert_eq!(decode_entities("&#99999999999999;"), "&#99999999999999;");
    }

    #[test]
    fn soft_hyphens_vanish() {
        assert_eq!(decode_entities("AB&shy;CD&#xAD;EF&#173;GH\u{AD}IJ"), "ABCDEFGHIJ");
    }

    #[test]
    fn unknown_and_bare_ampersands_are_kept() {
        assert_eq!(decode_entities("&copy; a & b &;"), "&copy; a & b &;");
        assert_eq!(decode_entities("&lt"), "&lt");
    }
}
