// src/sanitize/entities.rs

//! Entity codec over the five HTML special characters `& < > " '`.
//!
//! The decode table is deliberately tiny: it recognizes exactly the escapes
//! the legacy reporting stack ever produced (named `&amp;` `&lt;` `&gt;`
//! `&quot;` plus numeric references to the five specials) and leaves every
//! other entity as literal text. A general-purpose HTML decoder would also
//! rewrite `&eacute;` and friends, changing observable output.

use std::borrow::Cow;

/// Named entities recognized by [`decode_entities`], terminating `;`
/// included, matched case-sensitively after a `&`.
const NAMED: &[(&str, char)] = &[
    ("amp;", '&'),
    ("lt;", '<'),
    ("gt;", '>'),
    ("quot;", '"'),
];

/// Decode entities for the five special characters. Both quote styles are
/// decodable: `&quot;` by name, `'` only via numeric references (`&#039;`,
/// `&#x27;`, ...) since the legacy stack never emitted `&apos;`. Anything
/// unrecognized stays untouched, `&` included.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match match_entity(candidate) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &candidate[len..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Try to match one entity at the start of `s` (which begins with `&`).
/// Returns the decoded character and the byte length consumed.
fn match_entity(s: &str) -> Option<(char, usize)> {
    let body = &s[1..];
    for (name, ch) in NAMED {
        if body.starts_with(name) {
            return Some((*ch, 1 + name.len()));
        }
    }

    // Numeric reference: &#39; &#039; &#x27; &#X27; ...
    let reference = body.strip_prefix('#')?;
    let (digits, radix, marker_len) = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 1),
        None => (reference, 10, 0),
    };
    let end = digits.find(';')?;
    let run = &digits[..end];
    let digits_ok = !run.is_empty()
        && match radix {
            16 => run.bytes().all(|b| b.is_ascii_hexdigit()),
            _ => run.bytes().all(|b| b.is_ascii_digit()),
        };
    if !digits_ok {
        return None;
    }

    // Leading zeros carry no value; what remains must fit a code point.
    let significant = run.trim_start_matches('0');
    if significant.len() > 7 {
        return None;
    }
    let code = if significant.is_empty() {
        0
    } else {
        u32::from_str_radix(significant, radix).ok()?
    };
    let ch = char::from_u32(code)?;
    if matches!(ch, '&' | '<' | '>' | '"' | '\'') {
        // & + # + optional x + digits + ;
        Some((ch, 2 + marker_len + run.len() + 1))
    } else {
        None
    }
}

/// Escape the five special characters, both quote styles included. The
/// single quote becomes the decimal reference `&#039;`, the canonical form
/// in stored report data.
pub fn encode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
