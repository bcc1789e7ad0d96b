//! Text escaping for SpreadsheetML
//!
//! Two layers apply to cell text: XML entity escaping, and Excel's own
//! `_xHHHH_` escapes for characters XML 1.0 cannot carry (most control
//! characters) or that XML parsers normalise away (`\r`).

/// Escape the five XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Does `s` start with an `_xHHHH_` sequence?
fn starts_with_excel_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[0] == b'_'
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Encode text with Excel's `_xHHHH_` escapes
///
/// Control characters other than tab and line feed are escaped, and a
/// literal underscore that would otherwise read back as the start of an
/// escape is itself escaped as `_x005F_`.
pub(crate) fn encode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for (i, c) in s.char_indices() {
        if c == '_' && starts_with_excel_escape(&s[i..]) {
            result.push_str("_x005F_");
        } else if (c as u32) < 0x20 && c != '\t' && c != '\n' {
            result.push_str(&format!("_x{:04X}_", c as u32));
        } else {
            result.push(c);
        }
    }

    result
}

/// Decode Excel's `_xHHHH_` escape sequences
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        // Check if this looks like _xHHHH_
        let mut hex_chars = String::new();
        let mut saw_x = false;
        let mut decoded = None;

        if chars.peek() == Some(&'x') {
            chars.next();
            saw_x = true;

            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next();
                decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
            }
        }

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                // Not a valid escape sequence, output what we consumed
                result.push('_');
                if saw_x {
                    result.push('x');
                    result.push_str(&hex_chars);
                }
            }
        }
    }

    result
}
