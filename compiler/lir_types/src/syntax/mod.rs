//! Lexical helpers shared by every printer of the textual IR.
//!
//! Identifiers and string literals follow the assembly writer's rules:
//! printable ASCII other than `"` and `\` is written as-is, every other byte
//! as `\XX` with two uppercase hex digits.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Append `bytes` escaped for use inside a quoted string or `c"..."` literal.
pub fn push_escaped(buf: &mut String, bytes: &[u8]) {
    for &b in bytes {
        if (0x20..0x7F).contains(&b) && b != b'\\' && b != b'"' {
            buf.push(char::from(b));
        } else {
            buf.push('\\');
            buf.push(char::from(HEX[usize::from(b >> 4)]));
            buf.push(char::from(HEX[usize::from(b & 0x0F)]));
        }
    }
}

/// Whether `name` must be quoted when printed after a sigil.
///
/// A name is quoted if it starts with a digit (it would read as a slot
/// number) or contains anything besides ASCII alphanumerics, `-`, `$`, `.`, `_`.
pub fn needs_quotes(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.first() {
        None => true,
        Some(first) if first.is_ascii_digit() => true,
        Some(_) => !bytes
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'$' | b'.' | b'_')),
    }
}

/// Append `sigil` followed by `name`, quoting and escaping when required.
pub fn push_name(buf: &mut String, sigil: char, name: &str) {
    buf.push(sigil);
    if needs_quotes(name) {
        buf.push('"');
        push_escaped(buf, name.as_bytes());
        buf.push('"');
    } else {
        buf.push_str(name);
    }
}
