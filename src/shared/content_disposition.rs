//! `Content-Disposition` header values for downloads.

use unicode_normalization::UnicodeNormalization;

/// Build an `attachment` `Content-Disposition` value for `filename`.
///
/// The plain `filename` parameter carries an ASCII fold of the name (NFKD,
/// non-ASCII dropped). When folding changed anything, an RFC 5987
/// `filename*` parameter with the percent-encoded UTF-8 name is appended.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();

    let mut header = format!("attachment; filename=\"{}\"", escape_quoted(&ascii));

    if ascii != filename {
        header.push_str("; filename*=UTF-8''");
        header.push_str(&urlencoding::encode(filename));
    }

    header
}

fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
