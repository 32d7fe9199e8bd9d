//! Output escaping for record values.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'` so a value is inert inside HTML text
/// and quoted attributes.
///
/// Entities already present in `text` are decoded first, so `&amp;` stays
/// `&amp;` instead of becoming `&amp;amp;`.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    match html_escape::decode_html_entities(text) {
        Cow::Borrowed(raw) => html_escape::encode_quoted_attribute(raw),
        Cow::Owned(decoded) => {
            Cow::Owned(html_escape::encode_quoted_attribute(&decoded).into_owned())
        }
    }
}
