/// Presence check for required text fields: the field must be supplied and
/// non-empty. Whitespace is not trimmed; the stored value is exactly what
/// the client sent.
pub fn text_present(value: &Option<String>) -> bool {
    matches!(value, Some(text) if !text.is_empty())
}
