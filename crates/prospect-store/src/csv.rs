//! Minimal CSV field escaping for the append-only approved file.
//!
//! RFC 4180 rules: a field containing a comma, quote, or newline is wrapped
//! in quotes with inner quotes doubled.

/// Escapes one field for a CSV row.
#[must_use]
pub fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Joins already-escaped fields into one CSV line (no trailing newline).
#[must_use]
pub fn row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field_is_untouched() {
        assert_eq!(escape("maria.fit"), "maria.fit");
    }

    #[test]
    fn comma_forces_quoting() {
        assert_eq!(escape("fitness, wellness"), "\"fitness, wellness\"");
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape("she said \"hi\""), "\"she said \"\"hi\"\"\"");
    }

    #[test]
    fn newline_forces_quoting() {
        assert_eq!(escape("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn row_joins_fields() {
        let fields = vec!["a".to_owned(), "b,c".to_owned(), "d".to_owned()];
        assert_eq!(row(&fields), "a,\"b,c\",d");
    }
}
