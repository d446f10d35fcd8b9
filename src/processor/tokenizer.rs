use memchr::memchr2_iter;

use crate::processor::Row;

/// Splits one CSV line into fields.
///
/// A comma separates fields only when an even number of `"` characters
/// precede it on the line. Quotes are kept verbatim in the field and there is
/// no escaped-quote handling, so `"a,b"` stays one field including its quotes.
pub fn split_line(line: &str) -> Row {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    // `,` and `"` are ASCII so every hit is a char boundary
    for pos in memchr2_iter(b',', b'"', bytes) {
        match bytes[pos] {
            b'"' => in_quotes = !in_quotes,
            _ if !in_quotes => {
                fields.push(line[field_start..pos].to_string());
                field_start = pos + 1;
            }
            _ => {}
        }
    }
    fields.push(line[field_start..].to_string());

    fields
}

/// True for lines the loader skips
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(split_line("RI,White,1058.47"), vec!["RI", "White", "1058.47"]);
    }

    #[test]
    fn test_quoted_comma_stays_in_field() {
        let row = split_line("RI,White,\" $1,058.47 \",395773.6521, $1.00 ,75%");
        assert_eq!(
            row,
            vec!["RI", "White", "\" $1,058.47 \"", "395773.6521", " $1.00 ", "75%"]
        );
    }

    #[test]
    fn test_trailing_empty_fields_kept() {
        assert_eq!(split_line("a,b,"), vec!["a", "b", ""]);
        assert_eq!(split_line(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_unbalanced_quote_swallows_rest() {
        // an odd quote count keeps every later comma inside the field
        assert_eq!(split_line("a,\"b,c,d"), vec!["a", "\"b,c,d"]);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(split_line("ü,\"é,è\",ñ"), vec!["ü", "\"é,è\"", "ñ"]);
    }

    #[test]
    fn test_blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(","));
    }
}
