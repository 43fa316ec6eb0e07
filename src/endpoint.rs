/// Build the address of a single document in the store.
///
/// The id is encoded as one path segment: `/`, `:` and spaces are all
/// percent-encoded so the id can never split into several segments.
pub fn document_endpoint(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url, urlencoding::encode(id))
}

/// Prefix of `body` holding at most `max_chars` characters.
pub fn body_preview(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashes_and_spaces_are_encoded() {
        assert_eq!(
            document_endpoint("http://es.local:9200", "http://example.com/a b"),
            "http://es.local:9200/http%3A%2F%2Fexample.com%2Fa%20b"
        );
    }

    #[test]
    fn base_url_is_used_verbatim() {
        assert_eq!(
            document_endpoint("http://es.local:9200/properties/property", "id-1_x.y~z"),
            "http://es.local:9200/properties/property/id-1_x.y~z"
        );
    }

    #[test]
    fn non_ascii_ids_are_percent_encoded_as_utf8() {
        assert_eq!(document_endpoint("http://h", "é"), "http://h/%C3%A9");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(body_preview("café au lait", 4), "café");
        assert_eq!(body_preview("short", 100), "short");
        assert_eq!(body_preview("", 3), "");
    }
}
