/// Cleans a string coming from the source API before validation or storage.
///
/// Drops byte-order markers and control characters, then trims surrounding
/// whitespace. Filtering happens before the trim so that whitespace exposed
/// by a removed control character is trimmed in the same pass; this keeps the
/// function idempotent: `clean_string(&clean_string(s)) == clean_string(s)`.
#[must_use]
pub fn clean_string(s: &str) -> String {
    let filtered: String = s
        .chars()
        .filter(|c| !c.is_control() && *c != '\u{FEFF}')
        .collect();
    filtered.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_bom() {
        assert_eq!(clean_string("\u{FEFF}1234"), "1234");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_string("  store 42\t\n"), "store 42");
    }

    #[test]
    fn drops_embedded_control_characters() {
        assert_eq!(clean_string("na\u{0}me\u{7}"), "name");
    }

    #[test]
    fn trims_whitespace_exposed_by_removed_controls() {
        assert_eq!(clean_string("\u{1} 77 \u{2}"), "77");
    }

    #[test]
    fn keeps_interior_spaces_and_unicode() {
        assert_eq!(clean_string(" Улица Ленина, 1 "), "Улица Ленина, 1");
    }

    #[test]
    fn empty_and_whitespace_only_become_empty() {
        assert_eq!(clean_string(""), "");
        assert_eq!(clean_string("   \t  "), "");
        assert_eq!(clean_string("\u{FEFF}"), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in [
            "\u{FEFF} 77\n",
            "plain",
            "  mixed \u{1} text  ",
            "\u{FEFF}\u{FEFF}x",
            "\u{3} leading",
            "",
        ] {
            let once = clean_string(raw);
            assert_eq!(clean_string(&once), once, "input: {raw:?}");
        }
    }
}
