use crate::StringFilter;

/// Keeps ASCII letters, ASCII digits, spaces and colons, and removes everything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonAlphanumericFilter;

impl StringFilter for NonAlphanumericFilter {
    fn filter(&self, string: &str) -> String {
        string
            .chars()
            .filter(|&c| c.is_ascii_alphanumeric() || c == ' ' || c == ':')
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter() {
        let filter = NonAlphanumericFilter;
        assert_eq!("Time: 1030ok", filter.filter("Time: 10.30\tok!"));
    }

    #[test]
    fn test_remove_non_ascii() {
        let filter = NonAlphanumericFilter;
        assert_eq!("caf nave", filter.filter("caf\u{e9} na\u{ef}ve"));
    }

    #[test]
    fn test_remove_newlines() {
        let filter = NonAlphanumericFilter;
        assert_eq!("ab", filter.filter("\n\ta]]>b\n"));
    }
}
