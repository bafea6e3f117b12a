use crate::StringFilter;

/// Removes ASCII punctuation characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct PunctuationFilter;

impl StringFilter for PunctuationFilter {
    fn filter(&self, string: &str) -> String {
        string.chars().filter(|c| !c.is_ascii_punctuation()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter() {
        let filter = PunctuationFilter;
        assert_eq!("note yes", filter.filter("note: yes!"));
    }

    #[test]
    fn test_all_ascii_punctuation() {
        let filter = PunctuationFilter;
        assert_eq!("", filter.filter(r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##));
    }

    #[test]
    fn test_keep_non_ascii_punctuation() {
        let filter = PunctuationFilter;
        assert_eq!("\u{201c}a\u{201d}", filter.filter("\u{201c}a\u{201d}"));
    }
}
