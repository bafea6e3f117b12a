use crate::StringFilter;

/// Shortens runs of three or more identical characters to two characters.
///
/// Line feeds are never shortened.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepeatedCharsFilter;

impl StringFilter for RepeatedCharsFilter {
    fn filter(&self, string: &str) -> String {
        let mut result = String::with_capacity(string.len());
        let mut prev = None;
        let mut run = 0;
        for c in string.chars() {
            if prev == Some(c) {
                run += 1;
            } else {
                prev = Some(c);
                run = 1;
            }
            if run <= 2 || c == '\n' {
                result.push(c);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        let filter = RepeatedCharsFilter;
        assert_eq!("amazzing", filter.filter("amazzzzing"));
    }

    #[test]
    fn test_keep_pairs() {
        let filter = RepeatedCharsFilter;
        assert_eq!("good  book", filter.filter("good  book"));
    }

    #[test]
    fn test_multiple_runs() {
        let filter = RepeatedCharsFilter;
        assert_eq!("yess!! noo", filter.filter("yesssss!!!!! nooo"));
    }

    #[test]
    fn test_keep_line_feeds() {
        let filter = RepeatedCharsFilter;
        assert_eq!("a\n\n\nb", filter.filter("a\n\n\nb"));
    }
}
