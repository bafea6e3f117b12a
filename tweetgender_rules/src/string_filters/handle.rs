use lazy_static::lazy_static;
use regex::Regex;

use crate::StringFilter;

lazy_static! {
    static ref HANDLE_RE: Regex = Regex::new(r"[@?]\w+\b").unwrap();
}

/// Removes user handles like `@username`.
///
/// A word directly following `?` is removed too (`really?yes` becomes `really`).
#[derive(Clone, Copy, Debug, Default)]
pub struct HandleFilter;

impl StringFilter for HandleFilter {
    fn filter(&self, string: &str) -> String {
        HANDLE_RE.replace_all(string, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_handle() {
        let filter = HandleFilter;
        assert_eq!("thanks  !", filter.filter("thanks @some_user42 !"));
    }

    #[test]
    fn test_remove_question_mark_word() {
        let filter = HandleFilter;
        assert_eq!("really ", filter.filter("really ?yes"));
        assert_eq!("really? yes", filter.filter("really? yes"));
    }

    #[test]
    fn test_keep_email_local_part() {
        let filter = HandleFilter;
        assert_eq!("mail me", filter.filter("mail me@example"));
    }
}
