use lazy_static::lazy_static;
use regex::Regex;

use crate::StringFilter;

lazy_static! {
    static ref URL_RE: Regex =
        Regex::new(r"\w+:/{2}[\d\w-]+(?:\.[\d\w-]+)*(?:/[^\s/]*)*").unwrap();
}

/// Removes URL-shaped substrings such as `https://t.co/abc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlFilter;

impl StringFilter for UrlFilter {
    fn filter(&self, string: &str) -> String {
        URL_RE.replace_all(string, "").into_owned()
    }
}
