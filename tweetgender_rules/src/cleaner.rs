use crate::string_filters::{
    HandleFilter, HtmlEntityFilter, NonAlphanumericFilter, PunctuationFilter,
    RepeatedCharsFilter, SupplementaryPlaneFilter, UrlFilter,
};
use crate::StringFilter;

/// Normalizer of raw tweet texts.
///
/// The filters are applied in the following order, each one to the output of the previous one:
///
/// 1. [`HtmlEntityFilter`]
/// 2. [`SupplementaryPlaneFilter`]
/// 3. [`UrlFilter`]
/// 4. [`HandleFilter`]
/// 5. [`NonAlphanumericFilter`]
/// 6. trimming of surrounding whitespace
/// 7. [`PunctuationFilter`]
/// 8. lower-casing
/// 9. [`RepeatedCharsFilter`]
///
/// The order matters: the colon survives step 5 and is removed by step 7.
#[derive(Clone, Copy, Debug, Default)]
pub struct TweetCleaner {
    entity_filter: HtmlEntityFilter,
    plane_filter: SupplementaryPlaneFilter,
    url_filter: UrlFilter,
    handle_filter: HandleFilter,
    alnum_filter: NonAlphanumericFilter,
    punct_filter: PunctuationFilter,
    repeat_filter: RepeatedCharsFilter,
}

impl TweetCleaner {
    /// Creates a new TweetCleaner.
    ///
    /// # Returns
    ///
    /// A new TweetCleaner.
    pub const fn new() -> Self {
        Self {
            entity_filter: HtmlEntityFilter,
            plane_filter: SupplementaryPlaneFilter,
            url_filter: UrlFilter,
            handle_filter: HandleFilter,
            alnum_filter: NonAlphanumericFilter,
            punct_filter: PunctuationFilter,
            repeat_filter: RepeatedCharsFilter,
        }
    }

    /// Cleans a raw tweet text.
    ///
    /// # Arguments:
    ///
    /// * `raw` - Raw tweet text.
    ///
    /// # Returns
    ///
    /// A lower-cased text consisting of ASCII letters, digits and spaces.
    pub fn clean(&self, raw: &str) -> String {
        let text = self.entity_filter.filter(raw);
        let text = self.plane_filter.filter(&text);
        let text = self.url_filter.filter(&text);
        let text = self.handle_filter.filter(&text);
        let text = self.alnum_filter.filter(&text);
        let text = self.punct_filter.filter(text.trim());
        self.repeat_filter.filter(&text.to_lowercase())
    }
}

impl StringFilter for TweetCleaner {
    fn filter(&self, string: &str) -> String {
        self.clean(string)
    }
}

/// Lower-cases a word and shortens runs of three or more identical characters to two.
///
/// # Examples
///
/// ```
/// use tweetgender_rules::fix_repeated_letters;
///
/// assert_eq!("amazzing", fix_repeated_letters("AMAZZZZING"));
/// ```
pub fn fix_repeated_letters(word: &str) -> String {
    RepeatedCharsFilter.filter(&word.to_lowercase())
}
