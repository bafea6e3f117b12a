//! Rule base filters for tweetgender.
//!
//! ## Examples
//!
//! ```
//! use tweetgender_rules::{StringFilter, TweetCleaner};
//!
//! let cleaner = TweetCleaner::new();
//! let text = cleaner.filter("Sooooo happy &amp; proud!!! https://t.co/xyz @friend");
//! assert_eq!("soo happy  proud", text);
//! ```

mod cleaner;

pub mod string_filters;

pub use cleaner::{fix_repeated_letters, TweetCleaner};

/// Filter for strings.
pub trait StringFilter {
    /// Filters the specified string.
    ///
    /// # Arguments:
    ///
    /// * `string` - Input text.
    ///
    /// # Returns
    ///
    /// A processed text.
    fn filter(&self, string: &str) -> String;
}
