//! Filters for [`String`].

mod handle;
mod html_entity;
mod non_alphanumeric;
mod punctuation;
mod repeated_chars;
mod supplementary_plane;
mod url;

pub use handle::HandleFilter;
pub use html_entity::HtmlEntityFilter;
pub use non_alphanumeric::NonAlphanumericFilter;
pub use punctuation::PunctuationFilter;
pub use repeated_chars::RepeatedCharsFilter;
pub use supplementary_plane::SupplementaryPlaneFilter;
pub use url::UrlFilter;
