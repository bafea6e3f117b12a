use std::fmt;
use std::path::Path;
use std::sync::Arc;

use hashbrown::HashMap;
use nlprule::types::Token;
use nlprule::{tokenizer_filename, Tokenizer};
use tweetgender_rules::fix_repeated_letters;

use crate::errors::{Result, TweetGenderError};
use crate::token::{Tag, TaggedToken};

// English model fetched and validated by build.rs.
static TOKENIZER_BYTES: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/", tokenizer_filename!("en")));

/// Part-of-speech tagger for English backed by a trained nlprule model.
///
/// Tokens are normalized with [`fix_repeated_letters`] after tagging, so the model sees the
/// original casing. Rules added with [`Tagger::with_rules()`] take precedence over the model.
///
/// # Examples
///
/// ```
/// use tweetgender::{Tag, Tagger};
///
/// let tagger = Tagger::new().unwrap();
/// let tokens = tagger.tag("She walked with my dog");
/// assert_eq!("she", tokens[0].word);
/// assert_eq!(Tag::PersonalPronoun, tokens[0].tag);
/// assert_eq!(Tag::Preposition, tokens[2].tag);
/// assert_eq!(Tag::PossessivePronoun, tokens[3].tag);
/// ```
#[derive(Clone)]
pub struct Tagger {
    tokenizer: Arc<Tokenizer>,
    rules: HashMap<String, Tag>,
}

impl fmt::Debug for Tagger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tagger")
            .field("n_rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl Tagger {
    /// Creates a new tagger with the embedded English model.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::TaggerModel`] is returned if the model cannot be deserialized.
    pub fn new() -> Result<Self> {
        Tokenizer::from_reader(TOKENIZER_BYTES)
            .map(Self::from_tokenizer)
            .map_err(|e| TweetGenderError::tagger_model(e.to_string()))
    }

    /// Creates a new tagger from an nlprule tokenizer binary.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::TaggerModel`] is returned if the file cannot be read as a model.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        Tokenizer::new(path)
            .map(Self::from_tokenizer)
            .map_err(|e| TweetGenderError::tagger_model(format!("{}: {}", path.display(), e)))
    }

    /// Wraps an already loaded tokenizer.
    pub fn from_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer: Arc::new(tokenizer),
            rules: HashMap::new(),
        }
    }

    /// Adds rules overriding the model.
    ///
    /// # Arguments
    ///
    /// * `rules` - Pairs of a lower-cased word and its tag.
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (S, Tag)>,
        S: Into<String>,
    {
        self.rules
            .extend(rules.into_iter().map(|(word, tag)| (word.into(), tag)));
        self
    }

    /// Splits a text into normalized words.
    ///
    /// Whitespaces are dropped, and each token is lower-cased with its repeated letters
    /// shortened.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tag(text).into_iter().map(|token| token.word).collect()
    }

    /// Tokenizes and tags a text.
    ///
    /// # Arguments
    ///
    /// * `text` - A cleaned tweet text.
    ///
    /// # Returns
    ///
    /// Tagged tokens in the order of appearance.
    pub fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tokens = vec![];
        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let surface = token.word().text().as_str();
                if surface.trim().is_empty() {
                    continue;
                }
                let word = fix_repeated_letters(surface);
                let tag = match self.rules.get(&word) {
                    Some(&tag) => tag,
                    None => model_tag(token).unwrap_or_else(|| shape_tag(&word)),
                };
                tokens.push(TaggedToken { word, tag });
            }
        }
        tokens
    }
}

/// Gets the first reading of a token that is a Penn Treebank tag.
///
/// Refinements such as `NN:UN` are reduced to the base tag.
fn model_tag(token: &Token) -> Option<Tag> {
    token.word().tags().iter().find_map(|data| {
        let pos = data.pos().as_str();
        pos.split(':').next().and_then(|base| base.parse().ok())
    })
}

fn shape_tag(word: &str) -> Tag {
    if word.chars().all(|c| !c.is_alphanumeric()) {
        Tag::Symbol
    } else if word.chars().all(char::is_numeric) {
        Tag::CardinalNumber
    } else {
        Tag::Noun
    }
}
