use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, TweetGenderError};
use crate::labels::LabelMap;
use crate::token::{TagCategory, TaggedCorpus, TaggedToken};

/// Initial value of each category counter.
pub const SMOOTHING: f64 = 0.0001;

/// Ratios of grammatical categories among the tokens of an author.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub determiner_ratio: f64,
    pub preposition_ratio: f64,
    pub pronoun_ratio: f64,
}

impl FeatureVector {
    /// Number of features.
    pub const DIMENSION: usize = 3;

    pub const fn new(determiner_ratio: f64, preposition_ratio: f64, pronoun_ratio: f64) -> Self {
        Self {
            determiner_ratio,
            preposition_ratio,
            pronoun_ratio,
        }
    }

    /// Returns the features in the order of determiner, preposition and pronoun.
    pub const fn to_array(self) -> [f64; Self::DIMENSION] {
        [
            self.determiner_ratio,
            self.preposition_ratio,
            self.pronoun_ratio,
        ]
    }
}

impl From<[f64; FeatureVector::DIMENSION]> for FeatureVector {
    fn from([determiner_ratio, preposition_ratio, pronoun_ratio]: [f64; 3]) -> Self {
        Self::new(determiner_ratio, preposition_ratio, pronoun_ratio)
    }
}

impl From<FeatureVector> for [f64; FeatureVector::DIMENSION] {
    fn from(vector: FeatureVector) -> Self {
        vector.to_array()
    }
}

/// Computes the feature vector of an author.
///
/// Each category counter starts at [`SMOOTHING`] and is divided by the number of tokens.
///
/// # Arguments
///
/// * `author` - Author ID, used for error reporting.
/// * `tokens` - Tagged tokens of the author.
///
/// # Errors
///
/// [`TweetGenderError::ZeroTokenAuthor`] is returned if `tokens` is empty.
pub fn aggregate(author: &str, tokens: &[TaggedToken]) -> Result<FeatureVector> {
    if tokens.is_empty() {
        return Err(TweetGenderError::zero_token_author(author));
    }
    let mut n_determiner = SMOOTHING;
    let mut n_preposition = SMOOTHING;
    let mut n_pronoun = SMOOTHING;
    for token in tokens {
        match token.tag.category() {
            TagCategory::Determiner => n_determiner += 1.0,
            TagCategory::Preposition => n_preposition += 1.0,
            TagCategory::Pronoun => n_pronoun += 1.0,
            TagCategory::Other => {}
        }
    }
    let n_words = tokens.len() as f64;
    Ok(FeatureVector::new(
        n_determiner / n_words,
        n_preposition / n_words,
        n_pronoun / n_words,
    ))
}

/// Computes feature vectors of all labeled authors.
///
/// Rows follow the iteration order of `labels`. An author absent from `corpus` has no token.
///
/// # Errors
///
/// [`TweetGenderError::ZeroTokenAuthor`] is returned if any labeled author has no token.
pub fn vectorize(labels: &LabelMap, corpus: &TaggedCorpus) -> Result<Vec<FeatureVector>> {
    labels
        .authors()
        .map(|author| {
            let tokens = corpus.get(author).unwrap_or_default();
            debug!(author, n_tokens = tokens.len(), "aggregating");
            aggregate(author, tokens)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::token::Tag;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn tokens(tags: &[Tag]) -> Vec<TaggedToken> {
        tags.iter()
            .enumerate()
            .map(|(i, &tag)| TaggedToken::new(format!("w{i}"), tag))
            .collect()
    }

    #[test]
    fn test_aggregate() {
        let tokens = tokens(&[
            Tag::Determiner,
            Tag::Noun,
            Tag::Preposition,
            Tag::Predeterminer,
            Tag::Noun,
            Tag::VerbPast,
            Tag::Adverb,
            Tag::Noun,
            Tag::Adjective,
            Tag::Noun,
        ]);
        let v = aggregate("a", &tokens).unwrap();
        assert!(approx_eq(2.0001 / 10.0, v.determiner_ratio));
        assert!(approx_eq(1.0001 / 10.0, v.preposition_ratio));
        assert!(approx_eq(0.0001 / 10.0, v.pronoun_ratio));
    }

    #[test]
    fn test_aggregate_all_categories() {
        let tokens = tokens(&[
            Tag::WhDeterminer,
            Tag::To,
            Tag::PersonalPronoun,
            Tag::PossessivePronoun,
            Tag::WhPronoun,
            Tag::WhPossessivePronoun,
        ]);
        let v = aggregate("a", &tokens).unwrap();
        assert!(approx_eq(1.0001 / 6.0, v.determiner_ratio));
        assert!(approx_eq(1.0001 / 6.0, v.preposition_ratio));
        assert!(approx_eq(4.0001 / 6.0, v.pronoun_ratio));
    }

    #[test]
    fn test_aggregate_zero_tokens() {
        match aggregate("lonely", &[]) {
            Err(TweetGenderError::ZeroTokenAuthor(e)) => assert_eq!("lonely", e.author()),
            r => panic!("unexpected result: {r:?}"),
        }
    }

    #[test]
    fn test_vectorize_follows_label_order() {
        let labels: LabelMap = vec![("b", "male"), ("a", "female")].into_iter().collect();
        let mut corpus = TaggedCorpus::new();
        corpus.insert("a", tokens(&[Tag::Determiner]));
        corpus.insert("b", tokens(&[Tag::PersonalPronoun, Tag::Noun]));
        let rows = vectorize(&labels, &corpus).unwrap();
        assert_eq!(2, rows.len());
        assert!(approx_eq(1.0001 / 2.0, rows[0].pronoun_ratio));
        assert!(approx_eq(1.0001, rows[1].determiner_ratio));
    }

    #[test]
    fn test_vectorize_missing_author() {
        let labels: LabelMap = vec![("a", "female"), ("ghost", "male")].into_iter().collect();
        let mut corpus = TaggedCorpus::new();
        corpus.insert("a", tokens(&[Tag::Determiner]));
        assert!(matches!(
            vectorize(&labels, &corpus),
            Err(TweetGenderError::ZeroTokenAuthor(_))
        ));
    }

    #[test]
    fn test_array_conversion() {
        let v = FeatureVector::from([0.1, 0.2, 0.3]);
        assert_eq!(0.2, v.preposition_ratio);
        assert_eq!([0.1, 0.2, 0.3], <[f64; 3]>::from(v));
    }
}
