use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Part-of-speech tag of the Penn Treebank tagset.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// CC: coordinating conjunction. (e.g. and, but)
    CoordinatingConjunction,

    /// CD: cardinal number. (e.g. 3, three)
    CardinalNumber,

    /// DT: determiner. (e.g. the, a, this)
    Determiner,

    /// EX: existential there.
    ExistentialThere,

    /// FW: foreign word.
    ForeignWord,

    /// IN: preposition or subordinating conjunction. (e.g. of, in, because)
    Preposition,

    /// JJ: adjective.
    Adjective,

    /// JJR: comparative adjective.
    AdjectiveComparative,

    /// JJS: superlative adjective.
    AdjectiveSuperlative,

    /// LS: list item marker.
    ListItemMarker,

    /// MD: modal. (e.g. can, would)
    Modal,

    /// NN: singular or mass noun.
    Noun,

    /// NNS: plural noun.
    NounPlural,

    /// NNP: singular proper noun.
    ProperNoun,

    /// NNPS: plural proper noun.
    ProperNounPlural,

    /// PDT: predeterminer. (e.g. *all* the, *such* a)
    Predeterminer,

    /// POS: possessive ending.
    PossessiveEnding,

    /// PRP: personal pronoun. (e.g. i, you, them)
    PersonalPronoun,

    /// PRP$: possessive pronoun. (e.g. my, their)
    PossessivePronoun,

    /// RB: adverb.
    Adverb,

    /// RBR: comparative adverb.
    AdverbComparative,

    /// RBS: superlative adverb.
    AdverbSuperlative,

    /// RP: particle. (e.g. up, off)
    Particle,

    /// SYM: symbol.
    Symbol,

    /// TO: to.
    To,

    /// UH: interjection. (e.g. lol, wow)
    Interjection,

    /// VB: verb, base form.
    Verb,

    /// VBD: verb, past tense.
    VerbPast,

    /// VBG: verb, gerund or present participle.
    VerbGerund,

    /// VBN: verb, past participle.
    VerbPastParticiple,

    /// VBP: verb, non-3rd person singular present.
    VerbNon3rdPresent,

    /// VBZ: verb, 3rd person singular present.
    Verb3rdPresent,

    /// WDT: wh-determiner. (e.g. which)
    WhDeterminer,

    /// WP: wh-pronoun. (e.g. who, what)
    WhPronoun,

    /// WP$: possessive wh-pronoun. (e.g. whose)
    WhPossessivePronoun,

    /// WRB: wh-adverb. (e.g. how, when)
    WhAdverb,
}

impl Tag {
    /// All tags in the tagset.
    pub const ALL: [Self; 36] = [
        Self::CoordinatingConjunction,
        Self::CardinalNumber,
        Self::Determiner,
        Self::ExistentialThere,
        Self::ForeignWord,
        Self::Preposition,
        Self::Adjective,
        Self::AdjectiveComparative,
        Self::AdjectiveSuperlative,
        Self::ListItemMarker,
        Self::Modal,
        Self::Noun,
        Self::NounPlural,
        Self::ProperNoun,
        Self::ProperNounPlural,
        Self::Predeterminer,
        Self::PossessiveEnding,
        Self::PersonalPronoun,
        Self::PossessivePronoun,
        Self::Adverb,
        Self::AdverbComparative,
        Self::AdverbSuperlative,
        Self::Particle,
        Self::Symbol,
        Self::To,
        Self::Interjection,
        Self::Verb,
        Self::VerbPast,
        Self::VerbGerund,
        Self::VerbPastParticiple,
        Self::VerbNon3rdPresent,
        Self::Verb3rdPresent,
        Self::WhDeterminer,
        Self::WhPronoun,
        Self::WhPossessivePronoun,
        Self::WhAdverb,
    ];

    /// Gets the Penn Treebank notation of the tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetgender::Tag;
    ///
    /// assert_eq!("PRP$", Tag::PossessivePronoun.as_str());
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoordinatingConjunction => "CC",
            Self::CardinalNumber => "CD",
            Self::Determiner => "DT",
            Self::ExistentialThere => "EX",
            Self::ForeignWord => "FW",
            Self::Preposition => "IN",
            Self::Adjective => "JJ",
            Self::AdjectiveComparative => "JJR",
            Self::AdjectiveSuperlative => "JJS",
            Self::ListItemMarker => "LS",
            Self::Modal => "MD",
            Self::Noun => "NN",
            Self::NounPlural => "NNS",
            Self::ProperNoun => "NNP",
            Self::ProperNounPlural => "NNPS",
            Self::Predeterminer => "PDT",
            Self::PossessiveEnding => "POS",
            Self::PersonalPronoun => "PRP",
            Self::PossessivePronoun => "PRP$",
            Self::Adverb => "RB",
            Self::AdverbComparative => "RBR",
            Self::AdverbSuperlative => "RBS",
            Self::Particle => "RP",
            Self::Symbol => "SYM",
            Self::To => "TO",
            Self::Interjection => "UH",
            Self::Verb => "VB",
            Self::VerbPast => "VBD",
            Self::VerbGerund => "VBG",
            Self::VerbPastParticiple => "VBN",
            Self::VerbNon3rdPresent => "VBP",
            Self::Verb3rdPresent => "VBZ",
            Self::WhDeterminer => "WDT",
            Self::WhPronoun => "WP",
            Self::WhPossessivePronoun => "WP$",
            Self::WhAdverb => "WRB",
        }
    }

    /// Gets the grammatical category counted by the feature extractor.
    pub const fn category(self) -> TagCategory {
        match self {
            Self::Determiner | Self::Predeterminer | Self::WhDeterminer => TagCategory::Determiner,
            Self::Preposition | Self::To => TagCategory::Preposition,
            Self::PersonalPronoun
            | Self::PossessivePronoun
            | Self::WhPronoun
            | Self::WhPossessivePronoun => TagCategory::Pronoun,
            _ => TagCategory::Other,
        }
    }

    pub const fn is_noun(self) -> bool {
        matches!(
            self,
            Self::Noun | Self::NounPlural | Self::ProperNoun | Self::ProperNounPlural
        )
    }

    pub const fn is_verb(self) -> bool {
        matches!(
            self,
            Self::Verb
                | Self::VerbPast
                | Self::VerbGerund
                | Self::VerbPastParticiple
                | Self::VerbNon3rdPresent
                | Self::Verb3rdPresent
                | Self::Modal
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or("Unsupported part-of-speech tag.")
    }
}

/// Grammatical category of a tag.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TagCategory {
    /// DT, PDT, WDT
    Determiner,

    /// IN, TO
    Preposition,

    /// PRP, PRP$, WP, WP$
    Pronoun,

    /// Any other tag.
    Other,
}

/// A word and its part-of-speech tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: Tag,
}

impl TaggedToken {
    pub fn new<S>(word: S, tag: Tag) -> Self
    where
        S: Into<String>,
    {
        Self {
            word: word.into(),
            tag,
        }
    }
}

/// Tagged tokens of every author, keyed by author ID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedCorpus {
    authors: HashMap<String, Vec<TaggedToken>>,
}

impl TaggedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tokens of an author and returns the previous ones.
    pub fn insert<S>(&mut self, author: S, tokens: Vec<TaggedToken>) -> Option<Vec<TaggedToken>>
    where
        S: Into<String>,
    {
        self.authors.insert(author.into(), tokens)
    }

    /// Gets the tokens of an author.
    pub fn get(&self, author: &str) -> Option<&[TaggedToken]> {
        self.authors.get(author).map(Vec::as_slice)
    }

    /// Gets the number of authors.
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Gets the total number of tokens of all authors.
    pub fn n_tokens(&self) -> usize {
        self.authors.values().map(Vec::len).sum()
    }

    /// Iterates authors and their tokens in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TaggedToken])> {
        self.authors
            .iter()
            .map(|(author, tokens)| (author.as_str(), tokens.as_slice()))
    }
}

impl FromIterator<(String, Vec<TaggedToken>)> for TaggedCorpus {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<TaggedToken>)>,
    {
        Self {
            authors: iter.into_iter().collect(),
        }
    }
}
