#![cfg_attr(docsrs, feature(doc_cfg))]

//! # tweetgender
//!
//! tweetgender extracts part-of-speech frequency features from tweet corpora for author gender
//! profiling.
//!
//! Each author is represented by the ratios of determiners, prepositions and pronouns among their
//! tokens. The ratios are standardized over all authors and can be fed to any linear classifier.
//!
//! ## Examples
//!
//! ```no_run
//! use tweetgender::{Dataset, FileCache, Pipeline, Tagger};
//!
//! let dataset = Dataset::open("en").unwrap();
//! let tagger = Tagger::new().unwrap();
//! let mut pipeline = Pipeline::new(dataset, FileCache::new("."), tagger);
//! let features = pipeline.run().unwrap();
//!
//! for (vector, gender) in features.vectorized_features.iter().zip(&features.targets) {
//!     println!("{gender}\t{:?}", vector.to_array());
//! }
//! ```
//!
//! Training and cross-validation require **crate feature** `train`. For more details, see
//! [`GenderClassifier`].

pub mod errors;

mod cache;
mod corpus;
mod feature;
mod labels;
mod pipeline;
mod scaler;
mod tagger;
mod token;

#[cfg(feature = "train")]
mod classifier;

pub use cache::{load_slot, store_slot, Cache, CacheSlot, FileCache, MemoryCache};
pub use corpus::{extract_tweets, AuthorDocument, Dataset};
pub use feature::{aggregate, vectorize, FeatureVector, SMOOTHING};
pub use labels::{load_labels, parse_labels, LabelMap};
pub use pipeline::{Features, Pipeline};
pub use scaler::{column_stats, scale, ColumnStats};
pub use tagger::Tagger;
pub use token::{Tag, TagCategory, TaggedCorpus, TaggedToken};

#[cfg(feature = "train")]
pub use classifier::{
    k_fold_cross_validate, k_fold_indices, CrossValidation, FoldScore, GenderClassifier,
    TrainParams,
};
