use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};
use tweetgender_rules::TweetCleaner;

use crate::cache::{load_slot, store_slot, Cache, CacheSlot};
use crate::corpus::{AuthorDocument, Dataset};
use crate::errors::Result;
use crate::feature::{vectorize, FeatureVector};
use crate::labels::{load_labels, LabelMap};
use crate::scaler::scale;
use crate::tagger::Tagger;
use crate::token::{TaggedCorpus, TaggedToken};

/// Scaled features and gender labels of all labeled authors.
///
/// The `i`-th row of `vectorized_features` and the `i`-th element of `targets` belong to the same
/// author.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Features {
    pub vectorized_features: Vec<FeatureVector>,
    pub targets: Vec<String>,
}

impl Features {
    /// Gets the number of authors.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Feature extraction pipeline.
///
/// Each stage first looks up its own cache slot and only computes its result on a miss.
pub struct Pipeline<C> {
    dataset: Dataset,
    cache: C,
    cleaner: TweetCleaner,
    tagger: Tagger,
}

impl<C> Pipeline<C>
where
    C: Cache,
{
    /// Creates a new pipeline.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Dataset to read on cache misses.
    /// * `cache` - Cache of intermediate results.
    /// * `tagger` - Tagger applied to cleaned tweets.
    pub fn new(dataset: Dataset, cache: C, tagger: Tagger) -> Self {
        Self {
            dataset,
            cache,
            cleaner: TweetCleaner::new(),
            tagger,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Gets tagged tokens of every author document.
    ///
    /// Documents are processed in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if any document cannot be read or parsed.
    pub fn tweets_tagged(&mut self) -> Result<TaggedCorpus> {
        if let Some(corpus) = load_slot(&self.cache, CacheSlot::TweetsTagged)? {
            return Ok(corpus);
        }
        let start = Instant::now();
        let documents = self.dataset.author_documents()?;
        let cleaner = &self.cleaner;
        let tagger = &self.tagger;
        let corpus: TaggedCorpus = documents
            .par_iter()
            .map(|document| {
                let tokens = tag_document(cleaner, tagger, document)?;
                Ok((document.author.clone(), tokens))
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .collect();
        info!(
            n_authors = corpus.len(),
            n_tokens = corpus.n_tokens(),
            elapsed = ?start.elapsed(),
            "tagged all documents"
        );
        store_slot(&mut self.cache, CacheSlot::TweetsTagged, &corpus)?;
        Ok(corpus)
    }

    /// Gets gender labels from the truth file of the dataset.
    ///
    /// # Errors
    ///
    /// See [`load_labels`].
    pub fn author_genders(&mut self) -> Result<LabelMap> {
        if let Some(labels) = load_slot(&self.cache, CacheSlot::AuthorGenders)? {
            return Ok(labels);
        }
        let labels = load_labels(self.dataset.truth_path())?;
        info!(n_authors = labels.len(), "loaded labels");
        store_slot(&mut self.cache, CacheSlot::AuthorGenders, &labels)?;
        Ok(labels)
    }

    /// Gets the scaled feature matrix of labeled authors.
    ///
    /// # Arguments
    ///
    /// * `labels` - Gender labels determining the rows.
    /// * `corpus` - Tagged tokens of authors.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::ZeroTokenAuthor`](crate::errors::TweetGenderError::ZeroTokenAuthor)
    /// is returned if a labeled author has no token.
    pub fn vectorized_features(
        &mut self,
        labels: &LabelMap,
        corpus: &TaggedCorpus,
    ) -> Result<Vec<FeatureVector>> {
        if let Some(features) = load_slot(&self.cache, CacheSlot::VectorizedFeatures)? {
            return Ok(features);
        }
        let start = Instant::now();
        let features = scale(&vectorize(labels, corpus)?);
        info!(n_rows = features.len(), elapsed = ?start.elapsed(), "vectorized");
        store_slot(&mut self.cache, CacheSlot::VectorizedFeatures, &features)?;
        Ok(features)
    }

    /// Gets gender labels in the row order of the feature matrix.
    pub fn targets(&self, labels: &LabelMap) -> Vec<String> {
        labels.genders().map(str::to_string).collect()
    }

    /// Runs all stages.
    pub fn run(&mut self) -> Result<Features> {
        let corpus = self.tweets_tagged()?;
        let labels = self.author_genders()?;
        let vectorized_features = self.vectorized_features(&labels, &corpus)?;
        let targets = self.targets(&labels);
        Ok(Features {
            vectorized_features,
            targets,
        })
    }
}

fn tag_document(
    cleaner: &TweetCleaner,
    tagger: &Tagger,
    document: &AuthorDocument,
) -> Result<Vec<TaggedToken>> {
    let tweets = document.read_tweets()?;
    let mut tokens = vec![];
    for tweet in &tweets {
        tokens.extend(tagger.tag(&cleaner.clean(tweet)));
    }
    debug!(
        author = %document.author,
        n_tweets = tweets.len(),
        n_tokens = tokens.len(),
        "tagged"
    );
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    use crate::cache::{FileCache, MemoryCache};
    use crate::errors::TweetGenderError;

    fn document(tweets: &[&str]) -> String {
        let mut xml = String::from("<author lang=\"en\">\n\t<documents>");
        for tweet in tweets {
            xml.push_str("\n\t\t<document><![CDATA[");
            xml.push_str(tweet);
            xml.push_str("]]></document>");
        }
        xml.push_str("\n\t</documents>\n</author>\n");
        xml
    }

    fn write_dataset(root: &Path) {
        fs::write(
            root.join("aaa.xml"),
            document(&["The cat of the house sat!!! http://t.co/x", "ignored"]),
        )
        .unwrap();
        fs::write(
            root.join("bbb.xml"),
            document(&["I love my dog sooooo much @buddy", "ignored"]),
        )
        .unwrap();
        fs::write(root.join("truth.txt"), "bbb:::female\naaa:::male\n").unwrap();
    }

    fn tagger() -> Tagger {
        Tagger::new().unwrap()
    }

    #[test]
    fn test_run() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let dataset = Dataset::open(dir.path()).unwrap();
        let mut pipeline = Pipeline::new(dataset, MemoryCache::new(), tagger());

        let features = pipeline.run().unwrap();
        assert_eq!(2, features.len());
        assert_eq!(2, features.vectorized_features.len());
        assert_eq!(vec!["female", "male"], features.targets);

        // "bbb" has more pronouns and "aaa" has more determiners and prepositions.
        let bbb = features.vectorized_features[0];
        let aaa = features.vectorized_features[1];
        assert!(bbb.pronoun_ratio > aaa.pronoun_ratio);
        assert!(aaa.determiner_ratio > bbb.determiner_ratio);
        assert!(aaa.preposition_ratio > bbb.preposition_ratio);
        for v in &features.vectorized_features {
            for x in v.to_array() {
                assert!((x.abs() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_tweets_tagged() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let dataset = Dataset::open(dir.path()).unwrap();
        let mut pipeline = Pipeline::new(dataset, MemoryCache::new(), tagger());
        let corpus = pipeline.tweets_tagged().unwrap();
        assert_eq!(2, corpus.len());
        let words: Vec<_> = corpus
            .get("bbb")
            .unwrap()
            .iter()
            .map(|t| t.word.as_str())
            .collect();
        assert_eq!(vec!["i", "love", "my", "dog", "soo", "much"], words);
    }

    #[test]
    fn test_second_run_from_file_cache() {
        let data_dir = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        write_dataset(data_dir.path());

        let dataset = Dataset::open(data_dir.path()).unwrap();
        let first = Pipeline::new(dataset.clone(), FileCache::new(cache_dir.path()), tagger())
            .run()
            .unwrap();

        // Every stage is served from the cache.
        for entry in fs::read_dir(data_dir.path()).unwrap() {
            fs::remove_file(entry.unwrap().path()).unwrap();
        }
        let second = Pipeline::new(dataset, FileCache::new(cache_dir.path()), tagger())
            .run()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupted_cache_is_recomputed() {
        let data_dir = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        write_dataset(data_dir.path());
        let dataset = Dataset::open(data_dir.path()).unwrap();
        let cache = FileCache::new(cache_dir.path());
        let first = Pipeline::new(dataset.clone(), cache.clone(), tagger()).run().unwrap();

        fs::write(cache.slot_path(CacheSlot::TweetsTagged), b"garbage").unwrap();
        let second = Pipeline::new(dataset, cache, tagger()).run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_token_author() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(dir.path().join("ccc.xml"), document(&["!!!", "ignored"])).unwrap();
        fs::write(
            dir.path().join("truth.txt"),
            "aaa:::male\nbbb:::female\nccc:::male\n",
        )
        .unwrap();
        let dataset = Dataset::open(dir.path()).unwrap();
        let mut pipeline = Pipeline::new(dataset, MemoryCache::new(), tagger());
        assert!(matches!(
            pipeline.run(),
            Err(TweetGenderError::ZeroTokenAuthor(_))
        ));
        assert!(pipeline
            .cache()
            .get(CacheSlot::VectorizedFeatures)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("truth.txt"), "").unwrap();
        let dataset = Dataset::open(dir.path()).unwrap();
        let mut pipeline = Pipeline::new(dataset, MemoryCache::new(), tagger());
        let features = pipeline.run().unwrap();
        assert!(features.is_empty());
        assert!(features.vectorized_features.is_empty());
    }
}
