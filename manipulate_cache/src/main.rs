use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tweetgender::{
    load_slot, Cache, CacheSlot, FeatureVector, FileCache, LabelMap, TaggedCorpus,
};

#[derive(Parser, Debug)]
#[command(
    name = "manipulate_cache",
    about = "A program to inspect and clear cached intermediate results."
)]
struct Args {
    /// The directory storing cache files
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Output author genders as CSV.
    #[arg(long)]
    dump_labels: Option<PathBuf>,

    /// Output tagged tokens of all authors as CSV.
    #[arg(long)]
    dump_tokens: Option<PathBuf>,

    /// Output scaled features with their genders as CSV.
    #[arg(long)]
    dump_features: Option<PathBuf>,

    /// Print the gender and the number of tokens of an author.
    #[arg(long)]
    author: Option<String>,

    /// Remove cache slots: {author_genders, tweets_tagged, vectorized_features}.
    #[arg(long, num_args = 1..)]
    clear: Vec<CacheSlot>,
}

#[derive(Serialize)]
struct LabelRecord<'a> {
    author: &'a str,
    gender: &'a str,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    author: &'a str,
    position: usize,
    word: &'a str,
    tag: &'static str,
}

#[derive(Serialize)]
struct FeatureRecord<'a> {
    author: &'a str,
    gender: &'a str,
    determiner_ratio: f64,
    preposition_ratio: f64,
    pronoun_ratio: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tweetgender=info,manipulate_cache=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut cache = FileCache::new(&args.cache_dir);
    let labels: Option<LabelMap> = load_slot(&cache, CacheSlot::AuthorGenders)?;
    let corpus: Option<TaggedCorpus> = load_slot(&cache, CacheSlot::TweetsTagged)?;

    if let Some(path) = args.dump_labels {
        let labels = labels.as_ref().ok_or("author genders are not cached")?;
        info!(path = %path.display(), "saving labels");
        let mut wtr = csv::Writer::from_writer(fs::File::create(path)?);
        for (author, gender) in labels.iter() {
            wtr.serialize(LabelRecord { author, gender })?;
        }
        wtr.flush()?;
    }

    if let Some(path) = args.dump_tokens {
        let corpus = corpus.as_ref().ok_or("tagged tweets are not cached")?;
        info!(path = %path.display(), "saving tokens");
        let mut authors: Vec<_> = corpus.iter().collect();
        authors.sort_unstable_by_key(|&(author, _)| author);
        let mut wtr = csv::Writer::from_writer(fs::File::create(path)?);
        for (author, tokens) in authors {
            for (position, token) in tokens.iter().enumerate() {
                wtr.serialize(TokenRecord {
                    author,
                    position,
                    word: &token.word,
                    tag: token.tag.as_str(),
                })?;
            }
        }
        wtr.flush()?;
    }

    if let Some(path) = args.dump_features {
        let labels = labels.as_ref().ok_or("author genders are not cached")?;
        let features: Vec<FeatureVector> = load_slot(&cache, CacheSlot::VectorizedFeatures)?
            .ok_or("vectorized features are not cached")?;
        if features.len() != labels.len() {
            return Err(format!(
                "{} feature rows do not match {} labels",
                features.len(),
                labels.len()
            )
            .into());
        }
        info!(path = %path.display(), "saving features");
        let mut wtr = csv::Writer::from_writer(fs::File::create(path)?);
        for ((author, gender), v) in labels.iter().zip(features) {
            wtr.serialize(FeatureRecord {
                author,
                gender,
                determiner_ratio: v.determiner_ratio,
                preposition_ratio: v.preposition_ratio,
                pronoun_ratio: v.pronoun_ratio,
            })?;
        }
        wtr.flush()?;
    }

    if let Some(author) = args.author {
        let gender = labels.as_ref().and_then(|labels| labels.get(&author));
        let n_tokens = corpus
            .as_ref()
            .and_then(|corpus| corpus.get(&author))
            .map(<[_]>::len);
        println!("author: {}", author);
        println!("gender: {}", gender.unwrap_or("-"));
        match n_tokens {
            Some(n) => println!("tokens: {}", n),
            None => println!("tokens: -"),
        }
    }

    for slot in args.clear {
        if cache.remove(slot)? {
            info!(%slot, "removed");
        } else {
            info!(%slot, "not cached");
        }
    }

    Ok(())
}
