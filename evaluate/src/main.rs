use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tweetgender::{
    k_fold_cross_validate, Cache, Dataset, Features, FileCache, MemoryCache, Pipeline, Tagger,
    TrainParams,
};

#[derive(Parser, Debug)]
#[command(
    name = "evaluate",
    about = "A program to cross-validate gender classification of tweet authors."
)]
struct Args {
    /// The dataset directory containing author XML files and truth.txt
    #[arg(long, default_value = "en")]
    dataset: PathBuf,

    /// The directory to store intermediate results
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// The number of folds
    #[arg(long, default_value = "10")]
    folds: usize,

    /// Do not shuffle authors before splitting them into folds.
    #[arg(long)]
    no_shuffle: bool,

    /// The seed of the shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// The epsilon stopping criterion for classifier training
    #[arg(long, default_value = "0.01")]
    eps: f64,

    /// The cost hyperparameter for classifier training
    #[arg(long, default_value = "1.0")]
    cost: f64,

    /// Do not read or write cache files.
    #[arg(long)]
    no_cache: bool,

    /// The nlprule tokenizer binary used instead of the embedded English model
    #[arg(long)]
    tokenizer: Option<PathBuf>,
}

fn extract<C>(
    dataset: Dataset,
    cache: C,
    tagger: Tagger,
) -> tweetgender::errors::Result<Features>
where
    C: Cache,
{
    Pipeline::new(dataset, cache, tagger).run()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tweetgender=info,evaluate=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let dataset = Dataset::open(&args.dataset)?;
    let tagger = match &args.tokenizer {
        Some(path) => Tagger::from_path(path)?,
        None => Tagger::new()?,
    };
    let features = if args.no_cache {
        extract(dataset, MemoryCache::new(), tagger)?
    } else {
        extract(dataset, FileCache::new(&args.cache_dir), tagger)?
    };
    info!(n_authors = features.len(), "extracted features");

    let params = TrainParams {
        epsilon: args.eps,
        cost: args.cost,
    };
    let cv = k_fold_cross_validate(
        &features.vectorized_features,
        &features.targets,
        args.folds,
        !args.no_shuffle,
        args.seed,
        &params,
    )?;

    println!("Train score: {}", cv.mean_train_score());
    println!("Test score : {}", cv.mean_test_score());

    Ok(())
}
