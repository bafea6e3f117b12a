use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tweetgender::{AuthorDocument, Tagger};
use tweetgender_rules::TweetCleaner;

#[derive(Parser, Debug)]
#[command(
    name = "parse_author_xml",
    about = "A program to print cleaned tweets of author XML files."
)]
struct Args {
    /// Prints tagged tokens in the `word/TAG` format instead of cleaned tweets.
    #[arg(long)]
    tag: bool,

    /// The nlprule tokenizer binary used instead of the embedded English model.
    #[arg(long)]
    tokenizer: Option<PathBuf>,

    /// XML files to be parsed.
    xml_files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tweetgender=info,parse_author_xml=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let cleaner = TweetCleaner::new();
    let tagger = match &args.tokenizer {
        Some(path) => Tagger::from_path(path)?,
        None => Tagger::new()?,
    };

    for path in args.xml_files {
        let Some(document) = AuthorDocument::from_path(&path) else {
            warn!(path = %path.display(), "skipping a file without the .xml extension");
            continue;
        };
        let tweets = document.read_tweets()?;
        debug!(author = %document.author, n_tweets = tweets.len(), "parsed");
        for tweet in tweets {
            let text = cleaner.clean(&tweet);
            if args.tag {
                let line: Vec<_> = tagger
                    .tag(&text)
                    .into_iter()
                    .map(|token| format!("{}/{}", token.word, token.tag))
                    .collect();
                println!("{}", line.join(" "));
            } else {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
