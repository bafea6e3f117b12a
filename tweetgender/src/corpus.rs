use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, TweetGenderError};

const AUTHOR_OPENING: &str = "<author lang=\"en\">\n\t<documents>";
const DOCUMENT_CLOSING: &str = "</document>";
const CDATA_OPENING: &str = "\n\t\t<document><![CDATA[";

/// Extracts tweets from a document of an author.
///
/// The document is not parsed as strict XML. The body following `<author lang="en">` is split at
/// each `</document>`, and the text following each CDATA opening is taken as a tweet. The last
/// tweet of the document is discarded.
///
/// # Arguments
///
/// * `xml` - Document of an author.
///
/// # Returns
///
/// Raw tweet payloads, including the trailing `]]>` of each CDATA section.
///
/// # Errors
///
/// [`TweetGenderError::Parse`] is returned if the document lacks the `<author>` opening.
///
/// # Examples
///
/// ```
/// use tweetgender::extract_tweets;
///
/// let xml = "<author lang=\"en\">\n\t<documents>\
///            \n\t\t<document><![CDATA[first]]></document>\
///            \n\t\t<document><![CDATA[second]]></document>\
///            \n\t</documents>\n</author>";
/// let tweets = extract_tweets(xml).unwrap();
/// assert_eq!(vec!["first]]>".to_string()], tweets);
/// ```
pub fn extract_tweets(xml: &str) -> Result<Vec<String>> {
    let body = xml.trim().split(AUTHOR_OPENING).nth(1).ok_or_else(|| {
        TweetGenderError::parse(format!(
            "missing `{}`",
            AUTHOR_OPENING.escape_debug()
        ))
    })?;
    let mut tweets: Vec<String> = body
        .split(DOCUMENT_CLOSING)
        .flat_map(|chunk| chunk.split(CDATA_OPENING).skip(1))
        .map(str::to_string)
        .collect();
    tweets.pop();
    Ok(tweets)
}

/// Document file of an author.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorDocument {
    /// Author ID.
    pub author: String,

    /// Path of the XML file.
    pub path: PathBuf,
}

impl AuthorDocument {
    /// Creates a new [`AuthorDocument`], deriving the author ID from the file name.
    ///
    /// The author ID is the file name without its directory and its `.xml` extension.
    ///
    /// # Returns
    ///
    /// `None` if the path does not end with a file name with the `.xml` extension.
    pub fn from_path<P>(path: P) -> Option<Self>
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        if path.extension()? != "xml" {
            return None;
        }
        let author = path.file_stem()?.to_str()?.to_string();
        Some(Self { author, path })
    }

    /// Reads the file and extracts its tweets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 or the document is malformed.
    pub fn read_tweets(&self) -> Result<Vec<String>> {
        let xml = fs::read(&self.path)?;
        let xml = String::from_utf8(xml)?;
        extract_tweets(&xml).map_err(|e| e.in_file(&self.path))
    }
}

/// Dataset directory containing one XML file per author and a truth file.
#[derive(Clone, Debug)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    /// File name of the truth file.
    pub const TRUTH_FILE_NAME: &'static str = "truth.txt";

    /// Opens a dataset directory.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::DatasetNotFound`] is returned if `root` is not a directory.
    pub fn open<P>(root: P) -> Result<Self>
    where
        P: Into<PathBuf>,
    {
        let root = root.into();
        if !root.is_dir() {
            return Err(TweetGenderError::dataset_not_found(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Gets the path of the truth file.
    pub fn truth_path(&self) -> PathBuf {
        self.root.join(Self::TRUTH_FILE_NAME)
    }

    /// Lists the author documents sorted by file name.
    pub fn author_documents(&self) -> Result<Vec<AuthorDocument>> {
        let mut documents = vec![];
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(document) = AuthorDocument::from_path(entry.path()) {
                documents.push(document);
            }
        }
        documents.sort_unstable_by(|a, b| a.path.cmp(&b.path));
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(tweets: &[&str]) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        xml.push_str("<author lang=\"en\">\n\t<documents>");
        for tweet in tweets {
            xml.push_str("\n\t\t<document><![CDATA[");
            xml.push_str(tweet);
            xml.push_str("]]></document>");
        }
        xml.push_str("\n\t</documents>\n</author>\n");
        xml
    }

    #[test]
    fn test_extract_two_tweets() {
        let tweets = extract_tweets(&document(&["Hello world", "Good night"])).unwrap();
        assert_eq!(vec!["Hello world]]>".to_string()], tweets);
    }

    #[test]
    fn test_extract_three_tweets() {
        let tweets = extract_tweets(&document(&["one", "two", "three"])).unwrap();
        assert_eq!(vec!["one]]>".to_string(), "two]]>".to_string()], tweets);
    }

    #[test]
    fn test_extract_no_tweets() {
        assert!(extract_tweets(&document(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_extract_missing_opening() {
        let xml = "<author lang=\"es\">\n\t<documents></documents></author>";
        assert!(matches!(
            extract_tweets(xml),
            Err(TweetGenderError::Parse(_))
        ));
    }

    #[test]
    fn test_author_document_from_path() {
        let doc = AuthorDocument::from_path("en/0a1b2c.xml").unwrap();
        assert_eq!("0a1b2c", doc.author);
        assert!(AuthorDocument::from_path("en/truth.txt").is_none());
        assert!(AuthorDocument::from_path("en/noext").is_none());
    }

    #[test]
    fn test_dataset_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Dataset::open(dir.path().join("missing")),
            Err(TweetGenderError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_dataset_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b2.xml"), document(&["x", "y"])).unwrap();
        fs::write(dir.path().join("a1.xml"), document(&["x", "y"])).unwrap();
        fs::write(dir.path().join("truth.txt"), "a1:::male\nb2:::female\n").unwrap();
        fs::create_dir(dir.path().join("c3.xml")).unwrap();

        let dataset = Dataset::open(dir.path()).unwrap();
        let authors: Vec<_> = dataset
            .author_documents()
            .unwrap()
            .into_iter()
            .map(|doc| doc.author)
            .collect();
        assert_eq!(vec!["a1".to_string(), "b2".to_string()], authors);
        assert_eq!(dir.path().join("truth.txt"), dataset.truth_path());
    }

    #[test]
    fn test_read_tweets_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(&path, "<author>").unwrap();
        let doc = AuthorDocument::from_path(&path).unwrap();
        let err = doc.read_tweets().unwrap_err();
        assert!(err.to_string().contains("bad.xml"));
    }
}
