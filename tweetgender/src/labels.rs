use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TweetGenderError};

const FIELD_SEPARATOR: &str = ":::";

/// Gender labels of authors in insertion order.
///
/// Iteration order is the order in which authors were first inserted. Feature rows and targets
/// are both produced by iterating this map, which keeps them aligned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct LabelMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gender of an author.
    ///
    /// If the author already exists, its label is replaced and its position is kept.
    ///
    /// # Returns
    ///
    /// The previous label of the author.
    pub fn insert<A, G>(&mut self, author: A, gender: G) -> Option<String>
    where
        A: Into<String>,
        G: Into<String>,
    {
        let author = author.into();
        let gender = gender.into();
        if let Some(&i) = self.index.get(&author) {
            return Some(std::mem::replace(&mut self.entries[i].1, gender));
        }
        self.index.insert(author.clone(), self.entries.len());
        self.entries.push((author, gender));
        None
    }

    /// Gets the gender of an author.
    pub fn get(&self, author: &str) -> Option<&str> {
        self.index
            .get(author)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, author: &str) -> bool {
        self.index.contains_key(author)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates pairs of an author ID and a gender in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(author, gender)| (author.as_str(), gender.as_str()))
    }

    /// Iterates author IDs in insertion order.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(author, _)| author)
    }

    /// Iterates genders in insertion order.
    pub fn genders(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(_, gender)| gender)
    }
}

impl From<Vec<(String, String)>> for LabelMap {
    fn from(entries: Vec<(String, String)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<LabelMap> for Vec<(String, String)> {
    fn from(labels: LabelMap) -> Self {
        labels.entries
    }
}

impl<A, G> FromIterator<(A, G)> for LabelMap
where
    A: Into<String>,
    G: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (A, G)>,
    {
        let mut labels = Self::new();
        for (author, gender) in iter {
            labels.insert(author, gender);
        }
        labels
    }
}

/// Parses a truth file.
///
/// Each line is `<author>:::<gender>`, optionally followed by further `:::`-separated fields that
/// are ignored. Surrounding whitespace of each line is removed before splitting.
///
/// # Errors
///
/// [`TweetGenderError::Format`] is returned for a line with fewer than two fields.
///
/// # Examples
///
/// ```
/// use tweetgender::parse_labels;
///
/// let labels = parse_labels("author1:::female:::extra\n".as_bytes()).unwrap();
/// assert_eq!(Some("female"), labels.get("author1"));
/// ```
pub fn parse_labels<R>(rdr: R) -> Result<LabelMap>
where
    R: BufRead,
{
    let mut labels = LabelMap::new();
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        let mut fields = line.trim().split(FIELD_SEPARATOR);
        match (fields.next(), fields.next()) {
            (Some(author), Some(gender)) => {
                labels.insert(author, gender);
            }
            _ => return Err(TweetGenderError::format(i + 1, line)),
        }
    }
    Ok(labels)
}

/// Loads a truth file.
///
/// # Errors
///
/// [`TweetGenderError::DatasetNotFound`] is returned if the file does not exist. See also
/// [`parse_labels`].
pub fn load_labels<P>(path: P) -> Result<LabelMap>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TweetGenderError::dataset_not_found(path));
        }
        Err(e) => return Err(e.into()),
    };
    parse_labels(BufReader::new(f))
}
