//! Definition of errors.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cache::CacheSlot;

pub type Result<T, E = TweetGenderError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TweetGenderError {
    #[error(transparent)]
    DatasetNotFound(#[from] DatasetNotFoundError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    ZeroTokenAuthor(#[from] ZeroTokenAuthorError),

    #[error(transparent)]
    CacheCorruption(#[from] CacheCorruptionError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error(transparent)]
    TaggerModel(#[from] TaggerModelError),

    #[error("ClassifierError: {0}")]
    Classifier(String),

    #[error(transparent)]
    UTF8Error(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    SerializeError(#[from] bincode::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl TweetGenderError {
    pub(crate) fn dataset_not_found<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::DatasetNotFound(DatasetNotFoundError { path: path.into() })
    }

    pub(crate) fn parse<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Parse(ParseError {
            path: None,
            msg: msg.into(),
        })
    }

    pub(crate) fn format<S>(line_no: usize, line: S) -> Self
    where
        S: Into<String>,
    {
        Self::Format(FormatError {
            line_no,
            line: line.into(),
        })
    }

    pub(crate) fn zero_token_author<S>(author: S) -> Self
    where
        S: Into<String>,
    {
        Self::ZeroTokenAuthor(ZeroTokenAuthorError {
            author: author.into(),
        })
    }

    pub(crate) fn cache_corruption<S>(slot: CacheSlot, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::CacheCorruption(CacheCorruptionError {
            slot,
            msg: msg.into(),
        })
    }

    pub(crate) fn tagger_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::TaggerModel(TaggerModelError { msg: msg.into() })
    }

    #[cfg(feature = "train")]
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// Attaches the path of the parsed document to a [`ParseError`].
    pub(crate) fn in_file<P>(self, path: P) -> Self
    where
        P: AsRef<Path>,
    {
        match self {
            Self::Parse(e) => Self::Parse(ParseError {
                path: Some(path.as_ref().to_path_buf()),
                ..e
            }),
            e => e,
        }
    }
}

/// Error used when a dataset directory or file does not exist.
#[derive(Debug, Error)]
#[error("DatasetNotFoundError: {}", .path.display())]
pub struct DatasetNotFoundError {
    /// Missing path.
    pub(crate) path: PathBuf,
}

impl DatasetNotFoundError {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Error used when an author document lacks an expected marker.
#[derive(Debug, Error)]
pub struct ParseError {
    /// Path of the document, if known.
    pub(crate) path: Option<PathBuf>,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "ParseError: {}: {}", path.display(), self.msg),
            None => write!(f, "ParseError: {}", self.msg),
        }
    }
}

/// Error used when a line of the truth file is malformed.
#[derive(Debug, Error)]
#[error("FormatError: line {line_no}: expected `<author>:::<gender>`, got {line:?}")]
pub struct FormatError {
    /// 1-based line number.
    pub(crate) line_no: usize,

    /// The malformed line.
    pub(crate) line: String,
}

/// Error used when an author has no tagged token.
#[derive(Debug, Error)]
#[error("ZeroTokenAuthorError: author {author:?} has no tagged token")]
pub struct ZeroTokenAuthorError {
    /// Author ID.
    pub(crate) author: String,
}

impl ZeroTokenAuthorError {
    pub fn author(&self) -> &str {
        &self.author
    }
}

/// Error used when a cache slot cannot be read back.
#[derive(Debug, Error)]
#[error("CacheCorruptionError: {slot}: {msg}")]
pub struct CacheCorruptionError {
    /// Slot that failed.
    pub(crate) slot: CacheSlot,

    /// Error message.
    pub(crate) msg: String,
}

impl CacheCorruptionError {
    pub const fn slot(&self) -> CacheSlot {
        self.slot
    }
}

/// Error used when the argument is invalid.
#[derive(Debug, Error)]
#[error("InvalidArgumentError: {arg}: {msg}")]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

/// Error used when the tagger model cannot be loaded.
#[derive(Debug, Error)]
#[error("TaggerModelError: {msg}")]
pub struct TaggerModelError {
    /// Error message.
    pub(crate) msg: String,
}
