use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::errors::{Result, TweetGenderError};

/// Intermediate result stored in a cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheSlot {
    /// [`LabelMap`](crate::LabelMap) loaded from the truth file.
    AuthorGenders,

    /// [`TaggedCorpus`](crate::TaggedCorpus) of all authors.
    TweetsTagged,

    /// Scaled feature matrix.
    VectorizedFeatures,
}

impl CacheSlot {
    pub const ALL: [Self; 3] = [
        Self::AuthorGenders,
        Self::TweetsTagged,
        Self::VectorizedFeatures,
    ];

    /// Gets the name of the slot.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AuthorGenders => "author_genders",
            Self::TweetsTagged => "tweets_tagged",
            Self::VectorizedFeatures => "vectorized_features",
        }
    }
}

impl fmt::Display for CacheSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CacheSlot {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or("Unknown cache slot.")
    }
}

/// Storage of serialized intermediate results.
pub trait Cache {
    /// Gets the blob of a slot.
    ///
    /// # Returns
    ///
    /// `None` if the slot has never been stored.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::CacheCorruption`] is returned if the stored blob cannot be read back.
    fn get(&self, slot: CacheSlot) -> Result<Option<Vec<u8>>>;

    /// Stores the blob of a slot, replacing the previous one.
    fn put(&mut self, slot: CacheSlot, blob: &[u8]) -> Result<()>;

    /// Removes a slot.
    ///
    /// # Returns
    ///
    /// `true` if the slot existed.
    fn remove(&mut self, slot: CacheSlot) -> Result<bool>;
}

/// Cache storing one zstd-compressed file per slot in a directory.
#[derive(Clone, Debug)]
pub struct FileCache {
    dir: PathBuf,
    compression_level: i32,
}

impl FileCache {
    /// Extension of slot files.
    pub const EXTENSION: &'static str = "bin.zst";

    /// Creates a new cache in the given directory.
    ///
    /// The directory is created on the first write.
    pub fn new<P>(dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            dir: dir.into(),
            compression_level: zstd::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the zstd compression level used for writing.
    pub const fn compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Gets the path of the file storing a slot.
    pub fn slot_path(&self, slot: CacheSlot) -> PathBuf {
        self.dir.join(format!("{}.{}", slot.name(), Self::EXTENSION))
    }
}

impl Cache for FileCache {
    fn get(&self, slot: CacheSlot) -> Result<Option<Vec<u8>>> {
        let path = self.slot_path(slot);
        let f = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TweetGenderError::cache_corruption(slot, e.to_string())),
        };
        let mut blob = vec![];
        zstd::Decoder::new(f)
            .and_then(|mut dec| dec.read_to_end(&mut blob))
            .map_err(|e| {
                TweetGenderError::cache_corruption(slot, format!("{}: {}", path.display(), e))
            })?;
        debug!(%slot, path = %path.display(), n_bytes = blob.len(), "read cache file");
        Ok(Some(blob))
    }

    fn put(&mut self, slot: CacheSlot, blob: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(slot);
        // Each writer gets its own temporary file, so concurrent writers never share one.
        let tmp = NamedTempFile::new_in(&self.dir)?;
        let mut enc = zstd::Encoder::new(tmp, self.compression_level)?;
        enc.write_all(blob)?;
        let tmp = enc.finish()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(%slot, path = %path.display(), n_bytes = blob.len(), "wrote cache file");
        Ok(())
    }

    fn remove(&mut self, slot: CacheSlot) -> Result<bool> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Cache holding blobs in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    blobs: HashMap<CacheSlot, Vec<u8>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, slot: CacheSlot) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(&slot).cloned())
    }

    fn put(&mut self, slot: CacheSlot, blob: &[u8]) -> Result<()> {
        self.blobs.insert(slot, blob.to_vec());
        Ok(())
    }

    fn remove(&mut self, slot: CacheSlot) -> Result<bool> {
        Ok(self.blobs.remove(&slot).is_some())
    }
}

/// Loads and decodes a value from a cache slot.
///
/// A corrupted or undecodable blob is reported with a warning and treated as a miss.
///
/// # Returns
///
/// `None` on a miss.
///
/// # Errors
///
/// Errors of the backend other than [`TweetGenderError::CacheCorruption`] are returned as is.
pub fn load_slot<C, T>(cache: &C, slot: CacheSlot) -> Result<Option<T>>
where
    C: Cache + ?Sized,
    T: DeserializeOwned,
{
    let blob = match cache.get(slot) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!(%slot, "cache miss");
            return Ok(None);
        }
        Err(TweetGenderError::CacheCorruption(e)) => {
            warn!(%slot, error = %e, "ignoring corrupted cache");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    match bincode::deserialize(&blob) {
        Ok(value) => {
            info!(%slot, "cache hit");
            Ok(Some(value))
        }
        Err(e) => {
            warn!(%slot, error = %e, "ignoring undecodable cache");
            Ok(None)
        }
    }
}

/// Encodes and stores a value in a cache slot.
pub fn store_slot<C, T>(cache: &mut C, slot: CacheSlot, value: &T) -> Result<()>
where
    C: Cache + ?Sized,
    T: Serialize + ?Sized,
{
    let blob = bincode::serialize(value)?;
    cache.put(slot, &blob)?;
    info!(%slot, n_bytes = blob.len(), "stored cache");
    Ok(())
}
