//! Best-effort cache for raw vehicle-scan responses.
//!
//! Keyed by a stable hash of the plate. No eviction, no TTL; a failed
//! write is logged and swallowed, a failed read is a miss. The client
//! treats the cache as an injected strategy: present or absent.

use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Stable cache key for a plate string.
pub fn plate_key(plate: &str) -> String {
    format!("{:x}", md5::compute(plate.as_bytes()))
}

/// Keyed put/get of raw response XML.
pub trait PlateCache: Send + Sync {
    /// Cached raw XML for `key`, or `None` on a miss.
    fn get(&self, key: &str) -> Option<String>;

    /// Store raw XML under `key`. Best effort.
    fn put(&self, key: &str, raw_xml: &str);
}

/// One file per key under a directory.
pub struct FilePlateCache {
    dir: PathBuf,
}

impl FilePlateCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl PlateCache for FilePlateCache {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn put(&self, key: &str, raw_xml: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "cannot create cache directory");
            return;
        }
        if let Err(e) = fs::write(self.path(key), raw_xml) {
            warn!(key, error = %e, "cannot write cache entry");
        }
    }
}
