use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::utils::error::GpsError;

/// Longest status line kept, in bytes.
pub const STATUS_MAX_LEN: usize = 127;

/// A rendered status line, capped at [`STATUS_MAX_LEN`] bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusString(String);

impl StatusString {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.len() > STATUS_MAX_LEN {
            let mut end = STATUS_MAX_LEN;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CachedStatus {
    pub status: StatusString,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Latest status line. Each store replaces the whole value under the write lock.
#[derive(Debug, Clone, Default)]
pub struct ReadingCache {
    inner: Arc<RwLock<CachedStatus>>,
}

impl ReadingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, status: StatusString) -> Result<(), GpsError> {
        let mut cached = self.inner.write().map_err(|_| GpsError::LockError)?;
        *cached = CachedStatus {
            status,
            updated_at: Some(Utc::now()),
        };
        Ok(())
    }

    pub fn current(&self) -> Result<StatusString, GpsError> {
        Ok(self.snapshot()?.status)
    }

    pub fn snapshot(&self) -> Result<CachedStatus, GpsError> {
        let cached = self.inner.read().map_err(|_| GpsError::LockError)?;
        Ok(cached.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_long_line_is_capped() {
        let status = StatusString::new("x".repeat(200));
        assert_eq!(status.as_str().len(), STATUS_MAX_LEN);
    }

    #[test]
    fn test_cap_respects_char_boundary() {
        let text = format!("{}é", "a".repeat(126));
        let status = StatusString::new(text);
        assert_eq!(status.as_str(), "a".repeat(126));
    }

    #[test]
    fn test_store_overwrites() {
        let cache = ReadingCache::new();
        assert_eq!(cache.current().unwrap().as_str(), "");
        assert!(cache.snapshot().unwrap().updated_at.is_none());

        cache.store(StatusString::new("No GPS Data")).unwrap();
        cache.store(StatusString::new("Failed to read Data from GPS")).unwrap();

        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot.status.as_str(), "Failed to read Data from GPS");
        assert!(snapshot.updated_at.is_some());
    }

    #[test]
    fn test_readers_see_whole_values() {
        let cache = ReadingCache::new();
        let long = "L".repeat(100);
        let short = "s".to_string();

        let writer = {
            let cache = cache.clone();
            let (long, short) = (long.clone(), short.clone());
            thread::spawn(move || {
                for i in 0..500 {
                    let text = if i % 2 == 0 { &long } else { &short };
                    cache.store(StatusString::new(text.as_str())).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let seen = cache.current().unwrap();
            assert!(seen.as_str().is_empty() || seen.as_str() == long || seen.as_str() == short);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_snapshot_serializes_status_as_string() {
        let cache = ReadingCache::new();
        cache.store(StatusString::new("No GPS Data")).unwrap();
        let json = serde_json::to_value(cache.snapshot().unwrap()).unwrap();
        assert_eq!(json["status"], "No GPS Data");
        assert!(json["updated_at"].is_string());
    }
}
