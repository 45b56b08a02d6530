use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use mockall::automock;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

const OTP_TTL_MINUTES: i64 = 5;
const SWEEP_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct OtpEntry {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Key-value seam for in-flight OTP codes. The in-memory implementation is
/// process-local; a shared TTL store can replace it behind this trait.
#[automock]
pub trait OtpCache: Send + Sync {
    fn put(&self, phone: &str, entry: OtpEntry);
    fn get(&self, phone: &str) -> Option<OtpEntry>;
    fn delete(&self, phone: &str);
    fn purge_expired(&self, now: DateTime<Utc>);
}

#[derive(Default)]
pub struct InMemoryOtpCache {
    entries: Mutex<HashMap<String, OtpEntry>>,
}

impl InMemoryOtpCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OtpCache for InMemoryOtpCache {
    fn put(&self, phone: &str, entry: OtpEntry) {
        let mut entries = self.entries.lock().expect("OTP cache lock poisoned");
        entries.insert(phone.to_string(), entry);
    }

    fn get(&self, phone: &str) -> Option<OtpEntry> {
        let entries = self.entries.lock().expect("OTP cache lock poisoned");
        entries.get(phone).cloned()
    }

    fn delete(&self, phone: &str) {
        let mut entries = self.entries.lock().expect("OTP cache lock poisoned");
        entries.remove(phone);
    }

    fn purge_expired(&self, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().expect("OTP cache lock poisoned");
        entries.retain(|_, entry| entry.expires_at >= now);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpVerifyError {
    #[error("OTP not found or expired")]
    NotFound,
    #[error("OTP expired")]
    Expired,
    #[error("Invalid OTP")]
    Mismatch,
}

pub struct OtpStore<C>
where
    C: OtpCache,
{
    cache: C,
}

impl<C> OtpStore<C>
where
    C: OtpCache,
{
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    /// 6-digit numeric code, left-padded with zeros.
    pub fn generate(&self) -> String {
        let code: u32 = rand::thread_rng().gen_range(0..=999_999);
        format!("{:06}", code)
    }

    /// Overwrites any unexpired entry for the phone.
    pub fn store(&self, phone: &str, code: &str) {
        self.cache.put(
            phone,
            OtpEntry {
                code: code.to_string(),
                expires_at: Utc::now() + Duration::minutes(OTP_TTL_MINUTES),
            },
        );
        debug!(phone, "OTP stored, expires in {} minutes", OTP_TTL_MINUTES);
    }

    /// Checks the code for the phone. On success the entry is deleted only
    /// when `consume` is true, so a caller can pre-check validity while a
    /// later step still needs the code.
    pub fn verify(&self, phone: &str, code: &str, consume: bool) -> Result<(), OtpVerifyError> {
        let entry = self.cache.get(phone).ok_or(OtpVerifyError::NotFound)?;

        if Utc::now() > entry.expires_at {
            self.cache.delete(phone);
            return Err(OtpVerifyError::Expired);
        }

        if entry.code != code {
            return Err(OtpVerifyError::Mismatch);
        }

        if consume {
            self.cache.delete(phone);
        }
        Ok(())
    }

    pub fn sweep(&self) {
        self.cache.purge_expired(Utc::now());
    }
}

/// Fixed-interval cleanup; entries are otherwise only removed via `verify`.
pub fn spawn_sweeper<C>(store: Arc<OtpStore<C>>)
where
    C: OtpCache + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(StdDuration::from_secs(SWEEP_INTERVAL_SECS));
        interval.tick().await;
        loop {
            interval.tick().await;
            store.sweep();
        }
    });
}

#[cfg(test)]
mod tests;
