//! Test utilities and helpers for unit tests

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// Environment variables are process-global; tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Route `tracing` output through the test harness
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mystbin=trace")
        .with_test_writer()
        .try_init();
}

/// Serialize tests that read or write `MYSTBIN_*` variables
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Environment variable that is removed again on drop
///
/// Hold [`lock_env`] for as long as this is alive.
pub struct ScopedEnvVar {
    key: &'static str,
}

impl ScopedEnvVar {
    pub fn set(key: &'static str, value: &str) -> Self {
        std::env::set_var(key, value);
        Self { key }
    }
}

impl Drop for ScopedEnvVar {
    fn drop(&mut self) {
        std::env::remove_var(self.key);
    }
}

/// Write `content` to `filename` inside a fresh temp dir
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn write_temp_file(filename: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(filename);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}
