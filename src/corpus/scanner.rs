//! Frequency Scanner
//!
//! Counts how often a word occurs in a single file. Tokens are maximal runs of
//! non-whitespace characters and are compared byte for byte with the word: no
//! case folding, no stemming, no punctuation stripping.

use super::types::{FileScan, ScanOptions};

use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Scans `path` for `word`, never failing.
///
/// Read errors are retried according to `options` when they look transient.
/// Once the attempts are used up, or for errors such as a missing file, the
/// failure is logged and the file counts as `FileScan::default()` (zero
/// occurrences, not present).
pub async fn scan_file(path: &Path, word: &str, options: &ScanOptions) -> FileScan {
    let attempts = options.attempts.max(1);
    let mut delay_ms = 150u64;

    for attempt in 0..attempts {
        match scan_once(path, word, options.timeout).await {
            Ok(scan) => return scan,
            Err(e) => {
                if attempt + 1 == attempts || !is_transient(&e) {
                    tracing::warn!(
                        "Error scanning file {} for word '{}': {}",
                        path.display(),
                        word,
                        e
                    );
                    return FileScan::default();
                }

                tracing::debug!(
                    "Retrying scan of {} (attempt {} of {}): {}",
                    path.display(),
                    attempt + 1,
                    attempts,
                    e
                );
                let jitter = rand::random::<u64>() % 50;
                tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                delay_ms = (delay_ms * 2).min(1200);
            }
        }
    }

    FileScan::default()
}

async fn scan_once(path: &Path, word: &str, timeout: Option<Duration>) -> io::Result<FileScan> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, count_in_file(path, word))
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("scan did not finish within {:?}", limit),
                )
            })?,
        None => count_in_file(path, word).await,
    }
}

/// Bytes read from the file per call.
pub const READ_CHUNK: usize = 64 * 1024;

/// Longest run without ASCII whitespace that is buffered. Longer runs are
/// skipped; they cannot be a token equal to any word shorter than this.
pub const MAX_TOKEN_RUN: usize = 64 * 1024;

/// Streams the file in fixed-size chunks and counts exact token matches.
///
/// Chunks are only split at ASCII whitespace, which never occurs inside a
/// multi-byte UTF-8 sequence, so the unfinished token at the end of a chunk is
/// carried into the next one. Memory use is bounded by `READ_CHUNK` plus
/// `MAX_TOKEN_RUN` regardless of line length.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// stray binary byte only affects the token it sits in.
pub async fn count_in_file(path: &Path, word: &str) -> io::Result<FileScan> {
    let mut file = File::open(path).await?;
    let mut chunk = vec![0u8; READ_CHUNK];
    let mut pending: Vec<u8> = Vec::new();
    let max_run = MAX_TOKEN_RUN.max(word.len());
    let mut skipping = false;
    let mut occurrences = 0u64;

    loop {
        let read = file.read(&mut chunk).await?;
        if read == 0 {
            break;
        }

        let mut data = &chunk[..read];
        if skipping {
            match data.iter().position(u8::is_ascii_whitespace) {
                Some(pos) => {
                    skipping = false;
                    data = &data[pos..];
                }
                None => continue,
            }
        }

        pending.extend_from_slice(data);
        if let Some(pos) = pending.iter().rposition(u8::is_ascii_whitespace) {
            occurrences += count_in_text(&String::from_utf8_lossy(&pending[..pos]), word);
            pending.drain(..=pos);
        }

        if pending.len() > max_run {
            tracing::debug!(
                "Skipping a run of more than {} bytes without whitespace in {}",
                max_run,
                path.display()
            );
            pending.clear();
            skipping = true;
        }
    }

    if !skipping {
        occurrences += count_in_text(&String::from_utf8_lossy(&pending), word);
    }

    Ok(FileScan::from_occurrences(occurrences))
}

/// Counts whitespace-delimited tokens in `text` equal to `word`.
pub fn count_in_text(text: &str, word: &str) -> u64 {
    text.split_whitespace().filter(|token| *token == word).count() as u64
}

fn is_transient(error: &io::Error) -> bool {
    !matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied | io::ErrorKind::InvalidInput
    )
}
