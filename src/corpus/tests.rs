//! Corpus Module Tests
//!
//! ## Test Scopes
//! - **Scanner**: whitespace tokenisation, exact matching, unreadable files,
//!   chunked reads, timeouts and retries.
//! - **Enumerator**: pattern matching, directory skipping, malformed patterns.
//! - **Aggregator**: TF/DF reduction and partial-failure tolerance.

#[cfg(test)]
mod tests {
    use crate::corpus::aggregator::FrequencyAggregator;
    use crate::corpus::enumerator::Corpus;
    use crate::corpus::scanner::{
        MAX_TOKEN_RUN, READ_CHUNK, count_in_file, count_in_text, scan_file,
    };
    use crate::corpus::types::{FileScan, ScanOptions};
    use crate::error::StatsError;
    use crate::stats::types::Measurement;
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    /// Creates a named pipe. Opening it for reading blocks until a writer shows up.
    #[cfg(unix)]
    fn make_fifo(path: &Path) {
        let status = std::process::Command::new("mkfifo")
            .arg(path)
            .status()
            .unwrap();
        assert!(status.success());
    }

    /// Keeps opening the pipe for writing on a detached thread, so every
    /// reader blocked on it (now or later) gets `content` and then EOF.
    #[cfg(unix)]
    fn feed_fifo_forever(path: PathBuf, content: &'static str) {
        use std::io::Write;
        std::thread::spawn(move || loop {
            match std::fs::OpenOptions::new().write(true).open(&path) {
                Ok(mut writer) => {
                    // The reader may already be gone
                    let _ = writer.write_all(content.as_bytes());
                }
                Err(_) => break,
            }
        });
    }

    fn write_corpus(files: &[(&str, &str)]) -> (TempDir, Corpus) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let pattern = format!("{}/*.txt", dir.path().display());
        (dir, Corpus::new(pattern))
    }

    fn aggregator(corpus: Corpus) -> FrequencyAggregator {
        FrequencyAggregator::new(corpus, 4, ScanOptions::default())
    }

    // ============================================================
    // SCANNER TESTS
    // ============================================================

    #[test]
    fn test_count_in_text_exact_matches() {
        assert_eq!(count_in_text("cat dog cat", "cat"), 2);
        assert_eq!(count_in_text("cat dog cat", "dog"), 1);
        assert_eq!(count_in_text("cat dog cat", "bird"), 0);
    }

    #[test]
    fn test_count_in_text_is_case_sensitive_and_literal() {
        // No case folding
        assert_eq!(count_in_text("Cat CAT cat", "cat"), 1);
        // Punctuation stays part of the token
        assert_eq!(count_in_text("cat, cat. cat", "cat"), 1);
        // No substring matches
        assert_eq!(count_in_text("category concat", "cat"), 0);
    }

    #[test]
    fn test_count_in_text_whitespace_runs() {
        assert_eq!(count_in_text("  cat\t\tcat \n\n cat   ", "cat"), 3);
        assert_eq!(count_in_text("", "cat"), 0);
        assert_eq!(count_in_text("cat dog", ""), 0);
    }

    #[tokio::test]
    async fn test_scan_file_counts_across_lines() {
        let (dir, _) = write_corpus(&[("a.txt", "cat dog\ncat\n\ndog cat")]);

        let scan = scan_file(&dir.path().join("a.txt"), "cat", &ScanOptions::default()).await;

        assert_eq!(scan, FileScan { occurrences: 3, present: true });
    }

    #[tokio::test]
    async fn test_scan_file_word_absent() {
        let (dir, _) = write_corpus(&[("a.txt", "cat dog cat")]);

        let scan = scan_file(&dir.path().join("a.txt"), "bird", &ScanOptions::default()).await;

        assert_eq!(scan, FileScan::default());
        assert!(!scan.present);
    }

    #[tokio::test]
    async fn test_scan_missing_file_contributes_nothing() {
        let dir = TempDir::new().unwrap();

        let scan = scan_file(&dir.path().join("gone.txt"), "cat", &ScanOptions::default()).await;

        assert_eq!(scan, FileScan::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_retried() {
        let dir = TempDir::new().unwrap();
        let options = ScanOptions {
            timeout: None,
            attempts: 5,
        };

        let started = Instant::now();
        let scan = scan_file(&dir.path().join("gone.txt"), "cat", &options).await;

        // Retries back off for at least 150ms, so a quick return means none happened
        assert_eq!(scan, FileScan::default());
        assert!(started.elapsed() < Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_invalid_utf8_only_affects_its_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, b"cat \xff\xfe dog\ncat").unwrap();

        let scan = count_in_file(&path, "cat").await.unwrap();

        assert_eq!(scan.occurrences, 2);
    }

    #[tokio::test]
    async fn test_generous_timeout_does_not_interfere() {
        let (dir, _) = write_corpus(&[("a.txt", "cat cat")]);
        let options = ScanOptions {
            timeout: Some(Duration::from_secs(5)),
            attempts: 1,
        };

        let scan = scan_file(&dir.path().join("a.txt"), "cat", &options).await;

        assert_eq!(scan.occurrences, 2);
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_scan_exceeding_timeout_contributes_nothing() {
        // ARRANGE: a pipe nobody writes to never finishes opening
        let dir = TempDir::new().unwrap();
        let fifo = dir.path().join("stuck.txt");
        make_fifo(&fifo);
        let options = ScanOptions {
            timeout: Some(Duration::from_millis(50)),
            attempts: 1,
        };

        // ACT
        let started = Instant::now();
        let scan = scan_file(&fifo, "cat", &options).await;
        let elapsed = started.elapsed();
        feed_fifo_forever(fifo, "cat cat");

        // ASSERT
        assert_eq!(scan, FileScan::default());
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timed_out_scan_is_retried() {
        // ARRANGE
        let dir = TempDir::new().unwrap();
        let fifo = dir.path().join("stuck.txt");
        make_fifo(&fifo);
        let options = ScanOptions {
            timeout: Some(Duration::from_millis(50)),
            attempts: 2,
        };

        // ACT
        let started = Instant::now();
        let scan = scan_file(&fifo, "cat", &options).await;
        let elapsed = started.elapsed();
        feed_fifo_forever(fifo, "cat");

        // ASSERT: two timeouts plus at least one 150ms backoff
        assert_eq!(scan, FileScan::default());
        assert!(
            elapsed >= Duration::from_millis(250),
            "expected a second attempt, finished after {:?}",
            elapsed
        );
    }

    // ============================================================
    // CHUNKED READING
    // ============================================================

    #[tokio::test]
    async fn test_token_split_across_chunks() {
        // "cat" straddles the first chunk boundary
        let mut content = "a".repeat(READ_CHUNK - 2);
        content.push_str(" cat cat");
        let (dir, _) = write_corpus(&[("a.txt", content.as_str())]);

        let scan = count_in_file(&dir.path().join("a.txt"), "cat").await.unwrap();

        assert_eq!(scan.occurrences, 2);
    }

    #[tokio::test]
    async fn test_large_file_without_newlines() {
        let content = "cat dog ".repeat(50_000);
        let (dir, _) = write_corpus(&[("a.txt", content.as_str())]);

        let scan = count_in_file(&dir.path().join("a.txt"), "dog").await.unwrap();

        assert_eq!(scan.occurrences, 50_000);
    }

    #[tokio::test]
    async fn test_overlong_run_is_skipped() {
        // ARRANGE: a run far longer than the buffer limit, then normal tokens
        let mut content = "cat ".to_string();
        content.push_str(&"z".repeat(MAX_TOKEN_RUN * 3));
        content.push_str("\ncat cat");
        let (dir, _) = write_corpus(&[("a.txt", content.as_str())]);

        // ACT
        let scan = count_in_file(&dir.path().join("a.txt"), "cat").await.unwrap();

        // ASSERT: tokens on both sides of the run still count
        assert_eq!(scan.occurrences, 3);
    }

    #[tokio::test]
    async fn test_multibyte_text_across_chunks() {
        let content = "żółw kot ".repeat(20_000);
        let (dir, _) = write_corpus(&[("a.txt", content.as_str())]);

        let scan = count_in_file(&dir.path().join("a.txt"), "żółw").await.unwrap();

        assert_eq!(scan.occurrences, 20_000);
    }

    // ============================================================
    // ENUMERATOR TESTS
    // ============================================================

    #[test]
    fn test_list_files_matches_pattern_only() {
        let (dir, corpus) = write_corpus(&[
            ("a.txt", "x"),
            ("b.txt", "y"),
            ("notes.md", "z"),
        ]);
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let mut files = corpus.list_files().unwrap();
        files.sort();

        // .md does not match, directory is skipped
        assert_eq!(files, vec![dir.path().join("a.txt"), dir.path().join("b.txt")]);
    }

    #[test]
    fn test_list_files_sees_new_files() {
        let (dir, corpus) = write_corpus(&[("a.txt", "x")]);
        assert_eq!(corpus.list_files().unwrap().len(), 1);

        std::fs::write(dir.path().join("b.txt"), "y").unwrap();

        // No caching between calls
        assert_eq!(corpus.list_files().unwrap().len(), 2);
    }

    #[test]
    fn test_list_files_empty_directory() {
        let (_dir, corpus) = write_corpus(&[]);
        assert!(corpus.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_pattern_is_an_error() {
        let corpus = Corpus::new("data/[unclosed");

        let result = corpus.list_files();

        assert!(matches!(result, Err(StatsError::CorpusPattern(_))));
    }

    // ============================================================
    // AGGREGATOR TESTS
    // ============================================================

    #[tokio::test]
    async fn test_aggregation_example() {
        let (_dir, corpus) = write_corpus(&[("a.txt", "cat dog cat"), ("b.txt", "dog dog")]);
        let aggregator = aggregator(corpus);

        assert_eq!(
            aggregator.compute_frequencies("dog").await.unwrap(),
            Measurement::new(3, 2)
        );
        assert_eq!(
            aggregator.compute_frequencies("cat").await.unwrap(),
            Measurement::new(2, 1)
        );
        assert_eq!(
            aggregator.compute_frequencies("bird").await.unwrap(),
            Measurement::new(0, 0)
        );
    }

    #[tokio::test]
    async fn test_unreadable_file_only_drops_its_own_contribution() {
        // ARRANGE: file B is listed but cannot be opened
        let (dir, corpus) = write_corpus(&[("a.txt", "cat dog cat")]);
        let aggregator = aggregator(corpus);
        let files = vec![dir.path().join("a.txt"), dir.path().join("b.txt")];

        // ACT
        let measurement = aggregator.frequencies_in(files, "dog").await;

        // ASSERT: only A counts
        assert_eq!(measurement, Measurement::new(1, 1));
    }

    #[tokio::test]
    async fn test_listing_failure_is_not_zero() {
        let aggregator = aggregator(Corpus::new("data/[unclosed"));

        let result = aggregator.compute_frequencies("cat").await;

        assert!(matches!(result, Err(StatsError::CorpusPattern(_))));
    }

    #[tokio::test]
    async fn test_unchanged_corpus_gives_identical_measurements() {
        let (_dir, corpus) = write_corpus(&[
            ("a.txt", "the quick brown fox"),
            ("b.txt", "the lazy dog the end"),
            ("c.txt", "nothing here"),
        ]);
        let aggregator = aggregator(corpus);

        let first = aggregator.compute_frequencies("the").await.unwrap();
        let second = aggregator.compute_frequencies("the").await.unwrap();

        assert_eq!(first, Measurement::new(3, 2));
        assert_eq!(first, second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_files_with_small_pool() {
        // More files than workers: everything still gets scanned
        let names: Vec<String> = (0..40).map(|i| format!("f{}.txt", i)).collect();
        let files: Vec<(&str, &str)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), if i % 2 == 0 { "hit hit" } else { "miss" }))
            .collect();
        let (_dir, corpus) = write_corpus(&files);
        let aggregator = FrequencyAggregator::new(corpus, 3, ScanOptions::default());

        let measurement = aggregator.compute_frequencies("hit").await.unwrap();

        assert_eq!(measurement, Measurement::new(40, 20));
    }
}
