use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{stdin, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Configuration for input reading.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for one completed read.
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub source: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async reader that streams an input source line-by-line into memory.
///
/// The whole input is materialized as a `Vec<String>` because every index
/// variant needs all lines resident before it can resolve.
pub struct LineReader {
    config: ReaderConfig,
}

impl LineReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a text file line-by-line with async buffered I/O.
    ///
    /// Opening or decoding failures are fatal; this crate has a single input,
    /// so there is nothing sensible to continue with.
    pub async fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<(Vec<String>, ReadStats)> {
        let path = path.as_ref();
        debug!("reading input file: {}", path.display());

        let file = File::open(path)
            .await
            .with_context(|| format!("failed to open input file {}", path.display()))?;
        let reader = BufReader::with_capacity(self.config.buffer_size, file);

        self.collect_lines(reader, path.display().to_string()).await
    }

    /// Read lines from the process's standard input.
    pub async fn read_stdin(&self) -> Result<(Vec<String>, ReadStats)> {
        debug!("reading input from stdin");
        let reader = BufReader::with_capacity(self.config.buffer_size, stdin());
        self.collect_lines(reader, "<stdin>".to_string()).await
    }

    async fn collect_lines<R>(&self, reader: R, source: String) -> Result<(Vec<String>, ReadStats)>
    where
        R: AsyncBufRead + Unpin,
    {
        let start_time = std::time::Instant::now();
        let mut lines = reader.lines();
        let mut collected = Vec::new();
        let mut byte_count = 0u64;

        while let Some(line) = lines
            .next_line()
            .await
            .with_context(|| format!("failed reading line {} of {}", collected.len() + 1, source))?
        {
            byte_count += line.len() as u64 + 1; // +1 for newline
            collected.push(line);
        }

        let stats = ReadStats {
            source,
            lines_read: collected.len() as u64,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "read {}: {} lines, {} bytes in {}ms",
            stats.source, stats.lines_read, stats.bytes_read, stats.duration_ms
        );
        Ok((collected, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<std::path::PathBuf> {
        let file_path = dir.join(name);
        fs::write(&file_path, content).await?;
        Ok(file_path)
    }

    #[tokio::test]
    async fn test_read_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = LineReader::new(ReaderConfig::default());

        let content = "Line 1\nLine 2\nLine 3";
        let file_path = create_test_file(temp_dir.path(), "test.txt", content).await.unwrap();

        let (lines, stats) = reader.read_file(&file_path).await.unwrap();

        assert_eq!(lines, vec!["Line 1", "Line 2", "Line 3"]);
        assert_eq!(stats.lines_read, 3);
        assert!(stats.bytes_read > 0);
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = LineReader::new(ReaderConfig::default());

        let file_path = create_test_file(temp_dir.path(), "empty.txt", "").await.unwrap();

        let (lines, stats) = reader.read_file(&file_path).await.unwrap();

        assert!(lines.is_empty());
        assert_eq!(stats.lines_read, 0);
        assert_eq!(stats.bytes_read, 0);
    }

    #[tokio::test]
    async fn test_read_nonexistent_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let reader = LineReader::new(ReaderConfig::default());

        let result = reader.read_file(temp_dir.path().join("missing.txt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_blank_lines_are_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let reader = LineReader::new(ReaderConfig::default());

        let file_path = create_test_file(temp_dir.path(), "blanks.txt", "a\n\nb\n").await.unwrap();

        let (lines, _) = reader.read_file(&file_path).await.unwrap();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[tokio::test]
    async fn test_custom_buffer_size() {
        let temp_dir = TempDir::new().unwrap();
        let reader = LineReader::new(ReaderConfig { buffer_size: 1024 });

        let content = "x".repeat(2048) + "\n" + &"y".repeat(2048);
        let file_path = create_test_file(temp_dir.path(), "large.txt", &content).await.unwrap();

        let (lines, _) = reader.read_file(&file_path).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2048);
        assert_eq!(lines[1].len(), 2048);
    }
}
