use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "sweepctl.log";

/// Size limits of the log file: once it grows past `max_bytes` it is cut
/// back to roughly its last `keep_bytes`.
#[derive(Debug, Clone, Copy)]
struct LogLimits {
    max_bytes: u64,
    keep_bytes: u64,
}

impl Default for LogLimits {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

const ROTATION_MARKER: &[u8] = b"--- sweepctl log truncated, older entries dropped ---\n";

/// Default directory for the log file (`~/.sweepctl/`)
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sweepctl")
}

/// Last `keep` bytes of `file`, starting at a line boundary
fn read_tail(file: &mut File, len: u64, keep: u64) -> io::Result<Vec<u8>> {
    file.seek(SeekFrom::Start(len.saturating_sub(keep)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    if len > keep {
        let first_line = tail.iter().position(|&b| b == b'\n').map_or(0, |i| i + 1);
        tail.drain(..first_line);
    }
    Ok(tail)
}

/// Cut the log back to its tail when it exceeds the limits. Returns whether
/// the file was truncated.
fn truncate_log(path: &Path, limits: LogLimits) -> io::Result<bool> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let len = file.metadata()?.len();
    if len <= limits.max_bytes {
        return Ok(false);
    }

    let tail = read_tail(&mut file, len, limits.keep_bytes)?;
    drop(file);
    fs::write(path, [ROTATION_MARKER, tail.as_slice()].concat())?;
    Ok(true)
}

fn open_log_file(log_dir: &Path) -> color_eyre::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);

    // Logging is not up yet, so a failed truncation can only go to stderr
    if let Err(e) = truncate_log(&path, LogLimits::default()) {
        eprintln!("warning: could not truncate {}: {e}", path.display());
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Initialize logging to stderr and, when `log_dir` is given, to
/// `{log_dir}/sweepctl.log` with size-based rotation.
///
/// Past 5 MB the file is cut back to its most recent 1 MB of whole lines.
/// The level comes from `RUST_LOG` when set, otherwise from `level`.
pub fn init_logging(log_dir: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("sweepctl={level},sweepctl_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let log_file = log_dir.map(open_log_file).transpose()?;
    let log_path = log_file.as_ref().map(|(path, _)| path.clone());
    let file_layer = log_file.map(|(_, file)| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(file_layer)
        .init();

    if let Some(path) = log_path {
        tracing::debug!(log_path = %path.display(), "file logging enabled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SMALL: LogLimits = LogLimits {
        max_bytes: 500,
        keep_bytes: 100,
    };

    #[test]
    fn test_truncate_keeps_recent_whole_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let lines: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &lines).unwrap();

        assert!(truncate_log(&path, SMALL).unwrap());

        let truncated = fs::read(&path).unwrap();
        assert!(truncated.starts_with(ROTATION_MARKER));
        let kept = String::from_utf8(truncated[ROTATION_MARKER.len()..].to_vec()).unwrap();
        assert!(kept.len() <= 100);
        assert!(kept.lines().all(|l| l.len() == 8 && l.starts_with("line ")));
        assert_eq!(kept.lines().last(), Some("line 099"));
    }

    #[test]
    fn test_truncate_leaves_small_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "short\n").unwrap();

        assert!(!truncate_log(&path, SMALL).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_truncate_ignores_missing_file() {
        let dir = tempdir().unwrap();
        assert!(!truncate_log(&dir.path().join(LOG_FILE_NAME), SMALL).unwrap());
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let (path, _file) = open_log_file(&log_dir).unwrap();

        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
