// StartupLens - platform/fs.rs
//
// Bounded reading of raw inputs from files or stdin.

use crate::util::error::InputError;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where a raw payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interpret a CLI argument; `-` means stdin.
    pub fn from_arg(arg: PathBuf) -> Self {
        if arg.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(arg)
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read an input fully, refusing anything larger than `max_bytes`.
///
/// Invalid UTF-8 is replaced rather than rejected: the text is free-form
/// model output and a stray byte should not discard the whole response.
pub fn read_input(source: &InputSource, max_bytes: u64) -> Result<String, InputError> {
    let io_err = |e: io::Error| InputError::Io {
        input: source.to_string(),
        source: e,
    };

    let bytes = match source {
        InputSource::File(path) => {
            let size = std::fs::metadata(path).map_err(io_err)?.len();
            if size > max_bytes {
                return Err(InputError::TooLarge {
                    input: source.to_string(),
                    size,
                    max_size: max_bytes,
                });
            }
            let file = std::fs::File::open(path).map_err(io_err)?;
            read_bounded(file, max_bytes).map_err(io_err)?
        }
        InputSource::Stdin => read_bounded(io::stdin().lock(), max_bytes).map_err(io_err)?,
    };

    // Covers stdin and files that grew between stat and read.
    if bytes.len() as u64 > max_bytes {
        return Err(InputError::TooLarge {
            input: source.to_string(),
            size: bytes.len() as u64,
            max_size: max_bytes,
        });
    }

    tracing::debug!(input = %source, bytes = bytes.len(), "Input read");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read at most `max_bytes + 1` bytes so oversize input is detectable
/// without buffering all of it.
fn read_bounded<R: Read>(reader: R, max_bytes: u64) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(max_bytes.saturating_add(1)).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("startups.txt");
        fs::write(&path, "Acme\nIndustry: AI/ML.").unwrap();

        let text = read_input(&InputSource::File(path), 1024).unwrap();
        assert_eq!(text, "Acme\nIndustry: AI/ML.");
    }

    #[test]
    fn test_read_input_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "x".repeat(2048)).unwrap();

        let result = read_input(&InputSource::File(path), 1024);
        assert!(matches!(
            result,
            Err(InputError::TooLarge { size: 2048, max_size: 1024, .. })
        ));
    }

    #[test]
    fn test_read_input_missing_file() {
        let result = read_input(&InputSource::File(PathBuf::from("/nonexistent/startuplens.txt")), 1024);
        assert!(matches!(result, Err(InputError::Io { .. })));
    }

    #[test]
    fn test_read_input_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, b"Acme\xff").unwrap();
        let text = read_input(&InputSource::File(path), 1024).unwrap();
        assert!(text.starts_with("Acme"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_bounded_stops_after_limit() {
        let data = vec![b'a'; 100];
        let buf = read_bounded(&data[..], 10).unwrap();
        assert_eq!(buf.len(), 11);
    }

    #[test]
    fn test_input_source_from_arg() {
        assert_eq!(InputSource::from_arg(PathBuf::from("-")), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(PathBuf::from("a.txt")),
            InputSource::File(PathBuf::from("a.txt"))
        );
        assert_eq!(InputSource::Stdin.to_string(), "<stdin>");
    }
}
