//! Input resolution and reading
//!
//! An input argument is a file, a directory of manifests, or an http(s)
//! URL. Directories expand to the `*.yaml` and `*.yml` files directly inside
//! them; nothing else is expanded.

use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::{CliError, Result};

/// File name patterns picked up from directory inputs
const MANIFEST_PATTERNS: [&str; 2] = ["*.yaml", "*.yml"];

/// A single readable source of YAML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Check whether an input names a remote document
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Expand one command-line input into the sources to read
///
/// Directory entries are returned sorted by path. Anything that is not a
/// directory is passed through unchanged; missing files surface when read.
pub fn resolve_input(input: &str) -> Result<Vec<InputSource>> {
    if is_url(input) {
        return Ok(vec![InputSource::Url(input.to_string())]);
    }

    let path = Path::new(input);
    if !path.is_dir() {
        return Ok(vec![InputSource::File(path.to_path_buf())]);
    }

    let patterns = MANIFEST_PATTERNS
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| CliError::internal(e.to_string())))
        .collect::<Result<Vec<_>>>()?;

    // Hidden files are skipped, as a shell glob would
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| CliError::Input {
            message: format!("{}: {}", path.display(), e),
            help: None,
        })?;

        if !entry.path().is_file() {
            continue;
        }

        let is_manifest = {
            let name = entry.file_name().to_string_lossy();
            patterns.iter().any(|p| p.matches_with(&name, options))
        };
        if is_manifest {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::debug!(dir = %path.display(), count = files.len(), "resolved directory input");

    Ok(files.into_iter().map(InputSource::File).collect())
}

/// Reads input sources, fetching URLs over a lazily built HTTP client
pub struct InputReader {
    insecure: bool,
    http: Option<reqwest::blocking::Client>,
}

impl InputReader {
    /// Create a reader; `insecure` disables TLS certificate verification
    pub fn new(insecure: bool) -> Self {
        Self {
            insecure,
            http: None,
        }
    }

    /// Read a source fully into memory
    pub fn read(&mut self, source: &InputSource) -> Result<String> {
        match source {
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| CliError::input_io(path, e))
            }
            InputSource::Url(url) => self.fetch(url),
        }
    }

    fn fetch(&mut self, url: &str) -> Result<String> {
        let client = match self.http.take() {
            Some(client) => client,
            None => build_client(self.insecure)?,
        };
        let client = self.http.insert(client);

        client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| CliError::network(url, e))
    }
}

fn build_client(insecure: bool) -> Result<reqwest::blocking::Client> {
    if insecure {
        tracing::warn!(
            "TLS certificate verification is disabled; URL inputs are not authenticated"
        );
    }

    reqwest::blocking::Client::builder()
        .danger_accept_invalid_certs(insecure)
        .build()
        .map_err(|e| CliError::internal(format!("failed to build HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/crd.yaml"));
        assert!(is_url("http://localhost:8080/crd.yaml"));
        assert!(!is_url("httpdocs/crd.yaml"));
        assert!(!is_url("./crd.yaml"));
    }

    #[test]
    fn test_resolve_directory_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        for name in ["c.txt", "b.yml", "a.yaml", ".hidden.yaml"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        fs::create_dir(temp.path().join("nested.yaml")).unwrap();
        fs::write(temp.path().join("nested.yaml").join("d.yaml"), "").unwrap();

        let sources = resolve_input(temp.path().to_str().unwrap()).unwrap();

        assert_eq!(
            sources,
            vec![
                InputSource::File(temp.path().join("a.yaml")),
                InputSource::File(temp.path().join("b.yml")),
            ]
        );
    }

    #[test]
    fn test_resolve_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_input(temp.path().to_str().unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_passes_files_through() {
        let sources = resolve_input("does/not/exist.txt").unwrap();
        assert_eq!(sources, vec![InputSource::File(PathBuf::from("does/not/exist.txt"))]);
    }

    #[test]
    fn test_resolve_url() {
        let sources = resolve_input("https://example.com/crds.yaml").unwrap();
        assert_eq!(
            sources,
            vec![InputSource::Url("https://example.com/crds.yaml".to_string())]
        );
        assert_eq!(sources[0].to_string(), "https://example.com/crds.yaml");
    }

    #[test]
    fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("crd.yaml");
        fs::write(&path, "kind: CustomResourceDefinition\n").unwrap();

        let mut reader = InputReader::new(false);
        let text = reader.read(&InputSource::File(path)).unwrap();
        assert_eq!(text, "kind: CustomResourceDefinition\n");
    }

    #[test]
    fn test_read_missing_file() {
        let mut reader = InputReader::new(false);
        let err = reader
            .read(&InputSource::File(PathBuf::from("does/not/exist.yaml")))
            .unwrap_err();
        assert!(matches!(err, CliError::Input { help: Some(_), .. }));
    }
}
