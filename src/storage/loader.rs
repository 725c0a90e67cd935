//! Graph file loading
//!
//! A graph file is a plain map from item to its list of prerequisites, in
//! JSON, YAML or TOML. The format comes from the file extension unless the
//! caller forces one. The path `-` reads standard input.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::Graph;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unsupported graph format for {} (expected .json, .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to parse {format} graph: {message}")]
    Parse { format: GraphFormat, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serialization format of a graph file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    Json,
    Yaml,
    Toml,
}

impl GraphFormat {
    /// Picks a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(GraphFormat::Json),
            "yaml" | "yml" => Some(GraphFormat::Yaml),
            "toml" => Some(GraphFormat::Toml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphFormat::Json => "json",
            GraphFormat::Yaml => "yaml",
            GraphFormat::Toml => "toml",
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if the path means standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Loads a graph from a file, or from stdin when the path is `-`
///
/// Stdin defaults to JSON when no format is forced.
pub fn load_graph(path: &Path, format: Option<GraphFormat>) -> Result<Graph, LoadError> {
    let (content, format) = if is_stdin(path) {
        let content = io::read_to_string(io::stdin()).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        (content, format.unwrap_or(GraphFormat::Json))
    } else {
        let format = match format.or_else(|| GraphFormat::from_path(path)) {
            Some(format) => format,
            None => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        (content, format)
    };

    let graph = parse_graph(&content, format)?;
    debug!(
        path = %path.display(),
        format = format.as_str(),
        keys = graph.len(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Parses graph text in the given format
///
/// Blank input is an empty graph in every format.
pub fn parse_graph(content: &str, format: GraphFormat) -> Result<Graph, LoadError> {
    if content.trim().is_empty() {
        return Ok(Graph::new());
    }

    let parse_err = |message: String| LoadError::Parse { format, message };
    match format {
        GraphFormat::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        GraphFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string())),
        GraphFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use tempfile::TempDir;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::as_str).collect()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(GraphFormat::from_path(Path::new("g.json")), Some(GraphFormat::Json));
        assert_eq!(GraphFormat::from_path(Path::new("g.YML")), Some(GraphFormat::Yaml));
        assert_eq!(GraphFormat::from_path(Path::new("g.yaml")), Some(GraphFormat::Yaml));
        assert_eq!(GraphFormat::from_path(Path::new("g.toml")), Some(GraphFormat::Toml));
        assert_eq!(GraphFormat::from_path(Path::new("g.txt")), None);
        assert_eq!(GraphFormat::from_path(Path::new("graph")), None);
    }

    #[test]
    fn parse_json() {
        let graph = parse_graph(
            r#"{"algorithms": ["data structures"], "data structures": []}"#,
            GraphFormat::Json,
        )
        .unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(names(graph.prerequisites("algorithms")), vec!["data structures"]);
    }

    #[test]
    fn parse_yaml() {
        let yaml = r#"
algorithms:
  - data structures
data structures:
  - discrete math
"#;
        let graph = parse_graph(yaml, GraphFormat::Yaml).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(names(graph.prerequisites("data structures")), vec!["discrete math"]);
    }

    #[test]
    fn parse_toml() {
        let toml = r#"
algorithms = ["data structures"]
"data structures" = ["discrete math"]
"discrete math" = []
"#;
        let graph = parse_graph(toml, GraphFormat::Toml).unwrap();
        assert_eq!(graph.len(), 3);
        assert!(graph.prerequisites("discrete math").is_empty());
    }

    #[test]
    fn blank_input_is_empty_graph() {
        for format in [GraphFormat::Json, GraphFormat::Yaml, GraphFormat::Toml] {
            assert!(parse_graph("  \n", format).unwrap().is_empty());
        }
    }

    #[test]
    fn malformed_input_is_parse_error() {
        let err = parse_graph(r#"{"a": "not a list"}"#, GraphFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Parse { format: GraphFormat::Json, .. }));
        assert!(err.to_string().starts_with("Failed to parse json graph"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph.yaml");
        fs::write(&path, "a: [b]\n").unwrap();

        let graph = load_graph(&path, None).unwrap();
        assert_eq!(names(graph.prerequisites("a")), vec!["b"]);
    }

    #[test]
    fn forced_format_overrides_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph.txt");
        fs::write(&path, r#"{"a": ["b"]}"#).unwrap();

        assert!(matches!(
            load_graph(&path, None),
            Err(LoadError::UnsupportedFormat(_))
        ));
        let graph = load_graph(&path, Some(GraphFormat::Json)).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_graph(&dir.path().join("missing.json"), None).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
