//! Node score, edge list and node list files
//!
//! All three formats are whitespace-separated text with `#` comment lines.
//! Malformed records are logged and skipped; a score or edge file without a
//! single usable record is an error naming the file.

use crate::NodeScoreMap;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing node files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No node scores; check {}", .path.display())]
    NoScores { path: PathBuf },

    #[error("Edge list has no edges; check {}", .path.display())]
    NoEdges { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InputError>;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-comment lines, trimmed, blank lines dropped
fn records(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Parse `<node> <score>` records
///
/// Lines with the wrong field count or a non-numeric score are skipped with a
/// warning. Non-finite scores are dropped. Later records for the same node
/// replace earlier ones.
pub fn parse_node_scores(text: &str) -> NodeScoreMap {
    let mut scores = NodeScoreMap::new();
    for line in records(text) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [node, score] => match score.parse::<f64>() {
                Ok(score) if score.is_finite() => {
                    scores.insert(node.to_string(), score);
                }
                Ok(_) => {}
                Err(_) => {
                    tracing::warn!("{} is not a valid node score; input line omitted.", line)
                }
            },
            _ => tracing::warn!("{} is not a valid node score; input line omitted.", line),
        }
    }
    scores
}

/// Load a node score file
pub fn load_node_scores(path: &Path) -> Result<NodeScoreMap> {
    let scores = parse_node_scores(&read(path)?);
    if scores.is_empty() {
        return Err(InputError::NoScores {
            path: path.to_path_buf(),
        });
    }
    tracing::info!(path = %path.display(), nodes = scores.len(), "loaded node scores");
    Ok(scores)
}

/// Parse `<u> <v>` records; extra columns are ignored
pub fn parse_edge_list(text: &str) -> Vec<(String, String)> {
    let mut edges = Vec::new();
    for line in records(text) {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(u), Some(v)) => edges.push((u.to_string(), v.to_string())),
            _ => tracing::warn!("{} is not a valid edge; input line omitted.", line),
        }
    }
    edges
}

/// Load an edge list file
pub fn load_edge_list(path: &Path) -> Result<Vec<(String, String)>> {
    let edges = parse_edge_list(&read(path)?);
    if edges.is_empty() {
        return Err(InputError::NoEdges {
            path: path.to_path_buf(),
        });
    }
    tracing::info!(path = %path.display(), edges = edges.len(), "loaded edge list");
    Ok(edges)
}

/// Parse whitespace-separated node identifiers, keeping first occurrences in order
pub fn parse_nodes(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    records(text)
        .flat_map(str::split_whitespace)
        .filter(|node| seen.insert(*node))
        .map(str::to_string)
        .collect()
}

/// Load a node list file; an empty list is valid
pub fn load_nodes(path: &Path) -> Result<Vec<String>> {
    Ok(parse_nodes(&read(path)?))
}

/// Render scores as `<node>\t<score>` lines, descending score then node
pub fn format_node_scores(scores: &NodeScoreMap) -> String {
    let mut out = String::new();
    for (i, (node, score)) in crate::subset::rank_nodes(scores).into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}\t{}", node, score);
    }
    out
}

/// Write a node score file
pub fn save_node_scores(path: &Path, scores: &NodeScoreMap) -> Result<()> {
    write(path, &format_node_scores(scores))
}

/// Write one node identifier per line
pub fn save_nodes<S: AsRef<str>>(path: &Path, nodes: &[S]) -> Result<()> {
    let lines: Vec<&str> = nodes.iter().map(|node| node.as_ref()).collect();
    write(path, &lines.join("\n"))
}

/// Write free-form text, e.g. a report or a subgraph size
pub fn save_text(path: &Path, text: &str) -> Result<()> {
    write(path, text)
}
