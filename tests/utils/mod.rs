// Shared fixtures for the netmix integration tests
//
// Null scores are standard normal quantiles rather than random draws so that
// every fit in these tests is deterministic.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// `n` evenly spaced standard normal quantiles, largest first
pub fn null_quantiles(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| netmix::distribution::isf((i as f64 + 0.5) / n as f64))
        .collect()
}

/// Write `<node>\t<score>` lines
pub fn write_scores(dir: &Path, name: &str, scores: &[(String, f64)]) -> PathBuf {
    let text: Vec<String> = scores
        .iter()
        .map(|(node, score)| format!("{}\t{}", node, score))
        .collect();
    write_text(dir, name, &text.join("\n"))
}

/// Write one entry per line
pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    write_text(dir, name, &lines.join("\n"))
}

pub fn write_text(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Read a node list written by the CLI
pub fn read_nodes(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 30 altered nodes scoring around 8 and 170 null nodes
///
/// `alt0` through `alt27` form a chain in the accompanying network;
/// `alt28` and `alt29` only touch null nodes.
pub fn planted_network(dir: &Path) -> (PathBuf, PathBuf) {
    let mut scores: Vec<(String, f64)> = (0..30)
        .map(|i| (format!("alt{}", i), 8.0 + 0.01 * i as f64))
        .collect();
    scores.extend(
        null_quantiles(170)
            .into_iter()
            .enumerate()
            .map(|(i, z)| (format!("null{}", i), z)),
    );

    let mut edges: Vec<String> = (0..27)
        .map(|i| format!("alt{}\talt{}", i, i + 1))
        .collect();
    edges.push("alt28\tnull0".to_string());
    edges.push("alt29\tnull1".to_string());
    edges.extend((0..169).map(|i| format!("null{}\tnull{}", i, i + 1)));

    let score_file = write_scores(dir, "scores.tsv", &scores);
    let edge_file = write_text(dir, "edges.tsv", &edges.join("\n"));
    (score_file, edge_file)
}
