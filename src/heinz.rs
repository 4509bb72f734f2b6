//! Heinz solver output
//!
//! Heinz reports every node of the input network as `<node>\t<score>`, with
//! `NaN` for nodes outside the optimal subnetwork. When it finds no solution
//! it may write nothing at all, which is treated as an empty solution.

use std::path::Path;

/// Solution nodes of a Heinz result, descending score then node
pub fn parse_solution(text: &str) -> Vec<String> {
    let mut solution: Vec<(String, f64)> = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [node, score] if *score != "NaN" => {
                    score.trim().parse::<f64>().ok().map(|s| (node.to_string(), s))
                }
                _ => None,
            }
        })
        .collect();

    solution.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    solution.into_iter().map(|(node, _)| node).collect()
}

/// Load a Heinz result; an unreadable file is an empty solution
pub fn load_solution(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_solution(&text),
        Err(e) => {
            tracing::warn!(
                "Cannot read Heinz output {}: {}; treating as empty solution.",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}
