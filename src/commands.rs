//! Subcommand execution
//!
//! Each subcommand loads its inputs, calls into the library modules and
//! writes its output file. Library errors are wrapped with the file or step
//! that produced them.

use crate::cli::{
    Cli, Command, CompareArgs, HeinzArgs, OutputFormat, ScanArgs, ScoresArgs, SignificanceArgs,
    SubsetArgs,
};
use crate::metrics::SubsetMetrics;
use crate::mixture::{self, EmConfig};
use crate::progress::{Reporter, Silent, StatusLine};
use crate::significance::{self, Sample};
use crate::{heinz, node_io, subset, transform, NodeScoreMap};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use trueno::Vector;

/// Scores outside this standard-deviation band are unlikely to follow N(0, 1)
/// under the null
const UNIT_SCALE_BAND: (f32, f32) = (0.5, 2.0);

/// Run the selected subcommand
pub fn run(cli: Cli) -> Result<()> {
    let mut reporter: Box<dyn Reporter> = if cli.progress {
        Box::new(StatusLine::stderr())
    } else {
        Box::new(Silent)
    };

    let result = match cli.command {
        Command::Scores(args) => run_scores(&args, reporter.as_mut()),
        Command::PositiveSubset(args) => run_positive_subset(&args),
        Command::ScanSubset(args) => run_scan_subset(&args),
        Command::Significance(args) => run_significance(&args, reporter.as_mut()),
        Command::Heinz(args) => run_heinz(&args),
        Command::Compare(args) => run_compare(&args),
    };

    if cli.progress {
        eprintln!();
    }
    result
}

/// Fit the mixture and write transformed scores
pub fn run_scores(args: &ScoresArgs, reporter: &mut dyn Reporter) -> Result<()> {
    let input = node_io::load_node_scores(&args.input_file)?;
    let scores = if args.p_values {
        transform::pvalues_to_zscores(&input)
            .with_context(|| format!("Failed to convert p-values in {}", args.input_file.display()))?
    } else {
        input
    };
    check_unit_scale(&scores);

    let config = em_config(args)?;
    let outliers: BTreeSet<String> = match &args.outlier_node_file {
        Some(path) => node_io::load_nodes(path)?.into_iter().collect(),
        None => BTreeSet::new(),
    };

    let fit = mixture::fit_excluding(&scores, &outliers, &config, reporter).with_context(|| {
        format!(
            "Failed to fit mixture model to {}",
            args.input_file.display()
        )
    })?;
    tracing::info!(
        mu = fit.model.mu,
        alpha = fit.model.alpha,
        log_likelihood = fit.log_likelihood,
        outliers = outliers.len(),
        "fitted mixture model"
    );

    let transformed = transform::transform_with_outliers(
        &scores,
        &fit.model,
        args.score_choice,
        args.threshold_choice,
        &outliers,
    )
    .with_context(|| format!("Failed to transform scores from {}", args.input_file.display()))?;
    node_io::save_node_scores(&args.output_file, &transformed)?;

    if let Some(path) = &args.output_size_file {
        let size = transform::expected_subgraph_size(scores.len(), fit.model.alpha);
        node_io::save_text(path, &size.to_string())?;
    }
    Ok(())
}

/// EM settings: config file or defaults, then command-line overrides
fn em_config(args: &ScoresArgs) -> Result<EmConfig> {
    let mut config = match &args.em_config {
        Some(path) => EmConfig::from_file(path)
            .with_context(|| format!("Failed to load EM config {}", path.display()))?,
        None => EmConfig::default(),
    };
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(restarts) = args.restarts {
        config.num_restarts = restarts;
    }
    config.parallel |= args.parallel;
    config.validate()?;
    Ok(config)
}

/// Sample standard deviation of `scores`, None for fewer than two values
pub fn score_spread(scores: &NodeScoreMap) -> Option<f32> {
    if scores.len() < 2 {
        return None;
    }
    let values: Vec<f32> = scores.values().map(|&s| s as f32).collect();
    Vector::from_slice(&values).stddev().ok()
}

/// Warn when the null component cannot plausibly be N(0, 1)
fn check_unit_scale(scores: &NodeScoreMap) {
    let Some(stddev) = score_spread(scores) else {
        return;
    };
    let (low, high) = UNIT_SCALE_BAND;
    if !(low..=high).contains(&stddev) {
        tracing::warn!(
            "Scores have standard deviation {:.3}; the null component assumes unit variance.",
            stddev
        );
    }
}

fn load_edges(path: Option<&Path>) -> Result<Option<Vec<(String, String)>>> {
    Ok(match path {
        Some(path) => Some(node_io::load_edge_list(path)?),
        None => None,
    })
}

/// Write every positively scoring node
pub fn run_positive_subset(args: &SubsetArgs) -> Result<()> {
    let scores = node_io::load_node_scores(&args.input_file)?;
    let edges = load_edges(args.edge_list_file.as_deref())?;

    let nodes = subset::positive_subset(&scores, edges.as_deref());
    tracing::info!(nodes = nodes.len(), "positive subset");
    node_io::save_nodes(&args.output_file, &nodes)?;
    Ok(())
}

/// Write the scan-statistic subset
pub fn run_scan_subset(args: &ScanArgs) -> Result<()> {
    let output = &args.subset.output_file;
    if args.check_output_file && output.exists() {
        tracing::info!(path = %output.display(), "output exists; skipping scan");
        return Ok(());
    }

    let scores = node_io::load_node_scores(&args.subset.input_file)?;
    let edges = load_edges(args.subset.edge_list_file.as_deref())?;

    let nodes = subset::scan_statistic_subset(&scores, edges.as_deref());
    tracing::info!(nodes = nodes.len(), "scan-statistic subset");
    node_io::save_nodes(output, &nodes)?;
    Ok(())
}

/// Write the permutation significance report
pub fn run_significance(args: &SignificanceArgs, reporter: &mut dyn Reporter) -> Result<()> {
    if args.permuted_score_files.len() != args.permuted_results_files.len() {
        anyhow::bail!(
            "Got {} permuted score files but {} permuted results files; they must pair up",
            args.permuted_score_files.len(),
            args.permuted_results_files.len()
        );
    }

    let observed_scores = node_io::load_node_scores(&args.observed_score_file)?;
    let observed_subset = node_io::load_nodes(&args.observed_results_file)?;

    let mut replicates = Vec::with_capacity(args.permuted_score_files.len());
    for (score_file, results_file) in args
        .permuted_score_files
        .iter()
        .zip(&args.permuted_results_files)
    {
        replicates.push((
            node_io::load_node_scores(score_file)?,
            node_io::load_nodes(results_file)?,
        ));
    }
    let permuted: Vec<Sample<'_>> = replicates
        .iter()
        .map(|(scores, nodes)| Sample::new(scores, nodes))
        .collect();

    let report = significance::evaluate(
        Sample::new(&observed_scores, &observed_subset),
        &permuted,
        reporter,
    )?;
    tracing::info!(
        p_value = report.p_value,
        replicates = report.num_replicates,
        "significance"
    );

    let text = match args.format {
        OutputFormat::Text => report.to_report_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    node_io::save_text(&args.output_file, &text)?;
    Ok(())
}

/// Write the Heinz solution nodes in lexicographic order
pub fn run_heinz(args: &HeinzArgs) -> Result<()> {
    let mut nodes = heinz::load_solution(&args.input_file);
    nodes.sort();
    node_io::save_nodes(&args.output_file, &nodes)?;
    Ok(())
}

/// Print or write overlap metrics between two node lists
pub fn run_compare(args: &CompareArgs) -> Result<()> {
    let predicted = node_io::load_nodes(&args.predicted)?;
    let reference = node_io::load_nodes(&args.reference)?;
    let metrics = SubsetMetrics::compute(&predicted, &reference);

    let text = match args.format {
        OutputFormat::Text => metrics.to_report_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&metrics)?,
    };
    match &args.output_file {
        Some(path) => node_io::save_text(path, &text)?,
        None => println!("{}", text),
    }
    Ok(())
}
