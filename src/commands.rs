//! Command implementations behind the `ukt` binary

use crate::output::{self, ColorMode, PatternReport};
use crate::tree::{BuildStats, SuffixTree, SuffixTreeBuilder, TreeConfig, TreeStats};
use crate::utils::progress::build_bar;
use crate::utils::{random_text, Alphabet};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io::Write;
use std::time::{Duration, Instant};

/// Inputs below this size build without a progress bar
const PROGRESS_THRESHOLD: usize = 1 << 20;

/// Build a tree, showing a progress bar for large inputs
pub fn build_tree(text: &[u8], config: &TreeConfig, show_progress: bool) -> Result<SuffixTree> {
    let builder = SuffixTreeBuilder::new(config.clone());

    let tree = if show_progress && text.len() >= PROGRESS_THRESHOLD {
        let pb = build_bar(text.len() as u64 + 1);
        let tree = builder.build_with_progress(text, |done| pb.set_position(done as u64));
        pb.finish_and_clear();
        tree
    } else {
        builder.build(text)
    };

    tree.context("Failed to build suffix tree")
}

/// Search every pattern; returns `true` if all were found
pub fn run_search(
    tree: &SuffixTree,
    patterns: &[String],
    positions: bool,
    json: bool,
    color: ColorMode,
) -> Result<bool> {
    let reports: Vec<PatternReport> = patterns
        .iter()
        .map(|p| PatternReport::new(tree, p, positions))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let mut stdout = output::stdout(color);
        output::write_search_results(&mut stdout, &reports)?;
    }

    Ok(reports.iter().all(|r| r.found))
}

/// Print the tree structure
pub fn run_print(tree: &SuffixTree, json: bool, color: ColorMode) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&tree.dump())?);
    } else {
        let mut stdout = output::stdout(color);
        output::write_tree(&mut stdout, tree)?;
        stdout.flush()?;
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsReport<'a> {
    tree: TreeStats,
    build: &'a BuildStats,
}

/// Display tree and construction statistics
pub fn run_stats(tree: &SuffixTree, json: bool) -> Result<()> {
    let stats = tree.stats();
    let build = tree.build_stats();

    if json {
        let report = StatsReport { tree: stats, build };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Suffix Tree Statistics");
    println!("======================");
    println!();
    println!("Text length:      {}", stats.text_len);
    println!("Nodes:            {}", stats.node_count);
    println!("Leaves:           {}", stats.leaf_count);
    println!("Internal nodes:   {}", stats.internal_count);
    println!("Edges:            {}", stats.edge_count);
    println!("Deepest branch:   {}", stats.max_internal_depth);
    println!();
    println!("Construction");
    println!("  Phases:         {}", build.phases);
    println!("  Leaves created: {}", build.leaves_created);
    println!("  Splits:         {}", build.splits);
    println!("  Suffix links:   {}", build.suffix_links_set);
    println!("  Walk-downs:     {}", build.walk_down_skips);
    println!("  Early stops:    {}", build.rule3_stops);
    println!(
        "  Ops per symbol: {:.2}",
        build.operations() as f64 / build.phases.max(1) as f64
    );
    println!(
        "  Time:           {}",
        format_duration(Duration::from_micros(build.elapsed_micros))
    );

    Ok(())
}

/// Parameters of a synthetic benchmark run
#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub length: usize,
    pub alphabet: Alphabet,
    pub queries: usize,
    pub pattern_len: usize,
    pub seed: Option<u64>,
}

/// Build a tree over random text and time construction and search
pub fn run_bench(options: &BenchOptions, config: &TreeConfig) -> Result<()> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!(
        "Generating {} random {:?} symbols...",
        options.length, options.alphabet
    );
    let text = random_text(options.alphabet, options.length, &mut rng);

    let started = Instant::now();
    let tree = build_tree(&text, config, true)?;
    let build_time = started.elapsed();

    let build = tree.build_stats();
    println!("Construction time: {}", format_duration(build_time));
    println!("Nodes created:     {}", tree.node_count());
    println!(
        "Ops per symbol:    {:.2}",
        build.operations() as f64 / build.phases.max(1) as f64
    );

    // Half the patterns are cut from the text, half are random
    let pattern_len = options.pattern_len.clamp(1, text.len());
    let patterns: Vec<Vec<u8>> = (0..options.queries)
        .map(|i| {
            if i % 2 == 0 {
                let start = rng.gen_range(0..=text.len() - pattern_len);
                text[start..start + pattern_len].to_vec()
            } else {
                random_text(options.alphabet, pattern_len, &mut rng)
            }
        })
        .collect();

    let started = Instant::now();
    let found = patterns.iter().filter(|p| tree.search(p)).count();
    let sequential = started.elapsed();

    let started = Instant::now();
    let parallel_found = tree.search_many(&patterns).into_iter().filter(|&f| f).count();
    let parallel = started.elapsed();

    debug_assert_eq!(found, parallel_found);

    println!(
        "Search ({} x {} symbols): {} sequential, {} parallel",
        patterns.len(),
        pattern_len,
        format_duration(sequential),
        format_duration(parallel)
    );
    println!("Patterns found:    {}/{}", found, patterns.len());

    Ok(())
}

/// Format a duration with a unit suited to its size
fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros >= 1_000_000 {
        format!("{:.2} s", d.as_secs_f64())
    } else if micros >= 1_000 {
        format!("{:.2} ms", micros as f64 / 1_000.0)
    } else {
        format!("{} us", micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(42)), "42 us");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.50 ms");
        assert_eq!(format_duration(Duration::from_millis(2_250)), "2.25 s");
    }

    #[test]
    fn test_build_tree_reports_bad_input() {
        let err = build_tree(b"", &TreeConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("Failed to build suffix tree"));
        assert!(format!("{:#}", err).contains("empty"));
    }

    #[test]
    fn test_bench_runs_seeded() {
        let options = BenchOptions {
            length: 2_000,
            alphabet: Alphabet::Dna,
            queries: 20,
            pattern_len: 8,
            seed: Some(3),
        };
        run_bench(&options, &TreeConfig::default()).unwrap();
    }
}
