//! Output formatting for search results and tree renderings

use crate::tree::{EdgeDump, ChildKind, SuffixTree, ROOT};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// When to color terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether stdout is a terminal
    pub fn choice(self, is_terminal: bool) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if is_terminal => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// Outcome of one pattern lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternReport {
    pub pattern: String,
    pub found: bool,
    /// Start offsets, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<usize>>,
}

impl PatternReport {
    /// Look `pattern` up in `tree`
    pub fn new(tree: &SuffixTree, pattern: &str, with_positions: bool) -> Self {
        let positions = with_positions.then(|| tree.find_all(pattern));
        let found = match &positions {
            Some(positions) => !positions.is_empty(),
            None => tree.search(pattern),
        };
        Self {
            pattern: pattern.to_string(),
            found,
            positions,
        }
    }
}

/// Standard output honoring the color mode
pub fn stdout(color: ColorMode) -> StandardStream {
    StandardStream::stdout(color.choice(io::stdout().is_terminal()))
}

/// Print one line per pattern: status, pattern, and offsets if present
pub fn write_search_results<W: WriteColor>(
    out: &mut W,
    reports: &[PatternReport],
) -> io::Result<()> {
    for report in reports {
        if report.found {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(out, "found  ")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "missing")?;
        }
        out.reset()?;
        write!(out, " {:?}", report.pattern)?;

        if let Some(positions) = &report.positions {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, " ({})", positions.len())?;
            out.reset()?;

            if !positions.is_empty() {
                let list: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
                write!(out, " @ {}", list.join(", "))?;
            }
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Print the tree with labels and node ids highlighted
pub fn write_tree<W: WriteColor>(out: &mut W, tree: &SuffixTree) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "root #{}", ROOT)?;
    out.reset()?;

    for edge in tree.edges() {
        write_edge(out, &edge)?;
    }

    Ok(())
}

fn write_edge<W: WriteColor>(out: &mut W, edge: &EdgeDump) -> io::Result<()> {
    write!(out, "{:indent$}", "", indent = edge.depth * 2)?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(out, "{}", edge.label)?;
    out.reset()?;

    write!(out, " [{},{}) ", edge.start, edge.end)?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(out, "#{} -> #{}", edge.parent, edge.child)?;
    out.reset()?;

    match edge.kind {
        ChildKind::Leaf => {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            if let Some(start) = edge.suffix_start {
                write!(out, " leaf @{}", start)?;
            }
        }
        ChildKind::Internal => {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            if let Some(link) = edge.suffix_link {
                write!(out, " link #{}", link)?;
            }
        }
    }
    out.reset()?;

    writeln!(out)
}
