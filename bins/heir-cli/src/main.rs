//! heir-cli: Run inheritance calculations from JSON tree files.
//!
//! `calculate` distributes an estate over a tree and prints a table or the
//! same JSON document the server returns; `validate` only checks the file.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use heir_core::constants::{cents_to_units, to_cents};
use heir_core::{
    Calculation, CalculatorConfig, EstateCalculator, FamilyNode, FamilyTree, InheritanceCalculator,
    VacantSidePolicy,
};
use heir_service::schema::load_document;
use heir_service::CalculationResponse;
use tracing::debug;

/// Heirloom intestate succession calculator.
#[derive(Parser)]
#[command(name = "heir-cli")]
#[command(version, about = "Statutory inheritance shares from a family tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribute an estate over a family tree.
    Calculate(CalculateArgs),
    /// Check a tree file without calculating.
    Validate(ValidateArgs),
}

#[derive(Args)]
struct CalculateArgs {
    /// Estate value in major units. Required unless the tree file is a full request.
    #[arg(short, long)]
    estate: Option<f64>,

    /// Path to a tree (root node) or request document.
    #[arg(short, long)]
    tree: PathBuf,

    /// Vacant parent side handling ("accrue" or "retain").
    #[arg(long, default_value_t = VacantSidePolicy::AccrueToOtherSide)]
    vacant_side: VacantSidePolicy,

    /// Print the JSON response instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Path to a tree (root node) or request document.
    #[arg(short, long)]
    tree: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Calculate(args) => calculate(args)?,
        Commands::Validate(args) => validate(args)?,
    };
    print!("{output}");
    Ok(())
}

/// Load the tree and the estate (flag first, then the document).
fn load(path: &Path, estate: Option<f64>) -> Result<(FamilyTree, Option<u64>)> {
    let document = load_document(path)?;
    let estate = estate.or(document.estate_value());
    let root = FamilyNode::try_from(document.into_tree())
        .with_context(|| format!("Invalid tree in {}", path.display()))?;
    let tree = FamilyTree::new(root);
    tree.validate()
        .with_context(|| format!("Invalid tree in {}", path.display()))?;

    let estate = estate
        .map(to_cents)
        .transpose()
        .context("Invalid estate value")?;
    Ok((tree, estate))
}

fn calculate(args: CalculateArgs) -> Result<String> {
    let (tree, estate) = load(&args.tree, args.estate)?;
    let Some(estate) = estate else {
        bail!("No estate value: pass --estate or use a request document with estate_value");
    };
    debug!(path = %args.tree.display(), estate, policy = %args.vacant_side, "calculating");

    let calculator = InheritanceCalculator::new(CalculatorConfig {
        vacant_side: args.vacant_side,
    });
    let calculation = calculator.calculate(tree, estate)?;

    if args.json {
        let response = CalculationResponse::from(&calculation);
        let mut out = serde_json::to_string_pretty(&response)?;
        out.push('\n');
        Ok(out)
    } else {
        let mut out = String::new();
        render_table(&calculation, &mut out).context("failed to render report")?;
        Ok(out)
    }
}

fn validate(args: ValidateArgs) -> Result<String> {
    let (tree, _) = load(&args.tree, None)?;
    Ok(format!(
        "OK: {} persons, decedent {} ({})\n",
        tree.person_count(),
        tree.decedent().id,
        tree.decedent().name
    ))
}

/// Human-readable report: totals, then one row per heir.
fn render_table(calc: &Calculation, out: &mut impl fmt::Write) -> fmt::Result {
    writeln!(out, "=== INHERITANCE ===")?;
    writeln!(out, "Decedent:      {}", calc.tree.decedent().name)?;
    writeln!(out, "Degree:        {}", calc.degree)?;
    writeln!(out, "Estate:        {:.2}", cents_to_units(calc.estate))?;
    writeln!(out, "Distributed:   {:.2}", cents_to_units(calc.total_distributed))?;
    if !calc.is_fully_distributed() {
        writeln!(out, "Undistributed: {:.2}", cents_to_units(calc.undistributed()))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{:<12} {:<24} {:<28} {:>16} {:>8}",
        "ID", "NAME", "RELATION", "SHARE", "PERCENT"
    )?;
    let heirs = calc.heirs();
    for heir in &heirs {
        writeln!(
            out,
            "{:<12} {:<24} {:<28} {:>16.2} {:>7.2}%",
            heir.id,
            heir.name,
            heir.relation.label(),
            cents_to_units(heir.share),
            heir.share_percentage
        )?;
    }
    if heirs.is_empty() {
        writeln!(out, "(no heirs)")?;
    }
    Ok(())
}
