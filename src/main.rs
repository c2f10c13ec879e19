//! Pressmap: WordPress batch upload CLI
//!
//! A command-line tool that reads tabular data (CSV or SQLite), maps
//! source columns to WordPress post fields, and publishes one post per
//! row through the WordPress REST API.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use pressmap::batch::{run_batch, select_rows, DryRunSubmitter, DuplicatePolicy, RunResult};
use pressmap::cli::{build_mapping, confirm_run, Cli, Commands, MappingAction};
use pressmap::config::WpConfig;
use pressmap::mapping::{FieldMapping, FieldSource, MappingStore, TargetField};
use pressmap::report::{write_report, ProgressReporter, RunSummary};
use pressmap::source::{load_dataset, Dataset, SourceKind};
use pressmap::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_info,
    print_step_header, print_success,
};
use pressmap::wordpress::{WpClient, WpSubmitter};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let store = MappingStore::new(cli.mapping_dir());

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Mapping { action } => run_mapping_command(&store, action),
        };
    }

    // Main batch pipeline - require input
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let kind = SourceKind::infer(input, cli.table.as_deref())?;

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load the data source
    print_step_header(1, "Load Data Source");
    let spinner = create_spinner("Reading source...");
    let dataset = load_dataset(input, &kind)?;
    finish_with_success(&spinner, "Source loaded");

    println!("\n    {} Source statistics:", style("✧").cyan());
    println!("      Rows: {}", dataset.row_count());
    println!("      Columns: {}", dataset.columns().len());

    if dataset.row_count() == 0 {
        print_info("The source has no data rows; nothing to send.");
        return Ok(());
    }

    // Step 2: Field mapping
    print_step_header(2, "Field Mapping");
    let mapping = resolve_mapping(&cli, &store, &dataset)?;
    mapping.check_columns(dataset.columns())?;
    mapping.validate()?;

    if cli.on_duplicate == DuplicatePolicy::Update
        && mapping.source_for(&TargetField::Slug).is_none()
    {
        anyhow::bail!(
            "--on-duplicate update needs the slug field mapped so existing posts can be found"
        );
    }
    print_success(&format!(
        "Mapping valid ({} field(s) assigned)",
        mapping.assignments().len()
    ));

    if let Some(name) = &cli.save_mapping {
        let path = store.save(name, &mapping)?;
        print_success(&format!("Saved mapping '{}' to {}", name, path.display()));
    }

    let total = select_rows(dataset.row_count(), cli.row_filter()).len();
    if total == 0 {
        print_info("The --rows filter matches no rows; nothing to send.");
        return Ok(());
    }

    // Step 3: Send (or dry-run) the batch
    let cancel = AtomicBool::new(false);
    let step_start = Instant::now();
    let result = if cli.dry_run {
        print_step_header(3, "Dry Run");
        print_info(&format!("Printing {} payload(s), sending nothing", total));
        println!();
        let mut submitter = DryRunSubmitter::default();
        run_batch(
            &dataset,
            &mapping,
            &mut submitter,
            cli.row_filter(),
            &cancel,
            |_| {},
        )
    } else {
        print_step_header(3, "Send to WordPress");
        match send_batch(&cli, input, &dataset, &mapping, total, &cancel)? {
            Some(result) => result,
            None => {
                println!("Cancelled by user.");
                return Ok(());
            }
        }
    };

    // Step 4: Summary
    let summary = RunSummary::new(result, step_start.elapsed(), cli.dry_run);
    summary.display();

    if let Some(path) = &cli.report {
        write_report(path, summary.result())?;
        print_success(&format!("Report written to {}", path.display()));
    }

    print_completion();
    Ok(())
}

/// Load the named mapping or build one interactively. A loaded mapping that
/// no longer matches the source columns drops back into the dialog with the
/// old sources pre-selected, unless --no-confirm forbids interaction.
fn resolve_mapping(cli: &Cli, store: &MappingStore, dataset: &Dataset) -> Result<FieldMapping> {
    match &cli.mapping {
        Some(name) => {
            let stored = store.load(name)?;
            print_success(&format!(
                "Loaded mapping '{}' (saved {})",
                stored.name, stored.saved_at
            ));
            match stored.mapping.check_columns(dataset.columns()) {
                Ok(()) => Ok(stored.mapping),
                Err(err) if cli.no_confirm => Err(err.into()),
                Err(err) => {
                    print_info(&err.to_string());
                    print_info("Re-map the affected fields to continue.");
                    Ok(build_mapping(dataset.columns(), Some(&stored.mapping))?)
                }
            }
        }
        None if cli.no_confirm => anyhow::bail!(
            "--no-confirm requires a saved mapping. Use -m/--mapping to name one."
        ),
        None => Ok(build_mapping(dataset.columns(), None)?),
    }
}

/// Connect, confirm, and run the live batch. `None` means the user declined.
fn send_batch(
    cli: &Cli,
    input: &std::path::Path,
    dataset: &Dataset,
    mapping: &FieldMapping,
    total: usize,
    cancel: &AtomicBool,
) -> Result<Option<RunResult>> {
    let config = WpConfig::from_env()?;
    let client = WpClient::new(&config, &cli.post_type)?;
    let site = client.base_url().to_string();

    print_config(input, &site, &cli.post_type, cli.mapping.as_deref());

    let spinner = create_spinner("Checking connection...");
    client
        .check_connection()
        .map_err(|e| anyhow::anyhow!("connection check against {} failed: {}", site, e))?;
    finish_with_success(&spinner, "WordPress reachable");

    if !cli.no_confirm && !confirm_run(total, &site)? {
        return Ok(None);
    }

    println!(); // Blank line before progress bar
    let mut submitter = WpSubmitter::new(client, cli.on_duplicate);
    let reporter = ProgressReporter::new(total);
    let result = run_batch(
        dataset,
        mapping,
        &mut submitter,
        cli.row_filter(),
        cancel,
        |event| reporter.report(event),
    );
    reporter.finish(result.cancelled);
    Ok(Some(result))
}

fn run_mapping_command(store: &MappingStore, action: &MappingAction) -> Result<()> {
    match action {
        MappingAction::List => {
            let names = store.list()?;
            if names.is_empty() {
                print_info(&format!(
                    "No saved mappings in {}",
                    store.base_dir().display()
                ));
            } else {
                for name in names {
                    println!("  {}", name);
                }
            }
        }
        MappingAction::Show { name } => {
            let stored = store.load(name)?;
            println!(
                "  {} {}",
                style(&stored.name).cyan().bold(),
                style(format!("(saved {})", stored.saved_at)).dim()
            );
            for assignment in stored.mapping.assignments() {
                let source = match &assignment.source {
                    FieldSource::Column(column) => format!("column '{}'", column),
                    FieldSource::Constant(text) => format!("constant \"{}\"", text),
                };
                println!("    {:<12} ← {}", assignment.field.display_name(), source);
            }
        }
        MappingAction::Delete { name } => {
            store.delete(name)?;
            print_success(&format!("Deleted mapping '{}'", name));
        }
    }
    Ok(())
}
