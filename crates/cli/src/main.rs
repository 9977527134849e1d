// adsrecon CLI - ads-spend workbook cleaning and CBO reconciliation

mod exit_codes;
mod workflow;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use adsrecon_config::MonthTable;
use adsrecon_grid::Workbook;
use adsrecon_pipeline::{
    aggregate_spend, clean_workbook, inject_sku_lookups, merge_into_cbo, scan_na_errors,
    validate_totals, AggregateReport, CleanSummary, InjectReport, MergeSummary, NaReport,
    PipelineError, VendorMismatch,
};

use exit_codes::{
    EXIT_ERROR, EXIT_IO, EXIT_MASTER_MISSING, EXIT_MONTH_UNCONFIGURED, EXIT_SKUS_UNRESOLVED,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "adsrecon")]
#[command(about = "Ads-spend workbook cleaning and CBO reconciliation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stamp month/letter/platform columns and drag category formulas down
    #[command(after_help = "\
Examples:
  adsrecon clean 'GOOGLE ADS- PRODUCT SPEND.xlsx'
  adsrecon clean ads.xlsx --months months.toml
  adsrecon clean ads.xlsx --json")]
    Clean {
        /// Ads workbook (mutated and saved in place)
        ads_file: PathBuf,

        /// TOML file extending or overriding the built-in month table
        #[arg(long)]
        months: Option<PathBuf>,

        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Inject SKU/Vendor lookups, or check their results after recalculation
    #[command(after_help = "\
The workbook engine cannot evaluate formulas. After `vlookup` mode, open
the file in a spreadsheet application, let it recalculate, save, then run
`check` mode to find the lookups that came back #N/A.

Examples:
  adsrecon skus ads.xlsx
  adsrecon skus ads.xlsx vlookup
  adsrecon skus ads.xlsx check
  adsrecon skus ads.xlsx check --json")]
    Skus {
        /// Ads workbook (mutated and saved in place in vlookup mode)
        ads_file: PathBuf,

        /// vlookup = write formulas; check = report #N/A results
        #[arg(value_enum, default_value = "vlookup")]
        mode: SkuMode,

        /// Print the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Aggregate ads spend and merge it into the CBO export
    #[command(after_help = "\
Exit code is 0 even when validation finds mismatches — they are reported
for manual review, not treated as failures.

Examples:
  adsrecon merge ads.xlsx 'CBOS TO DASH MONTHLY EXPORT.xlsx'
  adsrecon merge ads.xlsx cbo.xlsx --no-validate
  adsrecon merge ads.xlsx cbo.xlsx --json")]
    Merge {
        /// Ads workbook (read only)
        ads_file: PathBuf,

        /// CBO export workbook (mutated and saved in place)
        cbo_file: PathBuf,

        /// Skip the cross-workbook total validation
        #[arg(long)]
        no_validate: bool,

        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Run the full guided workflow: clean → lookups → pause → check → merge
    #[command(after_help = "\
The pause between lookup injection and the check is a hard boundary: the
operator must open the file in a spreadsheet application so the formulas
actually calculate. --yes skips the prompt for scripted runs where the
workbook is already recalculated.

Examples:
  adsrecon run ads.xlsx cbo.xlsx
  adsrecon run ads.xlsx cbo.xlsx --yes
  adsrecon run ads.xlsx cbo.xlsx --months months.toml")]
    Run {
        /// Ads workbook (mutated and saved in place)
        ads_file: PathBuf,

        /// CBO export workbook (mutated and saved in place)
        cbo_file: PathBuf,

        /// TOML file extending or overriding the built-in month table
        #[arg(long)]
        months: Option<PathBuf>,

        /// Skip the manual-recalculation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SkuMode {
    Vlookup,
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean { ads_file, months, json } => cmd_clean(&ads_file, months.as_deref(), json),
        Commands::Skus { ads_file, mode, json } => match mode {
            SkuMode::Vlookup => cmd_skus_vlookup(&ads_file, json),
            SkuMode::Check => cmd_skus_check(&ads_file, json),
        },
        Commands::Merge { ads_file, cbo_file, no_validate, json } => {
            cmd_merge(&ads_file, &cbo_file, !no_validate, json)
        }
        Commands::Run { ads_file, cbo_file, months, yes } => {
            workflow::cmd_run(&ads_file, &cbo_file, months.as_deref(), yes)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Map a pipeline error to its exit code and operator hint.
    pub fn pipeline(err: PipelineError) -> Self {
        let (code, hint) = match &err {
            PipelineError::MonthNotConfigured(_) => (
                EXIT_MONTH_UNCONFIGURED,
                Some("add the month to a TOML table and pass it with --months".to_string()),
            ),
            PipelineError::MasterSheetMissing => (
                EXIT_MASTER_MISSING,
                Some("the ads workbook must contain an ALL SKUS sheet".to_string()),
            ),
            PipelineError::NoSheets => (EXIT_IO, None),
        };
        Self { code, message: err.to_string(), hint }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// shared helpers
// ============================================================================

pub(crate) fn load_months(path: Option<&Path>) -> Result<MonthTable, CliError> {
    let table = MonthTable::builtin();
    match path {
        None => Ok(table),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
            table
                .with_toml_overrides(&text)
                .map_err(|e| CliError::args(e.to_string()))
        }
    }
}

pub(crate) fn load_workbook(path: &Path) -> Result<Workbook, CliError> {
    let (workbook, summary) = adsrecon_io::load(path).map_err(CliError::io)?;
    eprintln!("loaded {}: {}", path.display(), summary.summary());
    Ok(workbook)
}

pub(crate) fn save_workbook(workbook: &Workbook, path: &Path) -> Result<(), CliError> {
    adsrecon_io::save(workbook, path).map_err(CliError::io)?;
    eprintln!("saved {}", path.display());
    Ok(())
}

fn emit_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
    println!("{text}");
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

// ============================================================================
// clean
// ============================================================================

pub(crate) fn run_clean(
    ads_file: &Path,
    months: Option<&Path>,
) -> Result<CleanSummary, CliError> {
    let table = load_months(months)?;
    let mut workbook = load_workbook(ads_file)?;
    let today = chrono::Local::now().date_naive();

    let summary = clean_workbook(&mut workbook, &table, today).map_err(CliError::pipeline)?;
    save_workbook(&workbook, ads_file)?;
    Ok(summary)
}

fn cmd_clean(ads_file: &Path, months: Option<&Path>, json: bool) -> Result<(), CliError> {
    let summary = run_clean(ads_file, months)?;
    print_clean_summary(&summary);
    if json {
        emit_json(&summary)?;
    }
    Ok(())
}

pub(crate) fn print_clean_summary(summary: &CleanSummary) {
    print_warnings(&summary.warnings);
    eprintln!(
        "clean: {} sheet(s), {} row(s) stamped, {} category formula(s) dragged down",
        summary.sheets_processed, summary.rows_stamped, summary.formulas_dragged,
    );
}

// ============================================================================
// skus
// ============================================================================

pub(crate) fn run_skus_vlookup(ads_file: &Path) -> Result<InjectReport, CliError> {
    let mut workbook = load_workbook(ads_file)?;
    let report = inject_sku_lookups(&mut workbook);
    if report.formulas_added > 0 {
        save_workbook(&workbook, ads_file)?;
    }
    Ok(report)
}

fn cmd_skus_vlookup(ads_file: &Path, json: bool) -> Result<(), CliError> {
    let report = run_skus_vlookup(ads_file)?;
    print_inject_report(&report);
    if json {
        emit_json(&report)?;
    }
    Ok(())
}

pub(crate) fn print_inject_report(report: &InjectReport) {
    if report.sheets.is_empty() {
        eprintln!("no blank SKUs found");
        return;
    }
    for sheet in &report.sheets {
        eprintln!("{}: {} blank SKU(s)", sheet.sheet, sheet.rows.len());
        for blank in sheet.rows.iter().take(5) {
            eprintln!("  row {}: {}", blank.row, blank.title);
        }
        if sheet.rows.len() > 5 {
            eprintln!("  ... and {} more", sheet.rows.len() - 5);
        }
    }
    eprintln!(
        "added {} lookup formula(s) across {} row(s)",
        report.formulas_added,
        report.blank_rows(),
    );
    eprintln!("action required:");
    eprintln!("  1. open the workbook in a spreadsheet application");
    eprintln!("  2. let the formulas calculate");
    eprintln!("  3. save and close");
    eprintln!("  4. run `adsrecon skus <file> check` to find #N/A results");
}

pub(crate) fn run_skus_check(ads_file: &Path) -> Result<NaReport, CliError> {
    let workbook = load_workbook(ads_file)?;
    Ok(scan_na_errors(&workbook))
}

fn cmd_skus_check(ads_file: &Path, json: bool) -> Result<(), CliError> {
    let report = run_skus_check(ads_file)?;
    print_na_report(&report);
    if json {
        emit_json(&report)?;
    }
    if report.is_clear() {
        Ok(())
    } else {
        Err(CliError {
            code: EXIT_SKUS_UNRESOLVED,
            message: "unresolved #N/A lookups remain".into(),
            hint: Some(
                "add the listed titles to the ALL SKUS sheet, fill in SKU and vendor, \
                 save, and re-run the check"
                    .into(),
            ),
        })
    }
}

pub(crate) fn print_na_report(report: &NaReport) {
    if report.is_clear() {
        eprintln!("all SKUs and categories resolved");
        return;
    }
    for sheet in &report.na_errors {
        eprintln!("{}: {} #N/A lookup(s)", sheet.sheet, sheet.rows.len());
        for row in &sheet.rows {
            eprintln!("  row {}: {}", row.row, row.title);
        }
    }
    for sheet in &report.missing_categories {
        eprintln!(
            "{}: {} missing product categories",
            sheet.sheet,
            sheet.rows.len()
        );
    }
    if !report.missing_titles.is_empty() {
        eprintln!("titles to add to ALL SKUS ({}):", report.missing_titles.len());
        for (i, title) in report.missing_titles.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, title);
        }
    }
}

// ============================================================================
// merge
// ============================================================================

#[derive(Debug, serde::Serialize)]
pub(crate) struct MergeOutput {
    pub aggregate: AggregateReport,
    pub merge: MergeSummary,
    pub mismatches: Vec<VendorMismatch>,
}

pub(crate) fn run_merge(
    ads_file: &Path,
    cbo_file: &Path,
    validate: bool,
) -> Result<MergeOutput, CliError> {
    let ads = load_workbook(ads_file)?;
    let aggregate_report = aggregate_spend(&ads);

    let mut cbo = load_workbook(cbo_file)?;
    let merge = merge_into_cbo(&mut cbo, &aggregate_report.aggregate).map_err(CliError::pipeline)?;
    save_workbook(&cbo, cbo_file)?;

    let mismatches = if validate {
        validate_totals(&cbo, &aggregate_report.aggregate).map_err(CliError::pipeline)?
    } else {
        Vec::new()
    };

    Ok(MergeOutput {
        aggregate: aggregate_report,
        merge,
        mismatches,
    })
}

fn cmd_merge(ads_file: &Path, cbo_file: &Path, validate: bool, json: bool) -> Result<(), CliError> {
    let output = run_merge(ads_file, cbo_file, validate)?;
    print_merge_output(&output);
    if json {
        emit_json(&output)?;
    }
    Ok(())
}

pub(crate) fn print_merge_output(output: &MergeOutput) {
    print_warnings(&output.aggregate.warnings);
    print_warnings(&output.merge.warnings);
    if output.aggregate.aggregate.is_empty() {
        eprintln!("warning: no ad spend found in the ads workbook");
    }
    eprintln!(
        "merge: {} row(s) updated, {} row(s) inserted (flagged for review)",
        output.merge.rows_updated, output.merge.rows_inserted,
    );
    if output.mismatches.is_empty() {
        eprintln!("validation: all vendor totals within $0.01");
    } else {
        for mismatch in &output.mismatches {
            eprintln!(
                "warning: {} totals differ — ads ${:.2} vs CBO ${:.2} (diff ${:.2})",
                mismatch.vendor,
                mismatch.ads_total,
                mismatch.cbo_total,
                mismatch.difference(),
            );
        }
    }
}
