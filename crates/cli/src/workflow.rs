//! `adsrecon run` — the guided, human-gated workflow.
//!
//! clean → inject lookups → pause for manual recalculation → check →
//! merge. The pause is the one concurrency boundary in the system and it
//! is operator-driven: this tool never evaluates the formulas it writes.

use std::io::{self, Write};
use std::path::Path;

use adsrecon_pipeline::ResolutionState;

use crate::exit_codes::EXIT_SKUS_UNRESOLVED;
use crate::CliError;

pub fn cmd_run(
    ads_file: &Path,
    cbo_file: &Path,
    months: Option<&Path>,
    yes: bool,
) -> Result<(), CliError> {
    eprintln!("=== Step 1: Clean ===");
    let summary = crate::run_clean(ads_file, months)?;
    crate::print_clean_summary(&summary);
    let mut state = ResolutionState::Stamped;
    eprintln!("state: {state}");

    eprintln!();
    eprintln!("=== Step 2: Inject SKU lookups ===");
    let inject = crate::run_skus_vlookup(ads_file)?;
    crate::print_inject_report(&inject);
    if inject.formulas_added > 0 {
        state = ResolutionState::FormulasInjected;
    }
    eprintln!("state: {state}");

    state = ResolutionState::AwaitingRecalculation;
    eprintln!();
    eprintln!("workflow paused (state: {state})");
    if yes {
        eprintln!("--yes given: assuming the workbook is already recalculated");
    } else {
        if !atty::is(atty::Stream::Stdin) {
            return Err(CliError::args(
                "stdin is not a terminal; cannot pause for manual recalculation",
            )
            .with_hint("re-run with --yes once the workbook has been recalculated and saved"));
        }
        if !confirm("have you opened the workbook, let formulas calculate, and saved?")? {
            eprintln!("workflow stopped; run again when ready");
            return Ok(());
        }
    }

    eprintln!();
    eprintln!("=== Step 3: Check #N/A results ===");
    let check = crate::run_skus_check(ads_file)?;
    crate::print_na_report(&check);
    if !check.is_clear() {
        return Err(CliError {
            code: EXIT_SKUS_UNRESOLVED,
            message: "unresolved #N/A lookups remain".into(),
            hint: Some("complete the ALL SKUS lookups, then run the workflow again".into()),
        });
    }
    state = ResolutionState::Verified;
    eprintln!("state: {state}");

    eprintln!();
    eprintln!("=== Step 4: Merge CBO data ===");
    let output = crate::run_merge(ads_file, cbo_file, true)?;
    crate::print_merge_output(&output);

    eprintln!();
    eprintln!("full workflow completed");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    eprint!("{prompt} (y/n): ");
    io::stderr().flush().ok();
    let mut buf = String::new();
    io::stdin()
        .read_line(&mut buf)
        .map_err(|e| CliError::io(e.to_string()))?;
    Ok(buf.trim().eq_ignore_ascii_case("y"))
}
