//! CLI Exit Code Registry
//!
//! Single source of truth for the binary's exit codes. Exit codes are part
//! of the shell contract — wrapper scripts gate the merge step on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad args, non-TTY without --yes)    |
//! | 3    | Unresolved `#N/A` lookups after a check pass     |
//! | 4    | No month mapping configured for the run date     |
//! | 5    | Master `ALL SKUS` sheet missing                  |
//! | 6    | Workbook IO failure (open, read, save)           |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// A check pass found `#N/A` lookups or missing categories; the merge must
/// not run until the operator resolves them.
pub const EXIT_SKUS_UNRESOLVED: u8 = 3;

/// The run date's month has no letter/short-code mapping.
pub const EXIT_MONTH_UNCONFIGURED: u8 = 4;

/// The master `ALL SKUS` sheet is absent from the ads workbook.
pub const EXIT_MASTER_MISSING: u8 = 5;

/// Workbook file could not be opened, read, or saved.
pub const EXIT_IO: u8 = 6;
