use std::fmt::Display;

use yansi::Paint;

/// Diagnostics sink, constructed once in `main` and passed by reference
/// through the pipeline; no stage holds process-global logger state.
#[derive(Debug, Default)]
pub struct Diag {
    verbose: bool,
}

impl Diag {
    pub fn new(verbose: bool) -> Self {
        Diag { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn load(&self, msg: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "load:".magenta().bold(), msg);
        }
    }

    pub fn resolve(&self, msg: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "resolve:".magenta().bold(), msg);
        }
    }

    pub fn compile(&self, msg: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "compile:".cyan().bold(), msg);
        }
    }

    /// Warnings are printed regardless of verbosity.
    pub fn warn(&self, msg: impl Display) {
        eprintln!("{} {}", "warning:".red().bold(), msg);
    }
}
