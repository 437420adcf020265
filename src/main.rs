use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use yansi::Paint;

use gofront::compiler::Compiler;
use gofront::diag::Diag;
use gofront::error::Result;
use gofront::ir::Target;
use gofront::loader::{FsLoader, ResolveStrategy, UnitId, UnitLoader};
use gofront::resolver;
use gofront::scheduler;

const USAGE: &str = "\
usage: gofront [options] <unit>...

options:
  --root <dir>      add a source root directory (repeatable; default: .)
  --word <32|64>    target word size in bits (default: 32)
  --resolve <importer|invocation>
                    anchor for relative unit ids (default: importer)
  -v, --verbose     trace loading, resolution and compilation
  -h, --help        print this help";

struct Options {
    roots: Vec<PathBuf>,
    patterns: Vec<String>,
    word: u32,
    strategy: ResolveStrategy,
    verbose: bool,
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut opts = Options {
        roots: vec![],
        patterns: vec![],
        word: 32,
        strategy: ResolveStrategy::Importer,
        verbose: false,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--root" => match iter.next() {
                Some(dir) => opts.roots.push(PathBuf::from(dir)),
                None => return Err("--root needs a directory".to_string()),
            },
            "--word" => match iter.next().map(String::as_str) {
                Some("32") => opts.word = 32,
                Some("64") => opts.word = 64,
                _ => return Err("--word needs 32 or 64".to_string()),
            },
            "--resolve" => match iter.next().map(String::as_str) {
                Some("importer") => opts.strategy = ResolveStrategy::Importer,
                Some("invocation") => opts.strategy = ResolveStrategy::Invocation,
                _ => return Err("--resolve needs importer or invocation".to_string()),
            },
            "-v" | "--verbose" => opts.verbose = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option `{other}`"));
            }
            other => opts.patterns.push(other.to_string()),
        }
    }
    if opts.patterns.is_empty() {
        return Err("no units to compile".to_string());
    }
    if opts.roots.is_empty() {
        opts.roots.push(PathBuf::from("."));
    }
    Ok(opts)
}

fn run(opts: &Options, invocation_dir: PathBuf) -> Result<()> {
    let diag = Diag::new(opts.verbose);
    let loader = FsLoader::new(opts.roots.clone(), invocation_dir, opts.strategy, &diag);

    let mut roots = Vec::with_capacity(opts.patterns.len());
    for pattern in &opts.patterns {
        roots.push(loader.canonicalize(&UnitId::new(pattern.clone()), None)?);
    }

    let units = resolver::resolve_units(&loader, &roots, &diag)?;
    let order = scheduler::schedule(&units)?;
    let target = Target {
        int_bits: opts.word,
    };
    let modules = Compiler::new(&units, target, &diag).compile(&order)?;

    for module in modules.values() {
        println!("{module}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{} {}", "error:".red().bold(), msg);
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    let invocation_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!(
                "{} cannot determine the working directory: {}",
                "error:".red().bold(),
                err
            );
            return ExitCode::FAILURE;
        }
    };
    match run(&opts, invocation_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
