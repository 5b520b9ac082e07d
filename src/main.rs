//! sharpc
//!
//! Command-line front end: analyse a C# subset program and print the JSON
//! report, the generated TypeScript, the diagnostics or the token table.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use sharpts::frontend::lexer::tokenize;
use sharpts::pipeline::{analyze, Options};
use sharpts::utils::Error;
use sharpts::AnalysisReport;

/// Exit code when the analysed program has diagnostics
const EXIT_DIAGNOSTICS: i32 = 2;

/// C# subset to TypeScript translator
#[derive(Parser, Debug)]
#[command(name = "sharpc")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Translate a single-class C# program to TypeScript")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Exit with code 2 when the program has lexical or syntax errors
    #[arg(long, global = true)]
    deny_errors: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the full JSON analysis report
    Analyze {
        /// Source file, or `-` for stdin
        input: PathBuf,

        /// Indent the JSON
        #[arg(long)]
        pretty: bool,

        /// Leave `highlightMarkup` empty
        #[arg(long)]
        no_highlight: bool,

        #[command(flatten)]
        codegen: CodegenArgs,
    },
    /// Print or write the generated TypeScript
    Translate {
        /// Source file, or `-` for stdin
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        codegen: CodegenArgs,
    },
    /// List lexical and syntax errors
    Check {
        /// Source file, or `-` for stdin
        input: PathBuf,
    },
    /// Print the token table
    Tokens {
        /// Source file, or `-` for stdin
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct CodegenArgs {
    /// Spaces per block depth in generated code (0-8)
    #[arg(long, default_value_t = 0)]
    indent: usize,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Analyze {
            input,
            pretty,
            no_highlight,
            codegen,
        } => {
            let options = Options {
                indent_width: codegen.indent,
                highlight: !no_highlight,
            };
            options.validate()?;

            let report = analyze(&read_source(input)?, &options);
            println!("{}", report.to_json(*pretty)?);
            Ok(exit_code(&report, cli.deny_errors))
        }
        Commands::Translate {
            input,
            output,
            codegen,
        } => {
            let options = Options {
                indent_width: codegen.indent,
                highlight: false,
            };
            options.validate()?;

            let report = analyze(&read_source(input)?, &options);
            if report.has_errors() {
                print_diagnostics(&report);
                eprintln!("{}: no translation produced", input.display());
                return Ok(EXIT_DIAGNOSTICS);
            }

            match output {
                Some(path) => {
                    fs::write(path, &report.translation)
                        .map_err(|source| Error::Write {
                            path: path.display().to_string(),
                            source,
                        })
                        .context("writing translation")?;
                    log::info!("wrote {}", path.display());
                }
                None => print!("{}", report.translation),
            }
            Ok(0)
        }
        Commands::Check { input } => {
            let options = Options {
                highlight: false,
                ..Default::default()
            };
            let report = analyze(&read_source(input)?, &options);
            if report.has_errors() {
                print_diagnostics(&report);
                return Ok(EXIT_DIAGNOSTICS);
            }
            println!("No errors found");
            Ok(0)
        }
        Commands::Tokens { input } => {
            let (tokens, errors) = tokenize(&read_source(input)?);
            for token in &tokens {
                println!(
                    "{:>4} {:>4} {:<14} {}",
                    token.line,
                    token.column,
                    token.kind.name(),
                    token.lexeme
                );
            }
            for error in &errors {
                eprintln!("{}:{}: unrecognized {}", error.line, error.column, error.lexeme);
            }
            Ok(if cli.deny_errors && !errors.is_empty() {
                EXIT_DIAGNOSTICS
            } else {
                0
            })
        }
    }
}

/// Read the program from a file, or from stdin for `-`
fn read_source(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("reading program from stdin")?;
        return Ok(source);
    }

    let source = fs::read_to_string(input).map_err(|source| Error::Read {
        path: input.display().to_string(),
        source,
    })?;
    Ok(source)
}

fn print_diagnostics(report: &AnalysisReport) {
    for diagnostic in report.diagnostics() {
        eprintln!("{}", diagnostic);
    }
}

fn exit_code(report: &AnalysisReport, deny_errors: bool) -> i32 {
    if deny_errors && report.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        0
    }
}
