use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use texmath::ast::{Mode, SourceFormat};
use texmath::token::lexer;
use texmath::{parse, Engine};

fn main() {
    if let Err(err) = Cli::parse().run() {
        if !err.is_empty() {
            eprintln!("{err}");
        }
        std::process::exit(1);
    }
}

/// Tools for tokenizing and parsing LaTeX math.
#[derive(Debug, Parser)]
#[command(
    name = "texmath",
    author = "The Texcraft Project",
    version = "0.1",
    about,
    max_term_width(100)
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Emit error tokens for unexpected characters instead of ignoring the rest of the input.
    #[arg(long, global = true)]
    strict: bool,

    /// Parse the input in text mode rather than math mode.
    #[arg(long, global = true)]
    text_mode: bool,

    /// Mark the nodes as coming from AsciiMath source rather than LaTeX.
    #[arg(long, global = true)]
    asciimath: bool,

    /// Maximum number of command arguments that may be nested inside each other.
    #[arg(long, global = true, default_value_t = parse::Options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Cli {
    fn run(self) -> Result<(), String> {
        let engine = Engine {
            lexer_options: if self.strict {
                lexer::Options::strict()
            } else {
                Default::default()
            },
            parse_options: parse::Options {
                mode: if self.text_mode {
                    Mode::Text
                } else {
                    Mode::Math
                },
                source_format: if self.asciimath {
                    SourceFormat::Asciimath
                } else {
                    SourceFormat::Latex
                },
                max_depth: self.max_depth,
            },
            commands: Default::default(),
        };
        match self.command {
            Command::Tokens(tokens) => tokens.run(&engine),
            Command::Parse(parse) => parse.run(&engine),
            Command::Check(check) => check.run(&engine),
        }
    }
}

#[derive(Clone, Debug, clap::Subcommand)]
enum Command {
    /// Print the tokens of some math source, one per line.
    Tokens(Tokens),

    /// Print the AST of some math source.
    ///
    /// By default the debug serialization is printed,
    ///   with one line per top-level node.
    /// Use --json to print the full forest as JSON instead.
    Parse(Parse),

    /// Check that a file of math source parses without errors.
    ///
    /// Every error is printed with the source it refers to.
    Check(Check),
}

#[derive(Clone, Debug, clap::Args)]
struct Tokens {
    /// The math source.
    source: String,
}

impl Tokens {
    fn run(self, engine: &Engine) -> Result<(), String> {
        let (tokens, errs) = engine.tokenize(&self.source);
        for token in &tokens {
            println!(
                "{:<21} {:<16} {}",
                token.kind.name().bright_blue(),
                format!["{:?}", token.text],
                token.location.to_string().dimmed(),
            );
        }
        print_warnings(&errs);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
struct Parse {
    /// The math source.
    source: String,

    /// Print the forest as JSON.
    #[arg(long)]
    json: bool,
}

impl Parse {
    fn run(self, engine: &Engine) -> Result<(), String> {
        let (forest, errs) = engine.run(&self.source);
        if self.json {
            let s = serde_json::to_string_pretty(&forest)
                .map_err(|err| format!["failed to serialize the AST: {err}"])?;
            println!("{s}");
        } else if !forest.roots().is_empty() {
            println!("{forest}");
        }
        print_warnings(&errs);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
struct Check {
    /// Path to the file.
    path: PathBuf,
}

impl Check {
    fn run(self, engine: &Engine) -> Result<(), String> {
        let source = match fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(err) => {
                return Err(format!["failed to open file {:?}: {err}", &self.path]);
            }
        };
        let (_, errs) = engine.run(&source);
        if errs.is_empty() {
            return Ok(());
        }
        let path = self.path.to_string_lossy();
        let cache: (&str, _) = (&path, ariadne::Source::from(source.clone()));
        for err in &errs {
            err.ariadne_report(&path)
                .eprint(cache.clone())
                .map_err(|err| format!["failed to print error: {err}"])?;
        }
        Err(format!("Input file had {} errors", errs.len()))
    }
}

fn print_warnings(errs: &[texmath::error::Error]) {
    for err in errs {
        eprintln!("{}: {err}", "warning".yellow().bold());
    }
}
