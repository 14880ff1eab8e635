//! mugenini: inspect MUGEN definition files.
//!
//! Parses `.def`/`.cns`/`.cmd` files (or stdin) with the `mugen-ini`
//! dialect rules and prints the resulting sections and options:
//!
//! - **stdin mode**: `mugenini < kfm.def`
//! - **file mode**: `mugenini chars/kfm/*.def stages/`
//! - **lookup**: `mugenini kfm.def --get info.name`

mod inputs;
mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{error, LevelFilter};
use mugen_ini::{OptionValue, ParserConfig};
use std::io::{self, Read};

use render::{Parsed, SectionFilter};

#[derive(Parser)]
#[command(
    name = "mugenini",
    about = "Parse MUGEN definition files and print their sections and options"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Fail on repeated sections or options instead of merging them
    #[arg(long)]
    strict: bool,

    /// Name of the section whose options apply beneath every other section
    #[arg(long, default_value = "default")]
    default_section: String,

    /// Only print these sections (case-insensitive). Can be repeated.
    #[arg(short = 's', long = "section")]
    sections: Vec<String>,

    /// Print a single value, e.g. `--get info.name` or `--get files.pal1`
    #[arg(long, value_name = "SECTION.OPTION")]
    get: Option<String>,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = mugen_ini::Parser::new(
        ParserConfig::default()
            .with_strict(cli.strict)
            .with_default_section(&cli.default_section),
    );

    let parsed = if cli.files.is_empty() {
        vec![parse_stdin(&parser)?]
    } else {
        parse_files(&parser, &cli.files)?
    };

    if let Some(ref key) = cli.get {
        return print_value(&parsed, key);
    }

    let renderer = render::create_renderer(&cli.format)?;
    let filter = SectionFilter::new(&cli.sections);
    print!("{}", renderer.render(&parsed, &filter)?);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// stdin mode: one document labelled `<stdin>`.
fn parse_stdin(parser: &mugen_ini::Parser) -> Result<Parsed> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("failed to read stdin")?;

    let doc = parser
        .parse_reader(input.as_slice(), "<stdin>")
        .context("failed to parse stdin")?;
    Ok(Parsed {
        source: "<stdin>".to_string(),
        doc,
    })
}

/// file mode: parse every matched file, logging and skipping failures.
fn parse_files(parser: &mugen_ini::Parser, patterns: &[String]) -> Result<Vec<Parsed>> {
    let paths = inputs::expand_globs(patterns)?;
    if paths.is_empty() {
        bail!("no input files matched");
    }

    let mut parsed = Vec::with_capacity(paths.len());
    let mut failures = 0;
    for path in &paths {
        match parser.parse_path(path) {
            Ok(doc) => parsed.push(Parsed {
                source: path.display().to_string(),
                doc,
            }),
            Err(e) => {
                error!("skipping {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} file(s) failed to parse", failures, paths.len());
    }
    Ok(parsed)
}

/// `--get section.option`: print the value from every document.
fn print_value(parsed: &[Parsed], key: &str) -> Result<()> {
    let (section, option) = split_key(key)?;

    for file in parsed {
        let value = file
            .doc
            .lookup(section, option)
            .with_context(|| format!("{}: cannot get {}", file.source, key))?;
        match value {
            OptionValue::Text(text) => println!("{}", text),
            OptionValue::Absent => println!(),
        }
    }
    Ok(())
}

/// Split `section.option` at the first dot; option names may contain dots.
fn split_key(key: &str) -> Result<(&str, &str)> {
    match key.split_once('.') {
        Some((section, option)) if !section.trim().is_empty() && !option.trim().is_empty() => {
            Ok((section, option))
        }
        _ => Err(anyhow!(
            "invalid key {:?}: expected SECTION.OPTION",
            key
        )),
    }
}
