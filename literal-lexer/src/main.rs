use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lexer_framework::{rule_set, Lexer, RuleName, StderrTrace, Token};
use miette::{IntoDiagnostic, NamedSource, WrapErr};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "literal-lexer",
    about = "Tokenize quoted strings, dots and numeric literals"
)]
struct Cli {
    /// Text to tokenize (read from stdin when neither this nor --file is given)
    text: Option<String>,
    /// Read the text from a file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,
    /// Rules to try, in priority order
    #[arg(long, value_delimiter = ',', default_values_t = RuleName::ALL)]
    rules: Vec<RuleName>,
    /// Print the tokens as JSON
    #[arg(long)]
    json: bool,
    /// Trace every rule attempt to stderr
    #[arg(long)]
    trace: bool,
    /// Print without colours
    #[arg(long)]
    no_color: bool,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    value: &'a str,
    start: usize,
    end: usize,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            kind: token.kind.as_str(),
            value: token.text(),
            start: token.start,
            end: token.end,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(report) = run(cli) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> miette::Result<()> {
    let (name, source) = read_source(&cli)?;

    let mut lexer = Lexer::from_str(source.as_str(), rule_set(&cli.rules));
    if cli.trace {
        lexer = lexer.with_trace(Box::new(StderrTrace));
    }

    let tokens = lexer
        .tokenize()
        .map_err(|err| miette::Report::new(err).with_source_code(NamedSource::new(name, source)))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        let records: Vec<TokenRecord> = tokens.iter().map(TokenRecord::from).collect();
        serde_json::to_writer_pretty(&mut out, &records).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
        return Ok(());
    }

    for token in &tokens {
        if cli.no_color {
            writeln!(out, "{token}").into_diagnostic()?;
        } else {
            writeln!(
                out,
                "{} {:?} {}",
                token.kind.as_str().bright_cyan().bold(),
                token.text(),
                format!("{}..{}", token.start, token.end).bright_black()
            )
            .into_diagnostic()?;
        }
    }

    Ok(())
}

fn read_source(cli: &Cli) -> miette::Result<(String, String)> {
    if let Some(path) = &cli.file {
        let source = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("could not read '{}'", path.display()))?;
        return Ok((path.display().to_string(), trim_line_ending(source)));
    }

    if let Some(text) = &cli.text {
        return Ok(("<argument>".to_string(), text.clone()));
    }

    let source = io::read_to_string(io::stdin())
        .into_diagnostic()
        .wrap_err("could not read stdin")?;
    Ok(("<stdin>".to_string(), trim_line_ending(source)))
}

/// Files and piped input usually end in a newline, which no rule accepts.
fn trim_line_ending(mut source: String) -> String {
    if source.ends_with('\n') {
        source.pop();
        if source.ends_with('\r') {
            source.pop();
        }
    }
    source
}
