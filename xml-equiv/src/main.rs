use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use xml_equiv_core::{
    compare_with, format_json, format_text, parse_file, AsciiCaseInsensitive, Ordinal,
    StringComparer,
};

mod cli;

use cli::{Cli, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let left = parse_file(&cli.file1)
        .with_context(|| format!("failed to parse {}", cli.file1.display()))?;
    let right = parse_file(&cli.file2)
        .with_context(|| format!("failed to parse {}", cli.file2.display()))?;

    let comparer: &dyn StringComparer = if cli.case_insensitive {
        &AsciiCaseInsensitive
    } else {
        &Ordinal
    };
    let result = compare_with(Some(&left), Some(&right), cli.options(), comparer);

    if !cli.quiet {
        match cli.format {
            OutputFormat::Json => println!("{}", format_json(&result)),
            OutputFormat::Text => render_text(&result),
        }
    }
    Ok(result.is_none())
}

fn render_text(result: &Option<xml_equiv_core::Mismatch<'_>>) {
    match result {
        None => println!("{}", "equivalent".green()),
        Some(_) => {
            for line in format_text(result).lines() {
                if line == "not equivalent" {
                    println!("{}", line.red());
                } else {
                    println!("{line}");
                }
            }
        }
    }
}
