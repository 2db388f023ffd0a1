use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use anyhow::{anyhow, Context};
use clap::{App, Arg};
use kaleidoscope::driver;
use kaleidoscope::lexer::Lexer;
use kaleidoscope::parser::{Parser, ParserConfig, DEFAULT_MAX_DEPTH};
use kaleidoscope::source::{CharSource, ReaderSource};

fn parse_operator(flag: &str) -> anyhow::Result<(char, i32)> {
    let mut parts = flag.splitn(2, '=');
    let op = parts.next().unwrap_or_default();
    let precedence = parts
        .next()
        .ok_or_else(|| anyhow!("operator must look like CHAR=PREC, got {}", flag))?;

    let mut chars = op.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok((c, precedence.trim().parse().context("invalid precedence")?)),
        _ => Err(anyhow!("operator must be a single character, got {:?}", op)),
    }
}

fn run<S: CharSource>(source: S, config: ParserConfig, print: bool) -> driver::Summary {
    let mut parser = Parser::with_config(Lexer::new(source), config);
    // failures are already reported through the log by the driver
    driver::run(&mut parser, |outcome| {
        if let (true, Ok(node)) = (print, outcome) {
            println!("{}", node);
        }
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("kaleidoscope")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("file")
                .value_name("FILE")
                .help("Source file to parse; reads stdin when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("operator")
                .short("o")
                .long("operator")
                .value_name("CHAR=PREC")
                .help("Registers an extra binary operator")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Maximum expression nesting depth")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("print")
                .short("p")
                .long("print")
                .help("Prints every parsed form"),
        )
        .get_matches();

    let mut config = ParserConfig::default();
    if let Some(ops) = matches.values_of("operator") {
        for flag in ops {
            let (op, precedence) = parse_operator(flag)?;
            config.register_operator(op, precedence)?;
        }
    }
    config.max_depth = match matches.value_of("max-depth") {
        Some(depth) => depth.parse().context("invalid --max-depth")?,
        None => DEFAULT_MAX_DEPTH,
    };
    let print = matches.is_present("print");

    let summary = match matches.value_of("file") {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            run(ReaderSource::new(BufReader::new(file)), config, print)
        }
        None => {
            let stdin = io::stdin();
            run(ReaderSource::new(stdin.lock()), config, print)
        }
    };

    log::info!("{} forms parsed, {} failed", summary.parsed, summary.failed);
    if summary.failed > 0 {
        process::exit(1);
    }
    Ok(())
}
