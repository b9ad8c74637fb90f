use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

use keyfinder_lib::{
    load_files, load_reader, JsonValue, KeyFinder, KeyMatcher, LocatedMatch, Result,
    SearchOptions,
};

/// Print every occurrence of a key in JSON documents, one JSON object per line.
#[derive(Parser, Debug)]
#[command(name = "keyfinder", version)]
struct Cli {
    /// Object key to look for
    key: String,

    /// JSON files to search; reads standard input when none are given
    files: Vec<PathBuf>,

    /// Compare keys case-insensitively
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Match keys containing KEY as a whole word (e.g. `token` in `access_token`)
    #[arg(short = 'w', long, conflicts_with = "regex")]
    whole_word: bool,

    /// Treat KEY as a regular expression
    #[arg(short = 'e', long)]
    regex: bool,

    /// Fail on containers nested deeper than this (overrides KEYFINDER_MAX_DEPTH)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Print the JSON Pointer and depth of each match
    #[arg(short = 'p', long)]
    pointers: bool,

    /// Only print the number of matches
    #[arg(short = 'c', long, conflicts_with = "pointers")]
    count: bool,
}

fn build_options(cli: &Cli) -> Result<SearchOptions> {
    let matcher = if cli.regex {
        KeyMatcher::regex(&cli.key, cli.ignore_case)?
    } else if cli.whole_word {
        KeyMatcher::whole_word(&cli.key, cli.ignore_case)
    } else if cli.ignore_case {
        KeyMatcher::ignore_case(&cli.key)
    } else {
        KeyMatcher::exact(cli.key.as_str())
    };

    // An explicit flag wins and the environment is not consulted.
    let options = match cli.max_depth {
        Some(limit) => SearchOptions::new(cli.key.as_str()).max_depth(limit),
        None => SearchOptions::from_env(cli.key.as_str())?,
    };
    Ok(options.matcher(matcher))
}

fn load_inputs(files: &[PathBuf]) -> Result<Vec<JsonValue>> {
    if files.is_empty() {
        debug!("reading document from stdin");
        Ok(vec![load_reader(io::stdin().lock())?])
    } else {
        load_files(files)
    }
}

fn write_matches<W: Write>(
    out: &mut W,
    cli: &Cli,
    results: &[Vec<LocatedMatch>],
) -> Result<()> {
    for (index, matches) in results.iter().enumerate() {
        if cli.count {
            match cli.files.get(index) {
                Some(path) if cli.files.len() > 1 => {
                    writeln!(out, "{}:{}", path.display(), matches.len())?
                }
                _ => writeln!(out, "{}", matches.len())?,
            }
            continue;
        }
        for located in matches {
            if cli.pointers {
                serde_json::to_writer(&mut *out, located)?;
            } else {
                serde_json::to_writer(&mut *out, &located.entry)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

// Returns the total number of matches across all inputs.
fn run(cli: &Cli) -> Result<usize> {
    let finder = KeyFinder::with_options(build_options(cli)?);
    let documents = load_inputs(&cli.files)?;
    debug!(
        "searching {} document(s) for {:?}, max depth {:?}",
        documents.len(),
        finder.options().matcher.describe(),
        finder.options().max_depth
    );
    let results = finder.find_all(&documents)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_matches(&mut out, cli, &results)?;
    out.flush()?;

    Ok(results.iter().map(Vec::len).sum())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(0) => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("keyfinder: {e}");
            ExitCode::from(2)
        }
    }
}
