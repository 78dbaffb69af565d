//! Command-line interface for strata
//! This binary tokenizes source files, previews partial reveals, and plays demo scripts.
//!
//! Usage:
//!   strata tokenize `<path>` [--language `<name>`] [--format text|json]   - Print the tokens of a file
//!   strata reveal `<baseline>` `<fragment>` --cursor `<n>`                - Print a partially revealed token stream
//!   strata play [--script `<yaml>`] [--speed `<ms>`] [--log `<file>`]      - Open the interactive player
//!   strata list-layers [--script `<yaml>`]                            - List the layers of a script
mod viewer;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use strata::highlight::{format_tokens, tokenize, Language};
use strata::playback::{DemoScript, Player};
use strata::reveal::{reveal_as, Origin, RevealedToken};
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("tokenize", sub)) => handle_tokenize_command(sub),
        Some(("reveal", sub)) => handle_reveal_command(sub),
        Some(("play", sub)) => handle_play_command(sub),
        Some(("list-layers", sub)) => handle_list_layers_command(sub),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Layered code typing player")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Print the tokens of a source file")
                .arg(path_arg("path", "Source file to tokenize", 1))
                .arg(language_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("reveal")
                .about("Print the token stream with a fragment partially typed")
                .arg(path_arg("baseline", "File holding the already revealed code", 1))
                .arg(path_arg("fragment", "File holding the code being typed", 2))
                .arg(
                    Arg::new("cursor")
                        .long("cursor")
                        .short('c')
                        .help("Number of fragment characters typed so far")
                        .value_parser(value_parser!(usize))
                        .required(true),
                )
                .arg(language_arg()),
        )
        .subcommand(
            Command::new("play")
                .about("Open the interactive player")
                .arg(script_arg())
                .arg(
                    Arg::new("speed")
                        .long("speed")
                        .help("Typing speed in milliseconds per character")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("paused")
                        .long("paused")
                        .help("Start paused instead of playing immediately")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("log")
                        .long("log")
                        .help("Write logs to this file (RUST_LOG sets the level)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("list-layers")
                .about("List the layers of a demo script")
                .arg(script_arg()),
        )
}

fn path_arg(name: &'static str, help: &'static str, index: usize) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(index)
        .value_parser(value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn language_arg() -> Arg {
    Arg::new("language")
        .long("language")
        .short('l')
        .help("Language name (typescript, html, ...); defaults to the file extension")
}

fn script_arg() -> Arg {
    Arg::new("script")
        .long("script")
        .short('s')
        .help("Demo script (YAML); defaults to the built-in script")
        .value_hint(ValueHint::FilePath)
}

/// Logs go to stderr unless a file is given
fn init_logging(log_file: Option<&String>) -> CliResult {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Explicit `--language`, else the file extension, else `fallback`
fn resolve_language(matches: &ArgMatches, path: &Path, fallback: Language) -> Language {
    match matches.get_one::<String>("language") {
        Some(name) => Language::from_name(name),
        None => Language::from_extension(path).unwrap_or(fallback),
    }
}

fn read_source(path: &Path) -> Result<String, Box<dyn Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e).into())
}

fn required_path<'a>(matches: &'a ArgMatches, name: &str) -> &'a Path {
    matches
        .get_one::<PathBuf>(name)
        .expect("path positionals are required(true), so clap rejects a missing one")
}

/// Handle the tokenize command
fn handle_tokenize_command(matches: &ArgMatches) -> CliResult {
    init_logging(None)?;
    let path = required_path(matches, "path");
    let source = read_source(path)?;
    let language = resolve_language(matches, path, Language::Plain);
    let tokens = tokenize(&source, language);
    tracing::debug!(%language, count = tokens.len(), "tokenized {}", path.display());

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&tokens)?),
        _ => print!("{}", format_tokens(&tokens)),
    }
    Ok(())
}

/// Handle the reveal command
fn handle_reveal_command(matches: &ArgMatches) -> CliResult {
    init_logging(None)?;
    let baseline_path = required_path(matches, "baseline");
    let fragment_path = required_path(matches, "fragment");
    let baseline = read_source(baseline_path)?;
    let fragment = read_source(fragment_path)?;
    let cursor = matches.get_one::<usize>("cursor").copied().unwrap_or(0);
    let language = resolve_language(matches, fragment_path, Language::Script);

    let tokens = reveal_as(&baseline, &fragment, language, cursor);
    print!("{}", format_revealed(&tokens));
    Ok(())
}

/// One line per token: `*` marks the token being typed, `-` a hidden one
fn format_revealed(tokens: &[RevealedToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        let marker = if token.in_progress {
            '*'
        } else if token.is_hidden() {
            '-'
        } else {
            ' '
        };
        let origin = match token.origin {
            Origin::Baseline => "baseline",
            Origin::Fragment => "fragment",
        };
        out.push_str(&format!(
            "{} {} {} {:?}\n",
            marker, origin, token.kind, token.value
        ));
    }
    out
}

/// Handle the play command
fn handle_play_command(matches: &ArgMatches) -> CliResult {
    // Without a log file, logging stays off so it cannot scribble over the UI.
    if let Some(log) = matches.get_one::<String>("log") {
        init_logging(Some(log))?;
    }

    let script_path = matches.get_one::<String>("script").map(Path::new);
    let script = DemoScript::load_or_builtin(script_path)?;
    let mut player = Player::new(script)?;
    if let Some(speed) = matches.get_one::<u64>("speed") {
        player.set_speed(*speed);
    }
    let autoplay = !matches.get_flag("paused");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(viewer::viewer_main::run_player(player, autoplay))?;
    Ok(())
}

/// Handle the list-layers command
fn handle_list_layers_command(matches: &ArgMatches) -> CliResult {
    init_logging(None)?;
    let script_path = matches.get_one::<String>("script").map(Path::new);
    let script = DemoScript::load_or_builtin(script_path)?;

    println!("Typing speed: {}ms/char\n", script.speed_ms);
    for (index, layer) in script.layers.iter().enumerate() {
        println!(
            "  {}. {} ({}, {} chars, {}ms pause)",
            index + 1,
            layer.id,
            layer.family(),
            layer.char_len(),
            layer.delay.as_millis()
        );
        if let Some(description) = &layer.description {
            println!("     {}", description);
        }
    }
    Ok(())
}
