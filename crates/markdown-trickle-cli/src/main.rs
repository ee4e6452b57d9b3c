mod chunker;

use anyhow::{Context, Result, bail};
use chunker::Chunker;
use markdown_trickle_config::{Config, OutputFormat};
use markdown_trickle_parser::{EventLog, RenderSink, StreamParser};
use markdown_trickle_render::{Document, TerminalSink, to_html};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs, process, thread};

const USAGE: &str = "[--html | --events | --terminal] [--seed N] [--delay MS] [FILE]";

/// Command-line overrides. Anything unset falls back to the config file.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    output: Option<OutputFormat>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    input: Option<PathBuf>,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => parsed.output = Some(OutputFormat::Html),
            "--events" => parsed.output = Some(OutputFormat::Events),
            "--terminal" => parsed.output = Some(OutputFormat::Terminal),
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                parsed.seed = Some(value.parse().with_context(|| format!("bad seed {value:?}"))?);
            }
            "--delay" => {
                let value = args.next().context("--delay needs a value")?;
                parsed.delay_ms =
                    Some(value.parse().with_context(|| format!("bad delay {value:?}"))?);
            }
            "-h" | "--help" => parsed.help = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path => {
                if parsed.input.is_some() {
                    bail!("only one input file may be given");
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

fn load_config() -> Config {
    let config_path = Config::config_path();
    match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => {
            log::info!("No config at {}, using defaults", config_path.display());
            Config::default()
        }
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            Config::default()
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Feed every chunk to one parser, pausing between chunks.
fn stream_into<S: RenderSink + ?Sized>(
    chunks: &[&str],
    delay: Duration,
    sink: &mut S,
) -> Result<()> {
    let mut parser = StreamParser::new();
    for (idx, chunk) in chunks.iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        parser.feed(chunk, sink)?;
    }
    parser.finish(sink)?;

    if !parser.inline_spans().is_empty() || parser.block_state().is_code() {
        log::info!(
            "Stream ended with unterminated markup: {:?}, spans {:?}",
            parser.block_state(),
            parser.inline_spans()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let program_name = env::args()
        .next()
        .unwrap_or_else(|| "markdown-trickle-cli".to_string());
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program_name} {USAGE}");
            process::exit(1);
        }
    };
    if args.help {
        println!("Usage: {program_name} {USAGE}");
        return Ok(());
    }

    let mut config = load_config();
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(seed) = args.seed {
        config.stream.seed = Some(seed);
    }
    if let Some(delay_ms) = args.delay_ms {
        config.stream.delay_ms = delay_ms;
    }

    let text = read_input(args.input.as_ref())?;
    let mut chunker = Chunker::new(&config.stream)?;
    let chunks = chunker.split(&text);
    let delay = Duration::from_millis(config.stream.delay_ms);
    log::info!(
        "Streaming {} chars as {} chunks (seed {})",
        text.chars().count(),
        chunks.len(),
        chunker.seed()
    );

    match config.output {
        OutputFormat::Terminal => {
            let mut sink = TerminalSink::new(io::stdout());
            stream_into(&chunks, delay, &mut sink)?;
            sink.finish().context("Failed to write to terminal")?;
            println!();
        }
        OutputFormat::Html => {
            let mut doc = Document::new();
            stream_into(&chunks, delay, &mut doc)?;
            println!("{}", to_html(&doc));
        }
        OutputFormat::Events => {
            let mut log = EventLog::new();
            stream_into(&chunks, delay, &mut log)?;
            for event in log.events() {
                println!("{event}");
            }
        }
    }

    Ok(())
}
