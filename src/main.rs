use anyhow::Context;
use log::warn;
use std::{
    io::{self, BufRead, Write},
    time::Duration,
};
use thiserror::Error;
use vertex_race::{
    protocol::{parse_command, Reply, Session},
    report::{self, Mode},
    runner::{self, RunnerConfig},
};

const TIMEOUT_ENV: &str = "VERTEX_RACE_TIMEOUT";

#[derive(Debug, Clone, PartialEq)]
struct Options {
    runner: RunnerConfig,
    mode: Mode,
}

#[derive(Debug, Error, PartialEq)]
enum UsageError {
    #[error("help requested")]
    Help,
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' needs a value")]
    MissingValue(String),
    #[error("invalid timeout '{0}', expected a positive number of seconds")]
    InvalidTimeout(String),
}

fn parse_timeout(value: &str) -> Result<Duration, UsageError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| UsageError::InvalidTimeout(value.to_string()))
}

fn parse_args(
    args: impl IntoIterator<Item = String>,
    env_timeout: Option<String>,
) -> Result<Options, UsageError> {
    let mut benchmark = false;
    let mut precise = false;
    let mut timeout = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-b" | "--benchmark" => benchmark = true,
            "--precise" => precise = true,
            "-t" | "--timeout" => {
                let value = args.next().ok_or(UsageError::MissingValue(arg.clone()))?;
                timeout = Some(parse_timeout(&value)?);
            }
            "-h" | "--help" => return Err(UsageError::Help),
            _ => return Err(UsageError::UnknownOption(arg.clone())),
        }
    }

    let timeout = match (timeout, env_timeout) {
        (Some(timeout), _) => timeout,
        (None, Some(value)) => parse_timeout(&value)?,
        (None, None) => runner::DEFAULT_TIMEOUT,
    };
    let mode = if benchmark {
        Mode::Benchmark {
            precision: if precise { 6 } else { 2 },
        }
    } else {
        Mode::Human
    };
    Ok(Options {
        runner: RunnerConfig { timeout },
        mode,
    })
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  vertex-race [-b [--precise]] [-t SECONDS]\n\nReads graphs from stdin:\n  V <n>                 start a graph with n vertices\n  E {{<a,b>,<c,d>,...}}  set its edges and race the solvers\n  s <a> <b>             print a shortest path\n\nOptions:\n  -b, --benchmark       print CPU seconds per solver instead of covers\n      --precise         six decimals in benchmark mode (default: two)\n  -t, --timeout SECS    deadline per graph (default: 120, env: {TIMEOUT_ENV})\n  -h, --help            show this message\n"
    );
    std::process::exit(code)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = match parse_args(std::env::args().skip(1), std::env::var(TIMEOUT_ENV).ok()) {
        Ok(options) => options,
        Err(UsageError::Help) => usage_and_exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            usage_and_exit(2)
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::default();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let reply = parse_command(&line).and_then(|command| session.apply(command));
        match reply {
            Ok(Reply::Pending) => {}
            Ok(Reply::GraphReady) => {
                if let Some(graph) = session.graph() {
                    let outcome = runner::run(graph, &options.runner);
                    out.write_all(report::format_outcome(&outcome, options.mode).as_bytes())
                        .context("failed to write results")?;
                }
            }
            Ok(Reply::Path(path)) => {
                writeln!(out, "{}", report::format_path(&path)).context("failed to write path")?;
            }
            Err(e) => {
                warn!("rejected command {line:?}: {e}");
                eprintln!("Error: {e}");
            }
        }
        out.flush().context("failed to flush stdout")?;
    }
    Ok(())
}
