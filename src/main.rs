//! Terminal walkthrough of one backpropagation iteration.
//!
//! Usage:
//!   backprop-walkthrough                      # every step
//!   backprop-walkthrough --step 12            # a single step (0-based)
//!   backprop-walkthrough --until 11           # steps 0..=11
//!   backprop-walkthrough --scenario net.json  # start from a saved state
//!   backprop-walkthrough --json --step 22     # snapshot as JSON
//!
//! Log verbosity follows RUST_LOG (default `info`).

use std::process;

use anyhow::{bail, Context};
use backprop_walkthrough::{NetworkState, Sequencer, WalkthroughConfig, WalkthroughError, CATALOG};

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    step: Option<usize>,
    until: Option<usize>,
    json: bool,
}

fn usage() -> ! {
    eprintln!("usage: backprop-walkthrough [--scenario <path>] [--step <k> | --until <k>] [--json]");
    process::exit(2);
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--scenario" => args.scenario = Some(it.next().context("--scenario needs a path")?),
            "--step" => {
                let v = it.next().context("--step needs an index")?;
                args.step = Some(v.parse().with_context(|| format!("bad step index `{v}`"))?);
            }
            "--until" => {
                let v = it.next().context("--until needs an index")?;
                args.until = Some(v.parse().with_context(|| format!("bad step index `{v}`"))?);
            }
            "--json" => args.json = true,
            "-h" | "--help" => usage(),
            other => bail!("unknown argument `{other}`"),
        }
    }
    if args.step.is_some() && args.until.is_some() {
        bail!("--step and --until are mutually exclusive");
    }
    Ok(args)
}

/// Index `--until` walks to; the whole catalog when absent.
fn last_step(until: Option<usize>, total: usize) -> Result<usize, WalkthroughError> {
    let last = until.unwrap_or(total - 1);
    if last >= total {
        return Err(WalkthroughError::IndexOutOfRange { index: last, total });
    }
    Ok(last)
}

fn print_current(seq: &Sequencer<'_>) {
    let step = seq.current_step();
    println!("── Step {}/{}: {}", seq.current_index() + 1, seq.total_steps(), step.title);
    println!("{}", step.explanation);
    if let Some(formula) = step.formula {
        println!("    {formula}");
    }
    println!("  = {}", seq.current_result());
    println!();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let initial = match &args.scenario {
        Some(path) => NetworkState::load_json(path)
            .with_context(|| format!("loading scenario {path}"))?,
        None => NetworkState::initial(),
    };

    let mut seq = Sequencer::new(&CATALOG, WalkthroughConfig::new(initial))?;

    if let Some(k) = args.step {
        seq.jump_to(k)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&seq.snapshot())?);
        } else {
            print_current(&seq);
        }
        return Ok(());
    }

    let last = last_step(args.until, seq.total_steps())?;
    if !args.json {
        print_current(&seq);
    }
    while seq.current_index() < last {
        seq.next()?;
        if !args.json {
            print_current(&seq);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&seq.snapshot())?);
        return Ok(());
    }

    let summary = seq.error_summary();
    if let (Some(initial), Some(current)) = (summary.initial_error, summary.current_error) {
        println!("Total error: {initial:.9} → {current:.9}");
    }
    log::info!("walked {} of {} steps", seq.current_index() + 1, seq.total_steps());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn until_defaults_to_last_step() {
        assert_eq!(last_step(None, 23).unwrap(), 22);
        assert_eq!(last_step(Some(0), 23).unwrap(), 0);
        assert_eq!(last_step(Some(22), 23).unwrap(), 22);
    }

    #[test]
    fn until_past_the_end_is_out_of_range() {
        let err = last_step(Some(23), 23).unwrap_err();
        assert!(matches!(err, WalkthroughError::IndexOutOfRange { index: 23, total: 23 }));
    }
}
