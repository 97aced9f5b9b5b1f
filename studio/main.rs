/// Walkthrough studio
///
/// Serves the backpropagation walkthrough as plain HTML from a synchronous
/// tiny_http server; every page is a form post, no JavaScript required.
///
/// Run with:
///   cargo run --bin studio -- [--addr 127.0.0.1:7878] [--scenario net.json] [--view-only-previous]
/// Then open http://127.0.0.1:7878

mod handlers;
mod render;
mod routes;
mod state;
mod util;

use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};
use tiny_http::Server;

use backprop_walkthrough::{NetworkState, PreviousMode, Sequencer, WalkthroughConfig, CATALOG};
use state::StudioState;

const DEFAULT_ADDR: &str = "127.0.0.1:7878";

struct Args {
    addr:          String,
    scenario:      Option<String>,
    previous_mode: PreviousMode,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        addr:          DEFAULT_ADDR.to_owned(),
        scenario:      None,
        previous_mode: PreviousMode::Recompute,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--addr"               => args.addr = it.next().context("--addr needs host:port")?,
            "--scenario"           => args.scenario = Some(it.next().context("--scenario needs a path")?),
            "--view-only-previous" => args.previous_mode = PreviousMode::ViewOnly,
            other => bail!("unknown argument `{other}`"),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let initial = match &args.scenario {
        Some(path) => NetworkState::load_json(path)
            .with_context(|| format!("loading scenario {path}"))?,
        None => NetworkState::initial(),
    };
    let config    = WalkthroughConfig::new(initial).with_previous_mode(args.previous_mode);
    let sequencer = Sequencer::new(&CATALOG, config)?;

    let server = Server::http(&args.addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", args.addr))?;
    let shared_state = Arc::new(Mutex::new(StudioState::new(sequencer)));

    log::info!("walkthrough studio listening on http://{}", args.addr);
    log::info!("{} steps, previous() mode: {:?}", CATALOG.len(), args.previous_mode);

    // One thread per request, as in any tiny_http server; the mutex keeps
    // moves on the single session ordered.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
