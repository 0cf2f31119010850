//! Headless demo host.
//!
//! Mounts the page against the system clock, reads one command per line
//! from stdin and prints a JSON snapshot to stdout whenever view state
//! changes. Logs go to stderr.
//!
//! ```text
//! $ echo -e "scroll 640\nsearch quantum\ntoast Registered\nquit" | icadc-view
//! ```

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use spark_signals::flush_sync;
use tracing_subscriber::{fmt, EnvFilter};

use icadc_view::{
    parse_line, route_event, PageView, Routed, Scheduler, ScrollSource, SiteConfig, SystemClock,
    ViewSnapshot, ICADC_2026,
};

/// Longest sleep when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

#[derive(Parser, Debug)]
#[command(name = "icadc-view", version, about = "Drive the ICADC page state from stdin")]
struct Args {
    /// TOML config file (defaults to ./site.toml if present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Pretty-print snapshots
    #[arg(long)]
    pretty: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,icadc_view=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_snapshot(snapshot: &ViewSnapshot, pretty: bool) {
    let encoded = if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    };
    match encoded {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::warn!(%err, "failed to encode snapshot"),
    }
}

/// Forward stdin lines to the host loop. The channel closes on EOF.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = SiteConfig::load(args.config.as_deref()).context("loading site config")?;

    let scheduler = Scheduler::new(Rc::new(SystemClock));
    let source = ScrollSource::new();
    let view = PageView::mount(&config, &ICADC_2026, &scheduler, &source);

    let pretty = args.pretty;
    let mut last: Option<ViewSnapshot> = None;
    view.on_change(move |snapshot| {
        if last.as_ref() != Some(snapshot) {
            print_snapshot(snapshot, pretty);
            last = Some(snapshot.clone());
        }
    });

    let lines = spawn_stdin_reader();
    loop {
        let wait = scheduler.time_until_next().unwrap_or(IDLE_WAIT);
        match lines.recv_timeout(wait) {
            Ok(line) => match parse_line(&line) {
                Ok(event) => match route_event(&view, &source, event) {
                    Routed::Quit => break,
                    Routed::Navigated(anchor) => tracing::info!(anchor, "navigated"),
                    Routed::Ignored => tracing::debug!(%line, "no effect"),
                    Routed::Handled => {}
                },
                Err(icadc_view::InputError::Empty) => {}
                Err(err) => tracing::warn!(%err, "bad command"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        scheduler.run_due();
        flush_sync();
    }

    view.unmount();
    Ok(())
}
