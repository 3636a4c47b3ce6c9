//! Terminal front end for phone verification.
//!
//! Reads one entry per line: the phone number first, then the code.
//! `:restart` starts over and `:quit` exits.

use anyhow::Result;
use clap::Parser;
use pv_client::{render_text, GatewayClient, SessionController, View};
use pv_core::domain::{Session, Step, SubmitError};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pv_client")]
#[command(about = "Verify a phone number with a one-time SMS code", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the verification gateway
    #[arg(long, env = "GATEWAY_URL", default_value = "https://localhost:3000")]
    gateway_url: String,

    /// Accept self-signed gateway certificates
    #[arg(long)]
    insecure: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
}

/// Fields whose change warrants a full redraw; countdown ticks alone do not
fn redraw_key(session: &Session) -> (Step, bool, bool, Option<String>, bool) {
    (
        session.step(),
        session.is_loading(),
        session.is_unlocked(),
        session.message().map(str::to_string),
        session.is_expired(),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = GatewayClient::new(
        &cli.gateway_url,
        Duration::from_secs(cli.timeout_secs),
        cli.insecure,
    )?;
    info!(gateway = %api.base_url(), "Gateway client ready");
    let controller = Arc::new(SessionController::new(api));

    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        let mut last = redraw_key(&updates.borrow_and_update());
        while updates.changed().await.is_ok() {
            let session = updates.borrow_and_update().clone();
            let key = redraw_key(&session);
            if key != last {
                print!("{}", render_text(&View::of(&session)));
                last = key;
            }
        }
    });

    print!("{}", render_text(&View::of(&controller.snapshot())));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let entry = line.trim();
        match entry {
            ":quit" => break,
            ":restart" => {
                if let Err(e) = controller.restart() {
                    warn!(error = %e, "Restart refused");
                }
                continue;
            }
            ":status" => {
                print!("{}", render_text(&View::of(&controller.snapshot())));
                continue;
            }
            _ => {}
        }

        let outcome = match controller.snapshot().step() {
            Step::Phone => {
                controller.set_phone(entry);
                controller.submit_phone().await
            }
            Step::Code => {
                controller.set_code(entry);
                controller.submit_code().await
            }
        };

        match outcome {
            Ok(()) | Err(SubmitError::InvalidInput) => {}
            Err(SubmitError::Expired) => {
                println!("Code expired. Type :restart to request a new one.")
            }
            Err(e) => warn!(error = %e, "Submission refused"),
        }

        if controller.snapshot().is_unlocked() {
            break;
        }
    }

    drop(controller);
    printer.abort();
    Ok(())
}
