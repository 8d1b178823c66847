use resumable_sse::adapters::ReqwestHttpClient;
use resumable_sse::cli::{
    format_json, format_text, parse_args, version_string, CliCommand, TailOptions, USAGE,
};
use resumable_sse::{ClientError, StreamingClient};

use color_eyre::Result;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", version_string());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Tail(options)) => options,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;
    init_tracing();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(tail(options))
}

/// Log to stderr so stdout carries only events. `RUST_LOG` overrides the
/// default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn tail(options: TailOptions) -> Result<()> {
    let config = options.to_config();
    let http = ReqwestHttpClient::from_config(&config)?;
    let mut client = StreamingClient::new(http, config);

    let cancel = client.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, closing stream");
            cancel.cancel();
        }
    });

    let mut stdout = std::io::stdout().lock();
    loop {
        match client.read_event().await {
            Ok(event) => {
                if options.json {
                    writeln!(stdout, "{}", format_json(&event)?)?;
                } else {
                    writeln!(stdout, "{}", format_text(&event))?;
                }
                stdout.flush()?;
            }
            Err(ClientError::Cancelled) => {
                client.close();
                return Ok(());
            }
            Err(e) => {
                tracing::error!(
                    code = e.error_code(),
                    last_event_id = client.last_event_id().unwrap_or(""),
                    "Stream failed"
                );
                return Err(e.into());
            }
        }
    }
}
