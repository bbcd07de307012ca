use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use getman_report::cli::Cli;
use getman_report::config::NotifierConfig;
use getman_report::{DeliveryResult, build_report_message, http, message, report};

const EXIT_DELIVERY_FAILED: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(&cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "cannot build run notification");
            ExitCode::from(EXIT_BAD_INPUT)
        }
    }
}

async fn run(cli: &Cli) -> getman_report::Result<ExitCode> {
    let report = report::load_report(&cli.report)?;
    let config = NotifierConfig::load(&cli.config)?
        .merge(cli.overrides())
        .resolve(&report)?;

    let payload = build_report_message(&report, &config.message);
    let body = message::to_wire(&payload)?;
    info!(
        layout = %message::layout_for(&report.run.failures, &config.message),
        failures = report.run.failures.len(),
        channel = %config.message.channel,
        "built run notification"
    );

    if cli.dry_run {
        println!("{body}");
        return Ok(ExitCode::SUCCESS);
    }

    let (webhook_url, token) = config.delivery()?;
    match http::send(webhook_url, &body, token).await {
        DeliveryResult::Delivered(response) => {
            info!(status = response.status, "notification delivered");
            Ok(ExitCode::SUCCESS)
        }
        DeliveryResult::Failed { .. } if cli.fail_on_delivery_error => {
            Ok(ExitCode::from(EXIT_DELIVERY_FAILED))
        }
        DeliveryResult::Failed { .. } => {
            warn!("notification not delivered; continuing");
            Ok(ExitCode::SUCCESS)
        }
    }
}
