mod app;
mod console;
mod settings;

use console::{ConsolePrompter, KeyGate};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = settings::load_config()?;
    let mut prompter = ConsolePrompter::stdio();

    match app::run(&config, &mut prompter, KeyGate, rand::thread_rng())? {
        app::Outcome::InvalidInput => Ok(ExitCode::FAILURE),
        app::Outcome::NothingLoaded | app::Outcome::Completed => Ok(ExitCode::SUCCESS),
    }
}
