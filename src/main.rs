use std::io;
use std::process::ExitCode;

use clap::Parser;

mod args;
mod config;
mod error;
mod generate;
mod report;
mod role;
mod session;
mod smc;
mod time;
mod user;

#[cfg(test)]
mod mock;

use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();

    let config = Args::parse().into_config();
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").into());

    let stdout = io::stdout();
    let outcome = generate::run(&config, &mut stdout.lock()).await;
    let status = generate::conclude(&outcome, &config, &program, &mut stdout.lock());

    ExitCode::from(status)
}
