use anyhow::Context;
use clap::Parser;
use restructure::commands::console;
use restructure::config::Cli;
use restructure::ui::Messages;
use restructure::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::try_from(cli).context("Failed to load configuration")?;

    if let Err(e) = console::run(&config) {
        let messages = Messages::for_language(config.language);
        eprintln!("{}", console::describe_error(&e, messages));
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings, `-v` info, `-vv` debug
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
