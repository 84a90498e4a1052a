use clap::Parser;
use kanjidex_config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use self::cli::{Cli, Commands};

/// Filter forced by a verbosity flag, None to defer to RUST_LOG
fn flag_directive(cli: &Cli) -> Option<&'static str> {
    if cli.quiet {
        Some("error")
    } else if cli.verbose {
        Some("debug")
    } else {
        None
    }
}

fn init_tracing(cli: &Cli) {
    let filter = match flag_directive(cli) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { index } => commands::init(&config, index.as_deref()).await,
        Commands::Svg { archive } => commands::svg(&config, archive.as_deref()).await,
        Commands::Check { text } => {
            commands::check(text);
            Ok(())
        }
        Commands::Decode { hex } => {
            commands::decode_hex(hex);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flag_directive() {
        assert_eq!(flag_directive(&parse(&["kanjidex", "-q", "check", "一"])), Some("error"));
        assert_eq!(flag_directive(&parse(&["kanjidex", "-v", "check", "一"])), Some("debug"));
        assert_eq!(flag_directive(&parse(&["kanjidex", "check", "一"])), None);
    }
}
