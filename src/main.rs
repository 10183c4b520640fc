use bitable_i18n::utils::DEFAULT_CONFIG_FILE;
use bitable_i18n::{generate_files, I18nConfig, I18nError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "bitable-i18n",
    version,
    about = "Generate i18n JSON files from a Feishu bitable translation table"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("bitable_i18n=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e.report(), exit_code = e.exit_code(), "Run failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), I18nError> {
    let config = I18nConfig::load_from_file(&cli.config)?;
    tracing::info!(
        config = %cli.config.display(),
        languages = ?config.languages(),
        "Loaded configuration"
    );

    generate_files(&config).await?;
    Ok(())
}
