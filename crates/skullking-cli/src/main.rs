use clap::Parser;

use skullking_cli::cli::Cli;
use skullking_cli::commands;
use skullking_cli::config::CliConfig;
use skullking_cli::logging::init_logging;
use skullking_cli::store::FileStore;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_path(path)?,
        None => CliConfig::default(),
    };

    if let Some(store) = cli.store {
        config.store_dir = store;
    }

    config.validate()?;

    let _logging = init_logging(&config.logging, &config.log_path())?;
    let mut store = FileStore::new(&config.store_dir);
    let output = commands::run(cli.command, &mut store, config.default_rounds)?;
    print!("{output}");
    Ok(())
}
