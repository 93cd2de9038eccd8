use clap::Parser;
use larder::app::{handle_fatal_error, initialize_app, AppConfig};
use larder::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let app = AppConfig::new(verbose)
        .with_config_path(cli.config)
        .with_dataset(cli.dataset);

    let result = match initialize_app(&app).await {
        Ok(engine) => cli::run(&engine, cli.command).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        handle_fatal_error(err, verbose);
    }
}
