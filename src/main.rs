use clap::Parser;
use color_eyre::Result;
use tessa::app::App;
use tessa::app::config::{AppConfig, Args};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::from_args(&args)?;

    let mut app = App::new(config)?;
    app.run()?;

    Ok(())
}
