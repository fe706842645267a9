use anyhow::Result;
use clap::Parser;
use jazzkeys::config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    log::debug!("Starting with {:?}", config);
    jazzkeys::repl::start(config)
}
