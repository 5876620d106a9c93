#[macro_use]
extern crate diesel;

use clap::Parser;
use log::warn;

use api::api::start_server;
use config::Config;

mod api;
mod config;
mod models;
mod schema;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenv::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = dotenv_loaded {
        warn!("No .env file loaded: {}", e);
    }

    let config = Config::parse();

    start_server(config).await
}
