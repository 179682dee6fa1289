use anyhow::Result;

use dekiemtra::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // logging first
    dekiemtra::logger::init();

    // configuration from environment
    let config = Config::from_env();

    // initialize and run the application
    App::initialize(config).run().await?;

    Ok(())
}
