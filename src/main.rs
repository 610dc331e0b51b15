use calsearch::components::search::request_schema;
use calsearch::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    if std::env::args().any(|arg| arg == "--schema") {
        println!("{:#}", request_schema());
        return Ok(());
    }

    info!("Starting calsearch");

    // Load configuration
    let config = startup::load_config()?;

    // Serve search requests
    startup::serve(config).await
}
