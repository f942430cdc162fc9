use meraki_provider::{init_logging, serve, MerakiProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Meraki provider");
    serve(MerakiProvider::new()).await
}
