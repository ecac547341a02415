use anyhow::Result;
use chatbox::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
