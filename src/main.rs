use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = apirelay::cli::Cli::parse();
    if let Err(e) = apirelay::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
