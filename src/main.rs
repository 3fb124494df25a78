use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = onehop::cli::Cli::parse();
    if let Err(e) = onehop::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
