use clap::Parser;
use feature_sweep::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    match cli::execute(args).await {
        Ok(report) => log::info!("done: {} experiment(s)", report.experiments),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
