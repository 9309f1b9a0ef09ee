use clap::Parser;
use reveal_lib::cli::{run, Args};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    reveal_lib::logging::init_tracing(args.verbose);

    if let Err(report) = run(args).await {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}: {}", report.code, report.message),
        }
        std::process::exit(1);
    }
}
