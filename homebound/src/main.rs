use colored::Colorize;
use homebound::{command_argument_builder, handle_crawl};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    // clap exits with status 2 on usage errors
    let matches = cmd.get_matches();

    if let Err(e) = handle_crawl(&matches).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
