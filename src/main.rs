use clap::Parser;
use stodo::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = stodo::tui::run(cli.project_dir.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
