use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "stodo", about = concat!("stodo v", env!("CARGO_PKG_VERSION"), " - a todo list in your terminal"), version)]
pub struct Cli {
    /// Run against a different project directory
    #[arg(short = 'C', long = "project-dir")]
    pub project_dir: Option<String>,
}
