use clap::Parser;
use tasknote::cli::commands::{Cli, Commands};
use tasknote::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => {
            // Init is handled before vault discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
