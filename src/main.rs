use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskline")]
#[command(about = "Natural language task entry parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a line of task shorthand
    Parse {
        input: String,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a line contains recognizable syntax
    Check { input: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { input, json } => {
            let parsed = taskline::parse(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                println!("{}", parsed.text);
                for badge in taskline::format_for_display(&parsed) {
                    println!("  {badge}");
                }
            }
        }
        Commands::Check { input } => {
            println!("{}", taskline::looks_parseable(&input));
        }
    }

    Ok(())
}
