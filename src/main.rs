use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank a slate's entities by cash suitability
    Rank {
        /// Path to the slate input JSON
        slate: PathBuf,

        /// Write records + summary to a JSON file (atomic)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "slate-scout")]
#[command(about = "DFS slate ranking CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/slate-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match slate_scout::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup, before touching any slate data
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = slate_scout::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Rank { slate, out } => {
            let input = match slate_scout::slate::load_slate(&slate) {
                Ok(i) => i,
                Err(e) => {
                    eprintln!("Slate error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Loaded slate {} with {} entities",
                    input.slate.slate_id,
                    input.entities.len()
                );
            }

            let run = match slate_scout::scoring::score_slate(&input, &effective_scoring) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if let Some(out_path) = &out {
                if let Err(e) =
                    slate_scout::output::write_run_document(out_path, &run.records, &run.summary)
                {
                    eprintln!("Output error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
                if cli.verbose {
                    eprintln!("Wrote {} records to {}", run.records.len(), out_path.display());
                }
            }

            let use_colors = slate_scout::output::should_use_colors();

            if cli.verbose && !run.records.is_empty() {
                // Verbose mode: detailed output with full score breakdown
                for rec in &run.records {
                    println!("{}", slate_scout::output::format_record_detail(rec, use_colors));
                    println!();
                }
            } else {
                println!(
                    "{}",
                    slate_scout::output::format_record_table(&run.records, use_colors)
                );
            }

            // Exclusions and empty pools always land on stderr, never lost
            eprintln!();
            eprintln!("{}", slate_scout::output::format_summary(&run.summary));

            if cli.verbose {
                eprintln!("Done in {:?}", start_time.elapsed());
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
