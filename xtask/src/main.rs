#[cfg(not(test))]
use anyhow::Result;
use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for lanefft")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    /// Formatting then clippy
    Analyze,
    Bench,
    /// Run a program from demos/
    Demo {
        #[arg(default_value = "basic_usage")]
        name: String,
    },
    Sanity {
        /// Path to input WAV file
        input: String,
        #[arg(long, default_value_t = 4096)]
        frame_len: usize,
        #[arg(long)]
        simd: bool,
    },
}

#[cfg(not(test))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    match cli.command {
        Commands::Build => run_all([build_command(&cfg)]),
        Commands::Test => run_all([test_command(&cfg)]),
        Commands::Clippy => run_all([clippy_command()]),
        Commands::Fmt => run_all([fmt_command()]),
        Commands::Analyze => run_all([fmt_command(), clippy_command()]),
        Commands::Bench => run_all([bench_command(&cfg)]),
        Commands::Demo { name } => run_all([demo_command(&cfg, &name)]),
        Commands::Sanity {
            input,
            frame_len,
            simd,
        } => run_all([sanity_command(&input, frame_len, simd)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sanity_command() {
        let cli = Cli::parse_from(["xtask", "sanity", "tone.wav", "--frame-len", "1024", "--simd"]);
        match cli.command {
            Commands::Sanity {
                input,
                frame_len,
                simd,
            } => {
                assert_eq!(input, "tone.wav");
                assert_eq!(frame_len, 1024);
                assert!(simd);
            }
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn demo_defaults_to_basic_usage() {
        let cli = Cli::parse_from(["xtask", "demo"]);
        assert!(matches!(cli.command, Commands::Demo { name } if name == "basic_usage"));
    }
}
