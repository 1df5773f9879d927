//! CLI definition using clap

use std::path::PathBuf;

use calc_core::calculations::footing::FootingShape;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "footing")]
#[command(version)]
#[command(about = "Footing sizing and concrete quantity estimation")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to <config dir>/footing/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Building, soil and blinding geometry shared by the sizing commands
#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    /// Blinding length (m)
    #[arg(long)]
    pub blinding_length: f64,

    /// Blinding width (m)
    #[arg(long)]
    pub blinding_width: f64,

    /// Blinding thickness (m)
    #[arg(long, default_value_t = 0.1)]
    pub blinding_height: f64,

    /// Number of floors
    #[arg(long)]
    pub floors: u32,

    /// Slab area per floor (m²)
    #[arg(long)]
    pub slab_area: f64,

    /// Soil type key (e.g. clay, sand, rock)
    #[arg(long)]
    pub soil: String,

    /// Building type key (e.g. residential, commercial)
    #[arg(long)]
    pub building: String,

    /// Footing height (m), used for similar footings
    #[arg(long, default_value_t = 0.0)]
    pub footing_height: f64,

    /// Footing shape (square, rectangular). Uses config value if not specified.
    #[arg(long)]
    pub shape: Option<FootingShape>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size a footing from building loads and soil capacity
    Size(SizeArgs),

    /// Concrete volume of one or more footings
    Volume {
        #[command(flatten)]
        size: SizeArgs,

        /// Number of footings (defaults to 1, or to the number of --heights)
        #[arg(long, short = 'n')]
        count: Option<u32>,

        /// Individual footing heights (m), comma separated
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        heights: Vec<f64>,
    },

    /// Run a full calculation from a JSON file and print the quantity report
    Run {
        /// JSON file with label, inputs and volume sections
        input: PathBuf,
    },

    /// Print the active building and soil tables
    Tables,

    /// Manage a project file
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create an empty project file
    New {
        path: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        #[arg(long, default_value = "")]
        job: String,

        #[arg(long, default_value = "")]
        client: String,
    },

    /// Add a calculation (JSON, same format as `run`) to a project
    Add {
        path: PathBuf,

        input: PathBuf,

        /// Identifier recorded in the lock file while saving
        #[arg(long, default_value = "footing-cli")]
        user: String,
    },

    /// Run every calculation in a project and print the reports
    Show { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const SIZE: [&str; 12] = [
        "--blinding-length",
        "2.4",
        "--blinding-width",
        "2.0",
        "--floors",
        "2",
        "--slab-area",
        "100",
        "--soil",
        "clay",
        "--building",
        "residential",
    ];

    fn args(command: &[&str]) -> Vec<String> {
        let mut out = vec!["footing".to_string()];
        out.extend(command.iter().map(|s| s.to_string()));
        out.extend(SIZE.iter().map(|s| s.to_string()));
        out
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_size_defaults() {
        let cli = Cli::try_parse_from(args(&["size"])).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        match cli.command {
            Commands::Size(size) => {
                assert_eq!(size.blinding_height, 0.1);
                assert_eq!(size.footing_height, 0.0);
                assert!(size.shape.is_none());
                assert_eq!(size.soil, "clay");
            }
            _ => panic!("expected size command"),
        }
    }

    #[test]
    fn test_volume_heights_list() {
        let cli = Cli::try_parse_from(args(&["-f", "json", "volume", "--heights", "0.3,0.4,0.5", "--shape", "rectangular"]))
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Volume { size, count, heights } => {
                assert_eq!(heights, vec![0.3, 0.4, 0.5]);
                assert!(count.is_none());
                assert_eq!(size.shape, Some(FootingShape::Rectangular));
            }
            _ => panic!("expected volume command"),
        }
    }

    #[test]
    fn test_unknown_shape_rejected() {
        assert!(Cli::try_parse_from(args(&["size", "--shape", "round"])).is_err());
    }

    #[test]
    fn test_project_add() {
        let cli = Cli::try_parse_from(["footing", "project", "add", "job.ftg", "f1.json"]).unwrap();
        match cli.command {
            Commands::Project {
                action: ProjectAction::Add { path, input, user },
            } => {
                assert_eq!(path, PathBuf::from("job.ftg"));
                assert_eq!(input, PathBuf::from("f1.json"));
                assert_eq!(user, "footing-cli");
            }
            _ => panic!("expected project add"),
        }
    }
}
