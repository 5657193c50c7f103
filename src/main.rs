//! Command-line interface for rowcast
//!
//! # Usage Examples
//!
//! ```bash
//! # All users, one JSON object per line
//! rowcast users --file users.csv
//!
//! # A single user, looked up ignoring case
//! rowcast users --file users.csv --user-name ada
//!
//! # Semicolon-separated file without headers
//! rowcast read --file export.csv --delimiter ';' --no-headers \
//!   --column-names Id,UserName --mapping mapping.yaml
//!
//! # Base-36 encoding
//! rowcast base36 1295
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use csv_rows::RowSource;
use rowcast::{CsvOpts, RowMapping, UserRepository, UserService};

#[derive(Parser)]
#[command(name = "rowcast")]
#[command(about = "Read typed values out of tabular rows without failing on bad data")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load users from a CSV file and print them as JSON lines
    Users {
        #[command(flatten)]
        csv: CsvOpts,

        /// Only print the user with this user name
        #[arg(long)]
        user_name: Option<String>,
    },

    /// Project every row of a CSV file through a column mapping
    Read {
        #[command(flatten)]
        csv: CsvOpts,

        /// YAML file describing the columns to read
        #[arg(long, value_name = "PATH", env = "ROWCAST_MAPPING")]
        mapping: PathBuf,
    },

    /// Print the base-36 encoding of a number
    Base36 {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Users { csv, user_name } => {
            let repository = UserRepository::new(csv.row_source());
            let service = UserService::new(&repository);
            let users: Vec<_> = match user_name {
                Some(name) => service
                    .find_by_user_name(&name)
                    .context("Failed to load users")?
                    .into_iter()
                    .collect(),
                None => service.get_users().context("Failed to load users")?,
            };
            for user in users {
                println!("{}", serde_json::to_string(&user)?);
            }
        }
        Commands::Read {
            csv,
            mapping: mapping_file,
        } => {
            let mapping = RowMapping::from_file(&mapping_file).with_context(|| {
                format!("Failed to load column mapping from {mapping_file:?}")
            })?;
            let rows = csv
                .row_source()
                .read_rows()
                .with_context(|| format!("Failed to read rows from {:?}", csv.file))?;
            tracing::info!("Projecting {} rows", rows.len());
            for row in &rows {
                println!("{}", serde_json::to_string(&mapping.project(row))?);
            }
        }
        Commands::Base36 { value } => {
            let encoded = row_convert::to_base36(value)
                .with_context(|| format!("Failed to encode {value} as base-36"))?;
            println!("{encoded}");
        }
    }

    Ok(())
}
