//! NOTARY CLI
//!
//! Certify files, verify their integrity later, and inspect exported
//! certificates. All digesting happens locally.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use notary_certify::{Certifier, CertifierConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

use commands::VerifyTarget;

#[derive(Parser)]
#[command(name = "notary")]
#[command(about = "NOTARY - File certification and integrity verification", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Certify a file
    Certify {
        /// File to certify
        file: PathBuf,
        /// Owner label (defaults to "Usuario")
        #[arg(short, long)]
        owner: Option<String>,
        /// Write the exported certificate to this path
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify a file against a SHA-256 digest or a certificate
    Verify {
        /// File to verify
        file: PathBuf,
        /// Original SHA-256 digest (64 hex characters)
        #[arg(short, long, required_unless_present = "certificate", conflicts_with = "certificate")]
        digest: Option<String>,
        /// Exported certificate to verify against
        #[arg(short, long)]
        certificate: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code if integrity is compromised
        #[arg(long)]
        strict: bool,
    },
    /// Print digests of a file
    Digest {
        /// File to digest
        file: PathBuf,
        /// Algorithm (sha256, sha1, md5); repeatable, all by default
        #[arg(short, long = "algorithm")]
        algorithms: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show an exported certificate
    Inspect {
        /// Certificate file
        certificate: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "notary=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let certifier = Certifier::new(CertifierConfig::default());

    match cli.command {
        Commands::Certify {
            file,
            owner,
            output,
            json,
        } => {
            let out = commands::certify(
                &certifier,
                &file,
                owner.as_deref(),
                output.as_deref(),
                json,
            )?;
            println!("{}", out);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify {
            file,
            digest,
            certificate,
            json,
            strict,
        } => {
            let target = match (digest.as_deref(), certificate.as_deref()) {
                (Some(digest), _) => VerifyTarget::Digest(digest),
                (None, Some(path)) => VerifyTarget::Certificate(path),
                (None, None) => return Err(eyre!("either --digest or --certificate is required")),
            };
            let (out, intact) = commands::verify_file(&file, target, json)?;
            println!("{}", out);
            if strict && !intact {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Digest {
            file,
            algorithms,
            json,
        } => {
            println!("{}", commands::digest(&file, &algorithms, json)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Inspect { certificate, json } => {
            println!("{}", commands::inspect(&certificate, json)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
