//! NOTARY Server
//!
//! HTTP API server for file certification and integrity verification.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::Result;
use clap::Parser;
use notary_certify::CertifierConfig;
use notary_server::ServerConfig;
use notary_server::config::{DEFAULT_BIND, DEFAULT_MAX_UPLOAD_BYTES};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notary-server")]
#[command(about = "NOTARY server", long_about = None)]
struct Args {
    /// Bind address
    #[arg(short, long, env = "NOTARY_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Listen on 0.0.0.0:PORT instead of the bind address
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Front-end origin allowed to call the API cross-origin
    #[arg(long, env = "NOTARY_ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,

    /// Largest accepted upload in bytes
    #[arg(long, env = "NOTARY_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Owner recorded when a request supplies none
    #[arg(long, env = "NOTARY_DEFAULT_OWNER")]
    default_owner: Option<String>,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let bind = match self.port {
            Some(port) => format!("0.0.0.0:{}", port),
            None => self.bind,
        };
        let mut certifier = CertifierConfig::default();
        if let Some(owner) = self.default_owner {
            certifier.default_owner = owner;
        }

        ServerConfig {
            bind,
            allowed_origin: self.allowed_origin,
            max_upload_bytes: self.max_upload_bytes,
            certifier,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notary=info,tower_http=debug")),
        )
        .init();

    notary_server::serve(args.into_config()).await?;

    Ok(())
}
