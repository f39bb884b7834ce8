use clap::Parser;
use std::path::PathBuf;

/// Query a Kubernetes Bill of Materials report stored in an object store
#[derive(Parser, Debug)]
#[command(name = "kbom-query")]
#[command(version)]
#[command(about = "Query a Kubernetes Bill of Materials report stored in an object store", long_about = None)]
pub struct Args {
    /// Request path, e.g. /bom/etcd or /vulnerabilities/severity/high (defaults to /)
    #[arg(value_name = "PATH", conflicts_with = "event")]
    pub path: Option<String>,

    /// Read a JSON request event with a "rawPath" field from FILE ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub event: Option<String>,

    /// Path to a config file (defaults to ./kbom-query.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// S3-compatible endpoint URL serving path-style object reads
    #[arg(long, value_name = "URL", conflicts_with = "local_dir")]
    pub endpoint: Option<String>,

    /// Send unsigned GET requests instead of signing them with AWS credentials
    #[arg(long, conflicts_with = "local_dir")]
    pub unsigned: bool,

    /// Serve objects from DIR/<bucket>/<key> instead of an object store
    #[arg(long, value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Pretty-print the response envelope
    #[arg(long)]
    pub pretty: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
