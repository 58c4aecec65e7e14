use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Service Network: onboarding packets and email dispatch for mock services
#[derive(Parser)]
#[command(name = "svcnet", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind (defaults to SVCNET_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a packet and write every document to a directory
    Render {
        /// Demo service id or path to a service JSON file
        #[arg(long)]
        service: String,
        /// Address that receives result emails
        #[arg(long)]
        email: String,
        /// Webhook URL (defaults to the service's first webhook)
        #[arg(long)]
        webhook: Option<String>,
        #[arg(long, default_value = "packet")]
        out: PathBuf,
        /// Render the preview variant instead of the welcome packet
        #[arg(long)]
        preview: bool,
        /// Pin ids and timestamps for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a preview packet and email it
    Send {
        /// Demo service id or path to a service JSON file
        #[arg(long)]
        service: String,
        #[arg(long)]
        to: String,
        /// developer or ops
        #[arg(long, default_value = "developer")]
        packet_type: String,
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Email the report for a service's newest mock event
    Report {
        /// Demo service id or path to a service JSON file
        #[arg(long)]
        service: String,
        #[arg(long)]
        to: String,
    },

    /// List the demo services and workflow catalog
    Catalog,
}
