//! memclient CLI
//!
//! Command-line interface for issuing single commands to a cache server.

use clap::{Parser, Subcommand};
use memclient::{Client, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// memclient CLI
#[derive(Parser, Debug)]
#[command(name = "memclient-cli")]
#[command(about = "CLI for memcached-compatible cache servers")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:11211")]
    server: String,

    /// Connect, read and write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "7000")]
    timeout_ms: u64,

    /// Largest value accepted by set, in bytes
    #[arg(long, default_value = "1048576")]
    max_value_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Expiration in seconds (0 = never)
        #[arg(short, long, default_value = "0")]
        expiration: u32,

        /// Opaque flags stored with the value
        #[arg(short, long, default_value = "0")]
        flags: u32,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,memclient=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .server_addr(&args.server)
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .max_value_size(args.max_value_size)
        .build();

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> memclient::Result<()> {
    tracing::debug!("memclient v{} connecting to {}", memclient::VERSION, config.server_addr);
    let mut client = Client::with_config(config)?;

    match command {
        Commands::Get { key } => match client.get(key.as_bytes())? {
            Some(value) => println!("{}", String::from_utf8_lossy(&value)),
            None => println!("(nil)"),
        },
        Commands::Set {
            key,
            value,
            expiration,
            flags,
        } => {
            let stored = client.set_with(key.as_bytes(), value.as_bytes(), expiration, flags)?;
            println!("{}", if stored { "STORED" } else { "NOT_STORED" });
        }
        Commands::Delete { key } => {
            let deleted = client.delete(key.as_bytes())?;
            println!("{}", if deleted { "DELETED" } else { "NOT_FOUND" });
        }
    }

    client.close()
}
