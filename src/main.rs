//! Host agent configuration tool.
//!
//! Loads the agent's config file exactly as the agent does at startup and
//! reports whether it would start.
//!
//! ```text
//! host-agent [--config PATH] [--debug] check [--tls]
//! host-agent defaults [--format yaml|json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use host_agent::config::defaults::{default_config, DEFAULT_CONFIG_PATH};
use host_agent::lifecycle::Startup;
use host_agent::observability::init_logging;

#[derive(Parser)]
#[command(name = "host-agent")]
#[command(about = "Validate and inspect host agent configuration", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file to load; a missing file means defaults
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the config file
    Check {
        /// Also run the TLS certificate checks
        #[arg(long)]
        tls: bool,
    },
    /// Print the built-in default configuration
    Defaults {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logging = init_logging(cli.debug);

    let result = match cli.command {
        Commands::Check { tls } => check(&cli.config, tls, || logging.enable_debug()),
        Commands::Defaults { format } => print_defaults(format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            // RUST_LOG can filter out the event above.
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn check(
    path: &std::path::Path,
    tls: bool,
    enable_debug: impl FnOnce(),
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(path = %path.display(), "Loading configuration");
    let startup = Startup::load(path)?;
    let config = startup.config();
    if config.debug {
        enable_debug();
    }

    println!("listen: {}", config.listen);
    println!("proxy: {}", config.proxy);
    println!("process paths: {}", config.white_list.process_paths.len());
    println!("proxy ports: {:?}", config.white_list.proxy_ports);
    match startup.upgrade_watch_path() {
        Some(path) => println!("upgrade: watching {}", path),
        None => println!("upgrade: disabled"),
    }

    if tls {
        let resolved = startup.resolve_tls()?;
        println!(
            "tls: certificate {} ({}), insecure: {}",
            config.tls_config.cert_file_path,
            if resolved.cert_file_path.is_some() { "custom" } else { "default" },
            resolved.insecure
        );
        if let Some(csi_proxy) = startup.csi_proxy_config()? {
            println!("csi-proxy:");
            print!("{}", serde_yaml::to_string(&csi_proxy)?);
        }
    }

    println!("configuration OK");
    Ok(())
}

fn print_defaults(format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let config = default_config();
    match format {
        Format::Yaml => print!("{}", serde_yaml::to_string(&config)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
