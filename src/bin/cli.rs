use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifestguard::config::Config;
use manifestguard::output::OutputFormat;
use manifestguard::scoring;
use manifestguard::store::VersionPolicy;
use manifestguard::ScanOptions;

#[derive(Parser)]
#[command(
    name = "manifestguard",
    about = "Audit locally installed browser extensions for privacy risks",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan installed extensions and score their permissions
    Scan {
        /// Extension store path (default: platform auto-detection)
        #[arg(long, short = 's')]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Version selection policy (mtime, version)
        #[arg(long)]
        version_policy: Option<String>,

        /// Exit nonzero when any extension scores at or above this value
        #[arg(long)]
        fail_score: Option<u8>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List known permissions and their risk tiers
    ListPermissions {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .manifestguard.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            store,
            config,
            format,
            version_policy,
            fail_score,
            output,
        } => cmd_scan(store, config, format, version_policy, fail_score, output),
        Commands::ListPermissions { format } => cmd_list_permissions(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    store: Option<PathBuf>,
    config: Option<PathBuf>,
    format_str: String,
    version_policy_str: Option<String>,
    fail_score: Option<u8>,
    output_path: Option<PathBuf>,
) -> Result<i32, manifestguard::error::GuardError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let version_policy = version_policy_str.and_then(|s| {
        let policy = VersionPolicy::from_str_lenient(&s);
        if policy.is_none() {
            eprintln!("Warning: unknown version policy '{}', using config default", s);
        }
        policy
    });

    let options = ScanOptions {
        config_path: config,
        store_override: store,
        version_policy_override: version_policy,
        fail_score_override: fail_score,
        format,
    };

    let report = manifestguard::scan(&options)?;
    let rendered = manifestguard::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = a score reached the fail threshold
    Ok(if report.passes() { 0 } else { 1 })
}

fn cmd_list_permissions(format_str: String) -> Result<i32, manifestguard::error::GuardError> {
    let table = scoring::classification_table();

    match format_str.as_str() {
        "json" => {
            let entries: Vec<serde_json::Value> = table
                .iter()
                .map(|(permission, tier)| {
                    serde_json::json!({
                        "permission": permission,
                        "risk_level": tier,
                        "points": tier.weight(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            println!("{:<24} {:<10} POINTS", "PERMISSION", "TIER");
            println!("{}", "-".repeat(44));
            for (permission, tier) in &table {
                println!("{:<24} {:<10} {}", permission, tier.to_string(), tier.weight());
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, manifestguard::error::GuardError> {
    let path = PathBuf::from(".manifestguard.toml");

    if path.exists() && !force {
        eprintln!(".manifestguard.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .manifestguard.toml");

    Ok(0)
}
