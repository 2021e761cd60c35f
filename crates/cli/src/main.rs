mod serve;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use commis_core::{resolve, DeliveryRules, RulesDoc};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Supplier delivery-rules toolchain.
#[derive(Parser)]
#[command(name = "commis", version, about = "Supplier delivery-rules toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a delivery-rules JSON document
    Validate {
        /// Path to the rules JSON file
        rules: PathBuf,
    },

    /// Resolve a rules document against a reference instant
    Resolve {
        /// Path to the rules JSON file
        rules: PathBuf,
        /// Supplier-local instant (YYYY-MM-DDTHH:MM[:SS]); defaults to the current wall clock
        #[arg(long)]
        now: Option<String>,
    },

    /// Explain a resolution in plain language
    Explain {
        /// Path to the rules JSON file
        rules: PathBuf,
        /// Supplier-local instant (YYYY-MM-DDTHH:MM[:SS]); defaults to the current wall clock
        #[arg(long)]
        now: Option<String>,
    },

    /// Start the HTTP JSON API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
        /// Supplier record JSON files to pre-load
        #[arg()]
        suppliers: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { rules } => {
            cmd_validate(&rules, cli.output, cli.quiet);
        }
        Commands::Resolve { rules, now } => {
            cmd_resolve(&rules, now.as_deref(), cli.output, cli.quiet);
        }
        Commands::Explain { rules, now } => {
            cmd_explain(&rules, now.as_deref(), cli.output, cli.quiet);
        }
        Commands::Serve { port, suppliers } => {
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            if let Err(e) = rt.block_on(serve::start_server(port, suppliers)) {
                eprintln!("Server error: {}", e);
                process::exit(1);
            }
        }
    }
}

fn cmd_validate(rules_path: &Path, output: OutputFormat, quiet: bool) {
    let doc = load_doc(rules_path, output, quiet);

    match doc.validate() {
        Ok(_) => match output {
            OutputFormat::Text => {
                if !quiet {
                    println!("rules valid");
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "valid": true }));
            }
        },
        Err(violations) => {
            match output {
                OutputFormat::Text => {
                    if !quiet {
                        for v in &violations {
                            eprintln!("{}", v);
                        }
                    }
                }
                OutputFormat::Json => {
                    let body = serde_json::json!({
                        "valid": false,
                        "violations": violations,
                    });
                    println!("{}", body);
                }
            }
            process::exit(1);
        }
    }
}

fn cmd_resolve(rules_path: &Path, now: Option<&str>, output: OutputFormat, quiet: bool) {
    let rules = load_rules(rules_path, output, quiet);
    let now = resolve_instant(now, output, quiet);

    let resolution = match resolve(&rules, now) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("internal error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => {
            let json = resolution.to_json();
            println!("can_order_now: {}", resolution.can_order_now);
            println!("order_date: {}", json["order_date"].as_str().unwrap_or(""));
            println!(
                "estimated_delivery_date: {}",
                json["estimated_delivery_date"].as_str().unwrap_or("")
            );
            println!("explanation: {}", resolution.explanation);
        }
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&resolution.to_json())
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}

fn cmd_explain(rules_path: &Path, now: Option<&str>, output: OutputFormat, quiet: bool) {
    let rules = load_rules(rules_path, output, quiet);
    let now = resolve_instant(now, output, quiet);

    let resolution = match resolve(&rules, now) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("internal error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => {
            println!("{}", resolution.explanation);
            if let Some(note) = &rules.special_rules {
                println!("note: {}", note);
            }
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "explanation": resolution.explanation,
                "special_rules": rules.special_rules,
            });
            println!("{}", body);
        }
    }
}

/// Read and parse a rules JSON file into the boundary document form.
fn load_doc(rules_path: &Path, output: OutputFormat, quiet: bool) -> RulesDoc {
    let doc_str = match std::fs::read_to_string(rules_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", rules_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match serde_json::from_str(&doc_str) {
        Ok(doc) => doc,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", rules_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Load a rules file and validate it, exiting with the full violation
/// list on failure.
fn load_rules(rules_path: &Path, output: OutputFormat, quiet: bool) -> DeliveryRules {
    match load_doc(rules_path, output, quiet).validate() {
        Ok(rules) => rules,
        Err(violations) => {
            for v in &violations {
                report_error(&v.to_string(), output, quiet);
            }
            process::exit(1);
        }
    }
}

/// Parse the `--now` argument, or default to the current wall clock.
fn resolve_instant(raw: Option<&str>, output: OutputFormat, quiet: bool) -> PrimitiveDateTime {
    match raw {
        Some(raw) => match parse_naive_instant(raw) {
            Some(dt) => dt,
            None => {
                let msg = format!(
                    "error: invalid instant '{}' (expected YYYY-MM-DDTHH:MM[:SS])",
                    raw
                );
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
        None => naive_now(),
    }
}

/// Parse a supplier-local naive instant; seconds are optional.
pub(crate) fn parse_naive_instant(raw: &str) -> Option<PrimitiveDateTime> {
    let with_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let minutes = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    PrimitiveDateTime::parse(raw, &with_seconds)
        .or_else(|_| PrimitiveDateTime::parse(raw, &minutes))
        .ok()
}

/// Current wall clock as a naive instant. Time-zone localization is the
/// caller's concern; the engine treats the instant as supplier-local.
pub(crate) fn naive_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
