//! Dossier lead submission executable
//!
//! Reads a lead-capture payload, sends the HubSpot attribution and writes the
//! personalized dossier, then prints the aggregate result as JSON.

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use dossier_core::{paths, DossierConfig, LeadProcessor, SubmissionOrchestrator};
use dossier_types::LeadSubmission;
use std::io::Read;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    // Initialize logging with INFO as default if RUST_LOG not set
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let matches = cli().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Unusable configuration: {:#}", e);
            exit_with_error(&format!("{:#}", e));
        }
    };

    if let Some(file_name) = matches.get_one::<String>("resolve-download") {
        resolve_download(&config, file_name);
        return;
    }

    let payload = match read_payload(matches.get_one::<String>("input")) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Cannot read payload: {:#}", e);
            exit_with_error(&format!("{:#}", e));
        }
    };

    let submission = match LeadSubmission::from_json_str(&payload) {
        Ok(submission) => submission,
        Err(e) => {
            log::error!("Invalid payload: {}", e);
            exit_with_error(&format!("Invalid JSON payload: {}", e));
        }
    };

    let processor = match LeadProcessor::from_config(&config) {
        Ok(processor) => processor,
        Err(e) => {
            log::error!("Failed to initialize services: {}", e);
            exit_with_error(&e.to_string());
        }
    };

    let orchestrator = SubmissionOrchestrator::new(processor);
    let result = orchestrator.process(submission).await;

    match result.to_json_pretty() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize result: {}", e);
            exit_with_error(&e.to_string());
        }
    }
}

fn cli() -> Command {
    Command::new("dossier-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Playa Viva dossier lead processor")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file path (JSON)")
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("FILE")
                .help("Submission payload file, stdin when omitted")
        )
        .arg(
            Arg::new("template")
                .long("template")
                .value_name("FILE")
                .help("Template PDF path")
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_name("DIR")
                .help("Directory for personalized dossiers")
        )
        .arg(
            Arg::new("resolve-download")
                .long("resolve-download")
                .value_name("NAME")
                .help("Resolve a generated dossier file name to its path and exit")
        )
}

/// File (or defaults), then environment, then command line
fn load_config(matches: &ArgMatches) -> anyhow::Result<DossierConfig> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            let config = DossierConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path))?;
            log::info!("Loaded configuration from {}", path);
            config
        }
        None => DossierConfig::default(),
    };

    let mut config = config.with_env_overrides();

    if let Some(template) = matches.get_one::<String>("template") {
        config.document.template_path = PathBuf::from(template);
    }
    if let Some(output_dir) = matches.get_one::<String>("output-dir") {
        config.document.output_dir = Some(PathBuf::from(output_dir));
    }

    config.validate()?;
    Ok(config)
}

fn read_payload(input: Option<&String>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path)),
        None => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .context("Failed to read payload from stdin")?;
            Ok(payload)
        }
    }
}

fn resolve_download(config: &DossierConfig, file_name: &str) {
    let output_dir = config.document.resolved_output_dir();

    match paths::resolve_download(&output_dir, file_name) {
        Ok(path) => {
            let body = serde_json::json!({
                "success": true,
                "path": path.display().to_string(),
            });
            println!("{}", body);
        }
        Err(e) => {
            log::warn!("Download not resolved: {}", e);
            exit_with_error(&e.to_string());
        }
    }
}

fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "message": message,
    })
}

fn exit_with_error(message: &str) -> ! {
    println!("{}", error_body(message));
    std::process::exit(1);
}
