use clap::{Arg, Command};
use log::LevelFilter;
use phishscan::analyzer::AnalyzerEngine;
use phishscan::config::Config;
use phishscan::report::{AnalysisReport, FindingKind};
use std::io::Read;
use std::process;

fn main() {
    let matches = Command::new("phishscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing analysis for raw email text")
        .arg(
            Arg::new("email")
                .value_name("FILE")
                .help("Email file to analyze (reads stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (built-in defaults when omitted)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit the report as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("Suspicious domains: {}", config.link_analysis.suspicious_domains.len());
        println!("Keyword rules: {}", config.content_analysis.keywords.len());
        println!("Safe score threshold: {}", config.safe_score_threshold);
        println!("Configuration OK");
        return;
    }

    let email_text = match read_email(matches.get_one::<String>("email")) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading email: {e}");
            process::exit(1);
        }
    };

    // The engine has no failure path for empty input; rejecting it here is
    // the caller's job.
    if email_text.trim().is_empty() {
        eprintln!("Error: no analyzable content in input");
        process::exit(1);
    }

    let engine = match AnalyzerEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error building analyzer: {e}");
            process::exit(1);
        }
    };

    let report = engine.analyze(&email_text);

    if matches.get_flag("json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

fn load_config(path: Option<&String>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            log::debug!("loading configuration from {path}");
            Config::from_file(path)
        }
        None => Ok(Config::default()),
    }
}

fn read_email(path: Option<&String>) -> anyhow::Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn generate_default_config(path: &str) {
    match Config::default().to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Edit the heuristic lists and weights, then run with -c {path}");
        }
        Err(e) => {
            eprintln!("Error writing configuration: {e}");
            process::exit(1);
        }
    }
}

fn print_report(report: &AnalysisReport) {
    println!("Risk: {} ({}/100)", report.risk_level, report.risk_score);
    println!();

    println!("Findings:");
    for finding in &report.findings {
        let marker = match finding.kind {
            FindingKind::Safe => "✅",
            FindingKind::Warning => "⚠️ ",
            FindingKind::Danger => "❌",
        };
        println!("  {} [{}] {}", marker, finding.category, finding.message);
    }

    if !report.links.is_empty() {
        println!();
        println!("Links ({}):", report.links.len());
        for link in &report.links {
            let marker = if link.suspicious { "❌" } else { "✅" };
            if link.reasons.is_empty() {
                println!("  {} {}", marker, link.display_text);
            } else {
                println!(
                    "  {} {} ({})",
                    marker,
                    link.display_text,
                    link.reasons.join(", ")
                );
            }
        }
    }

    println!();
    println!("Headers:");
    println!("  Sender:      {}", report.headers.sender);
    println!("  Return-Path: {}", report.headers.return_path);
    println!(
        "  SPF:  {}",
        if report.headers.spf_valid { "PASS" } else { "FAIL" }
    );
    println!(
        "  DKIM: {}",
        if report.headers.dkim_valid { "VALID" } else { "INVALID" }
    );
}
