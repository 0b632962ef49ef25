// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HDDS Domain Bridge CLI
//!
//! Inspect and validate per-topic QoS overrides of a bridge configuration.
//!
//! # Usage
//!
//! ```bash
//! # Check a configuration file
//! hdds-domain-bridge validate --config bridge.toml
//!
//! # Show overrides and the QoS used before any publisher is detected
//! hdds-domain-bridge show --config bridge.toml
//!
//! # Same, as JSON
//! hdds-domain-bridge show --config bridge.toml --json
//!
//! # Write an example configuration
//! hdds-domain-bridge gen-config --output bridge.toml
//! ```

use clap::{Parser, Subcommand};
use hdds_domain_bridge::{
    BridgeConfig, Durability, HistoryKind, QosOverride, QosResolver, QosSettings, Reliability,
    ResolverPolicy, TopicConfig, ZeroDepth,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// HDDS Domain Bridge
#[derive(Parser, Debug)]
#[command(name = "hdds-domain-bridge")]
#[command(about = "HDDS Domain Bridge - per-topic QoS overrides")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show QoS overrides and their resolution
    Show {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Fail on keep_last with depth 0 instead of clamping to 1
        #[arg(long)]
        reject_zero_depth: bool,
    },

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "bridge.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Validate { config } => cmd_validate(config),
        Commands::Show {
            config,
            json,
            reject_zero_depth,
        } => cmd_show(config, json, reject_zero_depth),
        Commands::GenConfig { output } => cmd_gen_config(output),
    }
}

fn cmd_validate(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    match BridgeConfig::from_file(&config_path) {
        Ok(config) => {
            println!("Configuration valid!");
            println!();
            println!("Bridge: {}", config.bridge.name);
            println!("Topics: {}", config.topics.len());
            for (i, topic) in config.topics.iter().enumerate() {
                let (from, to) = config.domains_for(topic);
                println!(
                    "  [{}] {} ({}) Domain {} -> Domain {}",
                    i, topic.name, topic.type_name, from, to
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Configuration invalid: {}", e);
            std::process::exit(1);
        }
    }
}

#[derive(Serialize)]
struct TopicReport<'a> {
    name: &'a str,
    type_name: &'a str,
    from_domain: u32,
    to_domain: u32,
    overrides: QosOverride,
    resolution: hdds_domain_bridge::Resolution,
}

fn cmd_show(
    config_path: PathBuf,
    json: bool,
    reject_zero_depth: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = BridgeConfig::from_file(&config_path)?;
    let resolver = QosResolver::new(ResolverPolicy {
        zero_depth: if reject_zero_depth {
            ZeroDepth::Reject
        } else {
            ZeroDepth::Clamp
        },
        ..Default::default()
    });

    let mut reports = Vec::with_capacity(config.topics.len());
    for topic in &config.topics {
        let (from_domain, to_domain) = config.domains_for(topic);
        let overrides = topic.qos_override();
        // No live publisher here: unset policies show the fallback.
        let resolution = resolver.resolve(&topic.name, &overrides, None)?;
        reports.push(TopicReport {
            name: &topic.name,
            type_name: &topic.type_name,
            from_domain,
            to_domain,
            overrides,
            resolution,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("Bridge: {}", config.bridge.name);
    for report in &reports {
        let o = &report.overrides;
        let q = &report.resolution.qos;
        println!();
        println!(
            "{} ({}) Domain {} -> Domain {}",
            report.name, report.type_name, report.from_domain, report.to_domain
        );
        println!(
            "  reliability: {:<16} -> {}",
            format_policy(o.reliability()),
            q.reliability
        );
        println!(
            "  durability:  {:<16} -> {}",
            format_policy(o.durability()),
            q.durability
        );
        println!("  history:     {:<16} -> {}", o.history(), q.history);
        println!("  depth:       {:<16} -> {}", o.depth(), q.depth);
        for warning in &report.resolution.warnings {
            println!("  warning: {}", warning);
        }
    }

    Ok(())
}

fn format_policy<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "auto".to_string(), |v| v.to_string())
}

fn cmd_gen_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BridgeConfig::bridge(0, 1);
    config.bridge.name = "example-bridge".into();
    config.add_topic(TopicConfig::new("chatter", "std_msgs::String").qos(QosSettings {
        reliability: Some(Reliability::BestEffort),
        depth: Some(5),
        ..Default::default()
    }));
    config.add_topic(
        TopicConfig::new("map", "nav_msgs::OccupancyGrid").qos(QosSettings {
            durability: Some(Durability::TransientLocal),
            history: Some(HistoryKind::KeepLast),
            depth: Some(1),
            ..Default::default()
        }),
    );
    config.add_topic(TopicConfig::new("tf", "tf2_msgs::TFMessage").domains(2, 3));

    let toml_str = toml::to_string_pretty(&config)?;

    // Add comments
    let content = format!(
        r#"# HDDS Domain Bridge Configuration
# Generated by hdds-domain-bridge gen-config
#
# Unset reliability/durability are detected from the upstream publisher.

{}
"#,
        toml_str
    );

    std::fs::write(&output, content)?;
    println!("Generated configuration file: {}", output.display());
    Ok(())
}
