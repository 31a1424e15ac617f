// Ticket Analytics Mapper - Main executable
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Arg, ArgMatches, Command};
use log::{info, warn};
use serde_json::json;

use ticket_analytics_mapper::{
    api::{Server, ServerConfig},
    chat::{AnalyticsBackend, AnalyticsClient, ChatItem, Conversation},
    data::AnalyticsResult,
    mapping::map_analytics,
    utils::{init_logging, Config},
};

fn cli() -> Command<'static> {
    Command::new("Ticket Analytics Mapper")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Maps ticket analytics responses into chart and table models")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            Command::new("map")
                .about("Map an analytics payload read from a file or stdin")
                .arg(
                    Arg::new("input")
                        .value_name("FILE")
                        .help("Payload file; reads stdin when omitted or '-'"),
                ),
        )
        .subcommand(
            Command::new("ask")
                .about("Send one question to the analytics backend")
                .arg(
                    Arg::new("query")
                        .value_name("QUERY")
                        .help("Natural-language analytics question")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("server")
                .about("Run the API server")
                .arg(
                    Arg::new("host")
                        .short('H')
                        .long("host")
                        .value_name("HOST")
                        .help("Sets the server host")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Sets the server port")
                        .takes_value(true),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Config {
    let config = match matches.value_of("config") {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        },
        None => Config::default(),
    };

    config.with_env_overrides()
}

fn read_payload(input: Option<&str>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != "-" => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn item_to_json(item: &ChatItem) -> serde_json::Value {
    json!({
        "id": item.id,
        "role": item.role,
        "text": item.text,
        "error": item.error,
        "view": item.view,
        "debug": item.analytics.as_ref().map(AnalyticsResult::debug_payload),
    })
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    // Load configuration
    let config = load_config(&matches);

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    config.validate()?;

    match matches.subcommand() {
        Some(("map", sub)) => {
            let text = read_payload(sub.value_of("input"))?;
            let result: AnalyticsResult = text.parse()?;
            let view = map_analytics(&result);

            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Some(("ask", sub)) => {
            let query = sub.value_of("query").unwrap_or_default();
            let client = AnalyticsClient::new(&config.backend.base_url, config.backend.timeout())?;
            let mut conversation = Conversation::new();

            let item = match conversation.submit(&client, query).await {
                Some(item) => item,
                None => bail!("Query is empty"),
            };

            println!("{}", serde_json::to_string_pretty(&item_to_json(item))?);
        }
        Some(("server", sub)) => {
            // Override config with command line arguments
            let host = sub.value_of("host").unwrap_or(&config.server.host);
            let port = sub
                .value_of("port")
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(config.server.port);

            let backend: Option<Arc<dyn AnalyticsBackend>> =
                match AnalyticsClient::new(&config.backend.base_url, config.backend.timeout()) {
                    Ok(client) => Some(Arc::new(client)),
                    Err(err) => {
                        warn!("Analytics backend unavailable, serving mapping only: {}", err);
                        None
                    }
                };

            let server_config = ServerConfig {
                host: host.to_string(),
                port,
                workers: config.server.workers.unwrap_or_else(num_cpus::get),
                enable_cors: config.server.enable_cors,
            };

            info!("Using analytics backend at {}", config.backend.base_url);
            let server = Server::new(backend, server_config);
            server.run().await?;
        }
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
        }
    }

    Ok(())
}
