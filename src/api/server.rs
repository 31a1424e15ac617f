// API server implementation
// Author: Gabriel Demetrios Lafis

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Condition;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::chat::AnalyticsBackend;
use super::{routes, AppState};

/// API server configuration
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    /// Resolve the listen addresses; host may be a name or an IP literal
    pub fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port).to_socket_addrs()?.collect();
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("No address for host {}", self.host),
            ));
        }
        Ok(addrs)
    }
}

/// API server
pub struct Server {
    config: ServerConfig,
    backend: Option<Arc<dyn AnalyticsBackend>>,
}

impl Server {
    /// Create a new API server; without a backend only mapping is served
    pub fn new(backend: Option<Arc<dyn AnalyticsBackend>>, config: ServerConfig) -> Self {
        Server { config, backend }
    }

    /// Run the API server
    pub async fn run(&self) -> io::Result<()> {
        let addrs = self.config.socket_addrs()?;

        let state = web::Data::new(AppState {
            backend: self.backend.clone(),
        });
        let enable_cors = self.config.enable_cors;

        info!("Starting server at http://{}:{}", self.config.host, self.config.port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(state.clone())
                .wrap(Condition::new(enable_cors, cors))
                .configure(routes::configure)
        })
        .workers(self.config.workers)
        .bind(&addrs[..])?
        .run()
        .await
    }
}
