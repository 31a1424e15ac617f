// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::web;

use super::handlers;

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler));

    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(handlers::health_check))

            // Analytics
            .service(
                web::scope("/analytics")
                    .route("/map", web::post().to(handlers::map_result))
                    .route("/query", web::post().to(handlers::run_query))
            )
    );
}
