#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::api::{api_v1_product, api_v1_products};
#[cfg(feature = "server")]
use crate::services::catalog_client::CatalogClient;
#[cfg(feature = "server")]
use crate::source::HttpCatalogSource;

pub mod cache;
pub mod domain;
pub mod dto;
#[cfg(feature = "server")]
pub mod models;
pub mod pagination;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;
pub mod source;
pub mod store;

/// Registers the JSON API under `/api`.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(api_v1_products)
            .service(api_v1_product),
    );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let source = HttpCatalogSource::new(&server_config.catalog_url, server_config.request_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to build catalog source: {e}")))?;

    let client = CatalogClient::new(Arc::new(source), server_config.cache_config());

    // Start the first catalog request before any visitor asks for it.
    client.catalog();

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
