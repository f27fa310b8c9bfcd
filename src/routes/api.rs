use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use log::warn;
use serde::Deserialize;

use crate::domain::types::ItemId;
use crate::dto::catalog::CatalogQuery;
use crate::models::config::ServerConfig;
use crate::routes::error_response;
use crate::services::catalog::load_catalog_page;
use crate::services::catalog_client::CatalogClient;
use crate::services::product::load_product;

#[derive(Deserialize)]
struct ApiV1ProductQueryParams {
    quantity: Option<String>,
}

#[get("/v1/products")]
pub async fn api_v1_products(
    req: HttpRequest,
    client: web::Data<CatalogClient>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    // Keys are decoded one at a time, so a repeated or malformed key only
    // loses itself.
    let pairs = serde_html_form::from_str::<Vec<(String, String)>>(req.query_string())
        .unwrap_or_else(|e| {
            warn!("Ignoring malformed catalog query: {e}");
            Vec::new()
        });
    let query = CatalogQuery::from_pairs(pairs);

    match load_catalog_page(client.get_ref(), query, server_config.page_size).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

#[get("/v1/products/{id}")]
pub async fn api_v1_product(
    path: web::Path<String>,
    params: web::Query<ApiV1ProductQueryParams>,
    client: web::Data<CatalogClient>,
) -> impl Responder {
    let id = match path.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };
    let quantity = params
        .quantity
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u32>().ok());

    match load_product(client.get_ref(), id, quantity).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}
