mod health;
mod products;

use axum::{Router, routing::get};

use crate::AppState;

pub use products::PRICE_PROBE_THRESHOLD;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/Produits",
            get(products::list_products)
                .post(products::create_product)
                .put(products::update_product),
        )
        .route(
            "/Produits/{id}",
            get(products::get_product).delete(products::delete_product),
        )
        .route("/AdminProduits", get(products::margin_report))
        .route("/sortProductsByLetters", get(products::sorted_products))
        .route("/test/produits/{prix_limit}", get(products::price_probe))
        .route(
            "/test/produits/recherche/{recherche}",
            get(products::name_search_probe),
        )
}
