use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Response},
};
use http::{HeaderMap, StatusCode, header};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Product, ProductPayload, PublicProduct},
    utils::RequestId,
};

/// The price probe ignores its path segment and always filters on this.
pub const PRICE_PROBE_THRESHOLD: i32 = 400;

fn log_call(req_id: &RequestId) {
    tracing::info!(req_id = %req_id, "product service call started");
}

pub async fn list_products(
    State(state): State<AppState>,
    req_id: RequestId,
) -> Result<Json<Vec<PublicProduct>>> {
    log_call(&req_id);
    let products = state.store.find_all().await?;

    Ok(Json(products.iter().map(PublicProduct::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    log_call(&req_id);
    let product = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::product_not_found(id))?;

    Ok(Json(product))
}

pub async fn margin_report(
    State(state): State<AppState>,
    req_id: RequestId,
) -> Result<Json<BTreeMap<String, i32>>> {
    log_call(&req_id);
    let products = state.store.find_all().await?;

    let margins = products
        .iter()
        .map(|product| (product.to_string(), product.margin()))
        .collect();

    Ok(Json(margins))
}

pub async fn sorted_products(
    State(state): State<AppState>,
    req_id: RequestId,
) -> Result<Json<Vec<Product>>> {
    log_call(&req_id);
    let mut products = state.store.find_all().await?;
    products.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(products))
}

pub async fn price_probe(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(_price_limit): Path<i32>,
) -> Result<Json<Vec<Product>>> {
    log_call(&req_id);
    let products = state
        .store
        .find_by_price_greater_than(PRICE_PROBE_THRESHOLD)
        .await?;

    Ok(Json(products))
}

pub async fn name_search_probe(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(search): Path<String>,
) -> Result<Json<Vec<Product>>> {
    log_call(&req_id);
    let products = state
        .store
        .find_by_name_like(&format!("%{}%", search))
        .await?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    req_id: RequestId,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(payload): Json<ProductPayload>,
) -> Result<Response> {
    log_call(&req_id);

    if payload.price == 0 {
        return Err(AppError::free_product());
    }

    validate_name(&payload)?;

    let Some(product) = state.store.save(&payload).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let location = resource_location(&headers, uri.path(), product.id);
    tracing::info!(id = product.id, "product created");

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

pub async fn delete_product(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    log_call(&req_id);
    state.store.delete_by_id(id).await?;

    Ok(StatusCode::OK)
}

pub async fn update_product(
    State(state): State<AppState>,
    req_id: RequestId,
    Json(payload): Json<ProductPayload>,
) -> Result<StatusCode> {
    log_call(&req_id);

    if payload.id.is_none() {
        return Err(AppError::BadRequest("id is required".to_string()));
    }

    validate_name(&payload)?;

    state.store.save(&payload).await?;

    Ok(StatusCode::OK)
}

fn validate_name(payload: &ProductPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("nom is required".to_string()));
    }
    Ok(())
}

/// Absolute URI of the new resource when the request names its host,
/// otherwise the request path plus the id.
fn resource_location(headers: &HeaderMap, path: &str, id: i32) -> String {
    let path = format!("{}/{}", path.trim_end_matches('/'), id);

    match headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
    {
        Some(host) => format!("http://{}{}", host, path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn location_is_absolute_with_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("shop.test:9090"));
        assert_eq!(
            resource_location(&headers, "/Produits", 3),
            "http://shop.test:9090/Produits/3"
        );
    }

    #[test]
    fn location_is_relative_without_host() {
        assert_eq!(
            resource_location(&HeaderMap::new(), "/Produits/", 3),
            "/Produits/3"
        );
    }
}
