#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use microcommerce::{
    AppConfig, ProductStore, Result, app,
    config::{CorsConfig, DatabaseConfig, ServerConfig},
    models::{Product, ProductPayload},
};
use serde_json::Value;
use tower::ServiceExt;

/// In-memory gateway with auto-increment ids and LIKE matching.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Product>>,
    next_id: AtomicUsize,
    writes: AtomicUsize,
    drop_writes: AtomicBool,
}

impl MemoryStore {
    pub fn with_products(products: Vec<Product>) -> Arc<Self> {
        let next = products.iter().map(|p| p.id).max().unwrap_or(0) as usize;
        let store = Self::default();
        store.next_id.store(next, Ordering::SeqCst);
        *store.rows.lock().unwrap() = products;
        Arc::new(store)
    }

    /// Makes `save` report that no row came back.
    pub fn drop_writes(&self) {
        self.drop_writes.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.rows())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.rows().into_iter().find(|p| p.id == id))
    }

    async fn find_by_price_greater_than(&self, threshold: i32) -> Result<Vec<Product>> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|p| p.price > threshold)
            .collect())
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Product>> {
        let pattern: Vec<char> = pattern.chars().collect();
        Ok(self
            .rows()
            .into_iter()
            .filter(|p| like(&p.name.chars().collect::<Vec<_>>(), &pattern))
            .collect())
    }

    async fn save(&self, product: &ProductPayload) -> Result<Option<Product>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.drop_writes.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let id = match product.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1,
        };
        let saved = Product {
            id,
            name: product.name.clone(),
            price: product.price,
            purchase_price: product.purchase_price,
        };

        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == id) {
            Some(row) => *row = saved.clone(),
            None => rows.push(saved.clone()),
        }

        Ok(Some(saved))
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

fn like(text: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like(&text[skip..], rest)),
        Some(('_', rest)) => !text.is_empty() && like(&text[1..], rest),
        Some((c, rest)) => text.first() == Some(c) && like(&text[1..], rest),
    }
}

pub fn product(id: i32, name: &str, price: i32, purchase_price: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        purchase_price,
    }
}

/// Clavier (100/40) and Souris (500/90).
pub fn seeded_store() -> Arc<MemoryStore> {
    MemoryStore::with_products(vec![
        product(1, "Clavier", 100, 40),
        product(2, "Souris", 500, 90),
    ])
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_size: 64 * 1024,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        cors: CorsConfig::default(),
    }
}

pub fn test_router(store: Arc<MemoryStore>) -> Router {
    app::router(store, &test_config()).expect("router builds")
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("request completes")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("req-id", "test-req")
        .body(Body::empty())
        .expect("valid request")
}

pub fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("valid json")
}
