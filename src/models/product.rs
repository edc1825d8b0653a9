use serde::{Deserialize, Serialize};
use std::fmt;

/// Full projection of a stored product, purchase price included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "prix")]
    pub price: i32,
    #[serde(rename = "prixAchat")]
    pub purchase_price: i32,
}

impl Product {
    /// Wraps on overflow instead of panicking.
    pub fn margin(&self) -> i32 {
        self.price.wrapping_sub(self.purchase_price)
    }
}

/// Label used as the key of the margin report.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product{{id={}, nom='{}', prix={}}}",
            self.id, self.name, self.price
        )
    }
}

/// Public projection served by the product listing. Has no purchase price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProduct {
    pub id: i32,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "prix")]
    pub price: i32,
}

impl From<&Product> for PublicProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Body of create and update requests. A missing `id` means "insert".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "prix")]
    pub price: i32,
    #[serde(rename = "prixAchat", default)]
    pub purchase_price: i32,
}
