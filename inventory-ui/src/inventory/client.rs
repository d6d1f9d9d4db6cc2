use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::state::Product;
use crate::http_client::{HttpClient, Result};
use crate::wasm_utils::MaybeSend;

const PRODUCT_RESOURCE: &str = "product";

/// Field group name the server expects for name/price updates.
pub const PRODUCT_UPDATE_KEY: &str = "product";

/// The remote product store. `ProductClient` talks HTTP; tests substitute
/// an in-memory implementation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProductApi: MaybeSend {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn create_product(&self, product: &Product) -> Result<()>;
    async fn update_product(&self, patch: &ProductPatch) -> Result<()>;
    async fn delete_product(&self, product_id: &str) -> Result<()>;
}

/// Product-specific client wrapper around the generic HttpClient
#[derive(Clone, Debug)]
pub struct ProductClient {
    http: HttpClient,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProductApi for ProductClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let response: ListProductsResponse = self.http.get_json(&[PRODUCT_RESOURCE, ""]).await?;
        Ok(response.products)
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.http.post_json(&[PRODUCT_RESOURCE], product).await
    }

    async fn update_product(&self, patch: &ProductPatch) -> Result<()> {
        self.http.patch_json(&[PRODUCT_RESOURCE, ""], patch).await
    }

    async fn delete_product(&self, product_id: &str) -> Result<()> {
        self.http.delete(&[PRODUCT_RESOURCE, product_id]).await
    }
}

// Wire types for the product API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub product_id: String,
    pub update_key: String,
    pub update_value: ProductFields,
}

impl ProductPatch {
    /// Replaces name and price of `product_id`.
    pub fn product(product_id: &str, product_name: &str, product_price: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            update_key: PRODUCT_UPDATE_KEY.to_string(),
            update_value: ProductFields {
                product_name: product_name.to_string(),
                product_price: product_price.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub product_name: String,
    pub product_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_serializes_in_server_shape() {
        let patch = ProductPatch::product("P1", "Widget", "10.50");
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({
                "productId": "P1",
                "updateKey": "product",
                "updateValue": { "productName": "Widget", "productPrice": "10.50" }
            })
        );
    }

    #[test]
    fn list_response_accepts_numeric_prices_and_missing_key() {
        let body = json!({
            "products": [
                { "productId": "P1", "productName": "Widget", "productPrice": "9.99" },
                { "productId": "P2", "productName": "Gadget", "productPrice": 12.5 }
            ]
        });
        let response: ListProductsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.products[0].product_price, "9.99");
        assert_eq!(response.products[1].product_price, "12.5");

        let empty: ListProductsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.products.is_empty());
    }
}
