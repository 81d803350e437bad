use crate::domain::a001_connection::api::fetch_credential;
use crate::shared::api_utils::{get_json, marketplace_get, marketplace_put};
use contracts::domain::a003_product::{CategoryName, ItemUpdate, ProductPage, ProductQuery};
use contracts::shared::api::ApiError;
use futures::future::join_all;
use std::collections::HashMap;

pub async fn fetch_products(client_id: &str, query: &ProductQuery) -> Result<ProductPage, ApiError> {
    get_json(&query.path(client_id), &query.params()).await
}

pub async fn fetch_category(category_id: &str) -> Result<CategoryName, ApiError> {
    marketplace_get(&format!("/categories/{}", category_id)).await
}

/// Resolves category names concurrently. Ids that fail keep the raw id as name.
pub async fn fetch_category_names(ids: Vec<String>) -> HashMap<String, String> {
    join_all(ids.into_iter().map(|id| async move {
        let name = match fetch_category(&id).await {
            Ok(category) if !category.name.is_empty() => category.name,
            Ok(_) => id.clone(),
            Err(e) => {
                log::warn!("category {}: {}", id, e);
                id.clone()
            }
        };
        (id, name)
    }))
    .await
    .into_iter()
    .collect()
}

/// `PUT /items/{id}` with the seller's own marketplace token.
pub async fn update_item(
    client_id: &str,
    item_id: &str,
    update: &ItemUpdate,
) -> Result<(), ApiError> {
    let credential = fetch_credential(client_id).await?;
    let token = credential
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingToken)?;
    marketplace_put(&format!("/items/{}", item_id), &update.to_body(), &token).await?;
    Ok(())
}
