//! Endpoints behind the product creation wizard. All bodies are bare JSON.

use crate::shared::api_utils::{get_json, post_json_raw, put_json};
use contracts::domain::a004_product_draft::{
    rejection_from_body, AttributesResponse, CategoryInfo, CategoryPrediction, CreateItemPayload,
    DomainSpecs, DraftError, ListedProduct, ListedProductsResponse, SizeGuide, SizeGuideQuery,
    SizeGuidesResponse, SkuUpdateRequest,
};
use contracts::shared::api::ApiError;

pub async fn predict_category(client_id: &str, title: &str) -> Result<CategoryPrediction, ApiError> {
    get_json(
        &format!("/mercadolibre/products/{}/catalogo", client_id),
        &[("title", title.to_string())],
    )
    .await
}

pub async fn fetch_category_info(client_id: &str, category_id: &str) -> Result<CategoryInfo, ApiError> {
    get_json(
        &format!("/mercadolibre/categoria/{}", category_id),
        &[("client_id", client_id.to_string())],
    )
    .await
}

pub async fn fetch_domain_specs(client_id: &str, domain_id: &str) -> Result<DomainSpecs, ApiError> {
    get_json(
        &format!("/mercadolibre/specs/{}", domain_id),
        &[("client_id", client_id.to_string())],
    )
    .await
}

pub async fn fetch_attributes(
    client_id: &str,
    category_id: &str,
) -> Result<AttributesResponse, ApiError> {
    get_json(
        &format!("/mercadolibre/categoria/{}/atributos", category_id),
        &[("client_id", client_id.to_string())],
    )
    .await
}

pub async fn fetch_size_guides(
    client_id: &str,
    query: &SizeGuideQuery,
) -> Result<Vec<SizeGuide>, ApiError> {
    let response: SizeGuidesResponse = get_json(
        &format!("/mercadolibre/size-guides/{}", client_id),
        &query.params(),
    )
    .await?;
    Ok(response.size_guides)
}

/// First page of the seller's published listings.
pub async fn fetch_listed_products(client_id: &str) -> Result<Vec<ListedProduct>, ApiError> {
    let response: ListedProductsResponse = get_json(
        &format!("/mercadolibre/all-products/{}", client_id),
        &[("page", "1".to_string()), ("perPage", "100".to_string())],
    )
    .await?;
    Ok(response.products)
}

pub async fn update_sku(client_id: &str, item_id: &str, sku: &str) -> Result<(), ApiError> {
    let _: serde_json::Value = put_json(
        &format!("/products/{}/{}/sku", client_id, item_id),
        &SkuUpdateRequest {
            sku: sku.to_string(),
        },
    )
    .await?;
    Ok(())
}

/// Publishes the item. Marketplace rejections come back as `DraftError::Rejected`.
pub async fn create_item(client_id: &str, payload: &CreateItemPayload) -> Result<(), DraftError> {
    post_json_raw(
        &format!("/mercadolibre/Products/{}/crear-producto", client_id),
        payload,
    )
    .await
    .map(|_| ())
    .map_err(|(status, body)| {
        log::error!("crear-producto failed with {}: {}", status, body);
        rejection_from_body(&body)
    })
}
