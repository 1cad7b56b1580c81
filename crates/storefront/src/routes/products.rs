//! Product route handlers.
//!
//! Every endpoint requires a session token. Vendors manage and see only
//! their own listings; customers browse everything.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use url::Url;

use marketboard_core::{
    Categories, ProductId, UserId,
    contact::{ContactPlatform, instagram_profile_url, whatsapp_chat_url},
    import::BulkRow,
};

use crate::error::{ApiJson, AppError, Result};
use crate::middleware::{RequireAuth, RequireVendor, ensure_can_view, ensure_owner};
use crate::models::{Identity, NewProduct, Product, ProductUpdate};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Query parameters for listing products.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Product fields as sent by clients, for both create and update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub whatsapp_link: Option<String>,
    pub instagram_link: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Bulk create request body.
///
/// `products` is kept as raw JSON so a missing or non-array value gets a
/// specific message and each row can be reported by position.
#[derive(Debug, Default, Deserialize)]
pub struct BulkRequest {
    pub products: Option<serde_json::Value>,
}

/// Query parameters for the contact endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    pub platform: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub platform: ContactPlatform,
    pub url: String,
}

// =============================================================================
// Validation
// =============================================================================

const REQUIRED_FIELDS: &str = "Name, image, and at least one category are required";

fn bad_request(msg: impl Into<String>) -> AppError {
    AppError::BadRequest(msg.into())
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_owned())
}

/// Trimmed, non-blank text.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn validate_name(name: &str) -> Result<String> {
    non_blank(name).ok_or_else(|| bad_request("name must not be blank"))
}

fn validate_image(image: &str) -> Result<String> {
    let image = non_blank(image).ok_or_else(|| bad_request("image must not be blank"))?;
    Url::parse(&image).map_err(|_| bad_request("image must be an absolute URL"))?;
    Ok(image)
}

fn validate_categories(names: &[String]) -> Result<Categories> {
    Categories::parse(names).map_err(|e| bad_request(e.to_string()))
}

fn optional_link(link: Option<&str>) -> Option<String> {
    link.and_then(non_blank)
}

/// Validate a create request.
fn new_product_from_input(vendor_id: UserId, input: ProductInput) -> Result<NewProduct> {
    let (Some(name), Some(image), Some(categories)) =
        (input.name, input.image, input.categories)
    else {
        return Err(bad_request(REQUIRED_FIELDS));
    };
    if name.trim().is_empty() || image.trim().is_empty() || categories.is_empty() {
        return Err(bad_request(REQUIRED_FIELDS));
    }

    Ok(NewProduct {
        vendor_id,
        name: validate_name(&name)?,
        image: validate_image(&image)?,
        whatsapp_link: optional_link(input.whatsapp_link.as_deref()),
        instagram_link: optional_link(input.instagram_link.as_deref()),
        categories: validate_categories(&categories)?,
    })
}

/// Validate an update request. An empty link clears it.
fn update_from_input(input: ProductInput) -> Result<ProductUpdate> {
    Ok(ProductUpdate {
        name: input.name.as_deref().map(validate_name).transpose()?,
        image: input.image.as_deref().map(validate_image).transpose()?,
        whatsapp_link: input.whatsapp_link.as_deref().map(non_blank),
        instagram_link: input.instagram_link.as_deref().map(non_blank),
        categories: input
            .categories
            .as_deref()
            .map(validate_categories)
            .transpose()?,
    })
}

/// Validate one bulk row.
fn new_product_from_row(vendor_id: UserId, row: &BulkRow) -> Result<NewProduct> {
    if row.name.trim().is_empty() || row.image.trim().is_empty() {
        return Err(bad_request("name and image are required"));
    }

    Ok(NewProduct {
        vendor_id,
        name: validate_name(&row.name)?,
        image: validate_image(&row.image)?,
        whatsapp_link: optional_link(row.whatsapp_link.as_deref()),
        instagram_link: optional_link(row.instagram_link.as_deref()),
        categories: row
            .resolved_categories()
            .map_err(|e| bad_request(e.to_string()))?,
    })
}

/// Validate every bulk row, failing on the first bad one (1-based).
fn new_products_from_bulk(vendor_id: UserId, products: serde_json::Value) -> Result<Vec<NewProduct>> {
    let serde_json::Value::Array(rows) = products else {
        return Err(bad_request("Products array is required"));
    };
    if rows.is_empty() {
        return Err(bad_request("Products array is required"));
    }

    rows.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let n = index + 1;
            let row: BulkRow = serde_json::from_value(value)
                .map_err(|e| bad_request(format!("row {n}: invalid row: {e}")))?;
            new_product_from_row(vendor_id, &row).map_err(|e| match e {
                AppError::BadRequest(msg) => bad_request(format!("row {n}: {msg}")),
                other => other,
            })
        })
        .collect()
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse().map_err(|_| not_found())
}

/// Confirm the calling vendor still exists before it creates listings.
async fn ensure_vendor_account(state: &AppState, caller: &Identity) -> Result<()> {
    match state.db().users().find_by_id(caller.id).await {
        Some(user) if user.role.is_vendor() => Ok(()),
        _ => Err(AppError::Forbidden("Vendor account not found".to_owned())),
    }
}

async fn load_product(state: &AppState, raw_id: &str) -> Result<Product> {
    let id = parse_product_id(raw_id)?;
    state
        .db()
        .products()
        .get_by_id(id)
        .await
        .ok_or_else(not_found)
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /products`
///
/// Vendors get all of their own products and `category` is ignored.
/// Customers get everything, narrowed by a non-empty `category`.
#[tracing::instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Json<ProductListResponse> {
    let repo = state.db().products();
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let products = if caller.is_vendor() {
        repo.get_by_vendor_id(caller.id).await
    } else {
        match category {
            Some(category) => repo.get_by_category(category).await,
            None => repo.get_all().await,
        }
    };

    Json(ProductListResponse { products })
}

/// `POST /products`
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireVendor(caller): RequireVendor,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    ensure_vendor_account(&state, &caller).await?;
    let new_product = new_product_from_input(caller.id, input)?;

    let product = state.db().products().create(new_product).await?;
    tracing::info!(product_id = %product.id, vendor_id = %caller.id, "Created product");

    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

/// `POST /products/bulk`
///
/// All rows are validated before any is stored.
#[tracing::instrument(skip_all)]
pub async fn bulk_create(
    State(state): State<AppState>,
    RequireVendor(caller): RequireVendor,
    ApiJson(body): ApiJson<BulkRequest>,
) -> Result<(StatusCode, Json<ProductListResponse>)> {
    ensure_vendor_account(&state, &caller).await?;

    let rows = body
        .products
        .ok_or_else(|| bad_request("Products array is required"))?;
    let new_products = new_products_from_bulk(caller.id, rows)?;

    let products = state.db().products().create_many(new_products).await?;
    tracing::info!(count = products.len(), vendor_id = %caller.id, "Bulk created products");

    Ok((StatusCode::CREATED, Json(ProductListResponse { products })))
}

/// `GET /products/{id}`
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = load_product(&state, &id).await?;
    ensure_can_view(&caller, &product)?;

    Ok(Json(ProductResponse { product }))
}

/// `PUT /products/{id}`
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireVendor(caller): RequireVendor,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<ProductResponse>> {
    let existing = load_product(&state, &id).await?;
    ensure_owner(&caller, &existing)?;
    let update = update_from_input(input)?;

    let product = state
        .db()
        .products()
        .update(existing.id, update)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ProductResponse { product }))
}

/// `DELETE /products/{id}`
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireVendor(caller): RequireVendor,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let existing = load_product(&state, &id).await?;
    ensure_owner(&caller, &existing)?;

    if !state.db().products().delete(existing.id).await? {
        return Err(not_found());
    }
    tracing::info!(product_id = %existing.id, "Deleted product");

    Ok(Json(DeleteResponse { success: true }))
}

/// `GET /products/{id}/contact?platform=whatsapp|instagram`
///
/// Resolves the vendor's contact link into a URL the client can open.
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn contact(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<ContactResponse>> {
    let platform: ContactPlatform = query
        .platform
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| bad_request("platform must be whatsapp or instagram"))?;

    let product = load_product(&state, &id).await?;
    ensure_can_view(&caller, &product)?;

    let url = match platform {
        ContactPlatform::Whatsapp => product
            .whatsapp_link
            .as_deref()
            .map(|link| whatsapp_chat_url(link, &product.name)),
        ContactPlatform::Instagram => product.instagram_link.as_deref().map(instagram_profile_url),
    }
    .ok_or_else(|| AppError::NotFound(format!("Product has no {platform} link")))?;

    Ok(Json(ContactResponse { platform, url }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(value: serde_json::Value) -> ProductInput {
        serde_json::from_value(value).unwrap()
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_create_requires_fields() {
        let vendor = UserId::generate();
        for body in [
            json!({}),
            json!({ "name": "Lamp", "image": "https://img.example/l.jpg" }),
            json!({ "name": " ", "image": "https://img.example/l.jpg", "categories": ["A"] }),
            json!({ "name": "Lamp", "image": "https://img.example/l.jpg", "categories": [] }),
        ] {
            let err = new_product_from_input(vendor, input(body)).unwrap_err();
            assert_eq!(message(err), REQUIRED_FIELDS);
        }
    }

    #[test]
    fn test_create_normalizes_input() {
        let product = new_product_from_input(
            UserId::generate(),
            input(json!({
                "name": "  Lamp ",
                "image": "https://img.example/l.jpg",
                "whatsappLink": "",
                "instagramLink": " @lamps ",
                "categories": ["Home & Decor", " Home & Decor "]
            })),
        )
        .unwrap();

        assert_eq!(product.name, "Lamp");
        assert_eq!(product.whatsapp_link, None);
        assert_eq!(product.instagram_link.as_deref(), Some("@lamps"));
        assert_eq!(product.categories.as_slice(), ["Home & Decor"]);
    }

    #[test]
    fn test_create_rejects_relative_image() {
        let err = new_product_from_input(
            UserId::generate(),
            input(json!({ "name": "Lamp", "image": "/lamp.jpg", "categories": ["A"] })),
        )
        .unwrap_err();
        assert_eq!(message(err), "image must be an absolute URL");
    }

    #[test]
    fn test_update_empty_link_clears() {
        let update = update_from_input(input(json!({ "whatsappLink": "" }))).unwrap();
        assert_eq!(update.whatsapp_link, Some(None));
        assert_eq!(update.instagram_link, None);
        assert!(update.name.is_none());
    }

    #[test]
    fn test_update_rejects_empty_categories() {
        let err = update_from_input(input(json!({ "categories": [] }))).unwrap_err();
        assert_eq!(message(err), "at least one category is required");
    }

    #[test]
    fn test_bulk_reports_first_bad_row() {
        let err = new_products_from_bulk(
            UserId::generate(),
            json!([
                { "name": "Ok", "image": "https://img.example/ok.jpg" },
                { "name": "", "image": "https://img.example/bad.jpg" },
                { "name": "Also bad" }
            ]),
        )
        .unwrap_err();
        assert_eq!(message(err), "row 2: name and image are required");
    }

    #[test]
    fn test_bulk_category_fallbacks() {
        let products = new_products_from_bulk(
            UserId::generate(),
            json!([
                { "name": "A", "image": "https://img.example/a.jpg", "categories": ["X", "Y"] },
                { "name": "B", "image": "https://img.example/b.jpg", "category": "Z" },
                { "name": "C", "image": "https://img.example/c.jpg", "categories": [] },
                { "name": "D", "image": "https://img.example/d.jpg" }
            ]),
        )
        .unwrap();

        let cats: Vec<Vec<String>> = products
            .iter()
            .map(|p| p.categories.as_slice().to_vec())
            .collect();
        assert_eq!(
            cats,
            vec![
                vec!["X".to_owned(), "Y".to_owned()],
                vec!["Z".to_owned()],
                vec!["Uncategorized".to_owned()],
                vec!["Uncategorized".to_owned()],
            ]
        );
    }

    #[test]
    fn test_bulk_requires_non_empty_array() {
        let vendor = UserId::generate();
        for value in [json!([]), json!({ "name": "x" }), json!("nope")] {
            let err = new_products_from_bulk(vendor, value).unwrap_err();
            assert_eq!(message(err), "Products array is required");
        }
    }

    #[test]
    fn test_unparseable_id_is_not_found() {
        assert!(matches!(
            parse_product_id("prod1"),
            Err(AppError::NotFound(_))
        ));
    }
}
