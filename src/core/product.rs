//! Product business logic - Handles all catalog operations.
//!
//! Provides functions for creating, retrieving, searching, updating and
//! deleting products. Validation runs before every persistence call so the
//! catalog invariants (known category, non-empty ingredient list) hold no
//! matter which interface writes a product.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use serde_json::json;

/// The recognized product categories.
pub const CATEGORIES: &[&str] = &[
    "Skincare",
    "Food & Beverage",
    "Personal Care",
    "Cleaning Products",
    "Clothing",
    "Electronics",
    "Other",
];

/// Fields accepted when creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub sustainability: Option<String>,
}

/// Partial update for a product; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub description: Option<String>,
    pub certifications: Option<String>,
    pub packaging: Option<String>,
    pub sustainability: Option<String>,
}

/// Search/pagination parameters for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive text matched against name and brand
    pub q: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// One page of products plus pagination metadata.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<product::Model>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

/// Resolves a category string to its canonical label, matching
/// case-insensitively. Derived on read, never stored.
#[must_use]
pub fn canonical_category(input: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(input.trim()))
        .copied()
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("{field} cannot be empty"),
            details: Some(json!({ "field": field })),
        });
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[String]) -> Result<()> {
    if ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err(Error::Validation {
            message: "at least one ingredient is required".to_string(),
            details: Some(json!({ "field": "ingredients" })),
        });
    }
    Ok(())
}

/// Creates a new product after validating the catalog invariants.
///
/// # Errors
/// Returns a validation error if the name or brand is empty, the category is
/// unknown, or the ingredient list is empty; a database error if the insert
/// fails.
pub async fn create_product(db: &DatabaseConnection, input: NewProduct) -> Result<product::Model> {
    validate_text("name", &input.name)?;
    validate_text("brand", &input.brand)?;
    validate_ingredients(&input.ingredients)?;
    let category = canonical_category(&input.category).ok_or_else(|| Error::Validation {
        message: format!("unknown category {:?}", input.category),
        details: Some(json!({ "field": "category", "allowed": CATEGORIES })),
    })?;

    let now = chrono::Utc::now().naive_utc();
    let ingredients: Vec<String> = input
        .ingredients
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();

    let model = product::ActiveModel {
        name: Set(input.name.trim().to_string()),
        category: Set(category.to_string()),
        brand: Set(input.brand.trim().to_string()),
        ingredients: Set(product::IngredientList(ingredients)),
        description: Set(input.description),
        certifications: Set(input.certifications),
        packaging: Set(input.packaging),
        sustainability: Set(input.sustainability),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Searches the catalog with optional text and category filters, newest
/// first, paginated.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn search_products(
    db: &DatabaseConnection,
    filter: ProductFilter,
) -> Result<ProductPage> {
    let page = filter.page.unwrap_or(1).max(1);
    let limit = filter.limit.unwrap_or(10).clamp(1, 100);

    let mut query = Product::find();
    if let Some(text) = filter.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(product::Column::Name.contains(text))
                .add(product::Column::Brand.contains(text)),
        );
    }
    if let Some(category) = filter.category.as_deref() {
        let canonical = canonical_category(category).ok_or_else(|| Error::Validation {
            message: format!("unknown category {category:?}"),
            details: Some(json!({ "field": "category", "allowed": CATEGORIES })),
        })?;
        query = query.filter(product::Column::Category.eq(canonical));
    }

    let paginator = query
        .order_by_desc(product::Column::CreatedAt)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let products = paginator.fetch_page(page - 1).await?;

    Ok(ProductPage {
        products,
        page,
        limit,
        total,
    })
}

/// Applies a partial update to a product, re-validating every touched
/// invariant.
///
/// # Errors
/// Returns `ProductNotFound` if the id is unknown, a validation error for a
/// bad field value, or a database error if the update fails.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    changes: ProductChanges,
) -> Result<product::Model> {
    let mut model: product::ActiveModel = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    if let Some(name) = changes.name {
        validate_text("name", &name)?;
        model.name = Set(name.trim().to_string());
    }
    if let Some(brand) = changes.brand {
        validate_text("brand", &brand)?;
        model.brand = Set(brand.trim().to_string());
    }
    if let Some(category) = changes.category {
        let canonical = canonical_category(&category).ok_or_else(|| Error::Validation {
            message: format!("unknown category {category:?}"),
            details: Some(json!({ "field": "category", "allowed": CATEGORIES })),
        })?;
        model.category = Set(canonical.to_string());
    }
    if let Some(ingredients) = changes.ingredients {
        validate_ingredients(&ingredients)?;
        let cleaned: Vec<String> = ingredients
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        model.ingredients = Set(product::IngredientList(cleaned));
    }
    if let Some(description) = changes.description {
        model.description = Set(Some(description));
    }
    if let Some(certifications) = changes.certifications {
        model.certifications = Set(Some(certifications));
    }
    if let Some(packaging) = changes.packaging {
        model.packaging = Set(Some(packaging));
    }
    if let Some(sustainability) = changes.sustainability {
        model.sustainability = Set(Some(sustainability));
    }
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Deletes a product from the catalog. Existing reports keep their own
/// summary and analysis snapshots, so they survive the removal.
///
/// # Errors
/// Returns `ProductNotFound` if the id is unknown, or a database error if
/// the delete fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let model = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    model.delete(db).await?;
    Ok(())
}
