//! Domain Value Objects
//!
//! Validated inputs for the catalog and order domain.

use std::collections::BTreeSet;

use kernel::id::ProductId;

use crate::error::{CommerceError, CommerceResult};

/// Maximum product name length
pub const PRODUCT_NAME_MAX_LENGTH: usize = 255;

/// Validated product fields for create and full-replace update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    description: String,
    images: Vec<String>,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        images: Vec<String>,
    ) -> CommerceResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(CommerceError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }

        if name.chars().count() > PRODUCT_NAME_MAX_LENGTH {
            return Err(CommerceError::Validation(format!(
                "Product name must be at most {} characters",
                PRODUCT_NAME_MAX_LENGTH
            )));
        }

        if images.iter().any(|url| url.trim().is_empty()) {
            return Err(CommerceError::Validation(
                "Image URLs cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            description: description.into(),
            images,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// Non-empty set of product ids for a new order
///
/// Duplicates collapse; every id is positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIds(BTreeSet<ProductId>);

impl ProductIds {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> CommerceResult<Self> {
        let ids = ids
            .into_iter()
            .map(|raw| {
                ProductId::positive(raw).ok_or_else(|| {
                    CommerceError::Validation(format!("Invalid product id: {}", raw))
                })
            })
            .collect::<CommerceResult<BTreeSet<_>>>()?;

        if ids.is_empty() {
            return Err(CommerceError::EmptyProductSet);
        }

        Ok(Self(ids))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    /// Raw ids for binding as a query array
    pub fn to_vec(&self) -> Vec<i64> {
        self.0.iter().map(ProductId::get).collect()
    }

    /// Requested ids absent from `found`, ascending
    pub fn missing_from(&self, found: &BTreeSet<ProductId>) -> Vec<ProductId> {
        self.0.difference(found).copied().collect()
    }
}
