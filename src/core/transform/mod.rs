//! Domain to DTO transformation
//!
//! Every exporter converts its domain objects into bundle DTOs through a
//! [`DomainAdapter`]. Adapters validate what the bundle cannot represent and
//! fail per object; the exporter records the failure and moves on.
//!
//! # Example
//!
//! ```
//! use catex::core::transform::{BrandAdapter, DomainAdapter};
//! use catex::domain::Brand;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let brand: Brand = serde_json::from_str(
//!     r#"{"guid": "B1", "code": "CANON", "name": "Canon", "catalog": "MASTER"}"#,
//! )?;
//! let dto = BrandAdapter.populate_dto(&brand)?;
//! assert_eq!(dto.code, "CANON");
//! # Ok(())
//! # }
//! ```

pub mod dto;

use crate::domain::{
    Attribute, Brand, Catalog, CatexError, Category, CategoryType, GiftCertificate,
    GiftCertificateTransaction, Product, ProductType, Result, SkuOption, SynonymGroup,
};
use dto::*;
use std::collections::HashSet;

pub use dto::{
    AttributeDto, BrandDto, CatalogDto, CategoryDto, CategoryTypeDto, GiftCertificateDto,
    GiftCertificateTransactionDto, LinkedCategoryDto, ProductDto, ProductTypeDto, SkuDto,
    SkuOptionDto, SynonymGroupDto,
};

/// Converts a domain object into its bundle DTO
pub trait DomainAdapter: Send + Sync {
    type Entity;
    type Dto;

    /// Build the DTO for `entity`
    ///
    /// # Errors
    ///
    /// Returns [`CatexError::Adapter`] if the object cannot be represented.
    fn populate_dto(&self, entity: &Self::Entity) -> Result<Self::Dto>;
}

/// Check that a monetary amount is a plain decimal number
fn validate_amount(field: &str, owner: &str, amount: &str) -> Result<()> {
    let valid = !amount.is_empty()
        && amount.chars().filter(|c| *c == '.').count() <= 1
        && amount
            .trim_start_matches('-')
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
        && amount.trim_start_matches('-').chars().any(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(CatexError::Adapter(format!(
            "{owner}: {field} '{amount}' is not a decimal amount"
        )))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogAdapter;

impl DomainAdapter for CatalogAdapter {
    type Entity = Catalog;
    type Dto = CatalogDto;

    fn populate_dto(&self, catalog: &Catalog) -> Result<CatalogDto> {
        if let Some(default_language) = &catalog.default_language {
            if !catalog.languages.is_empty() && !catalog.languages.contains(default_language) {
                return Err(CatexError::Adapter(format!(
                    "catalog {}: default language '{}' is not one of its languages",
                    catalog.code, default_language
                )));
            }
        }

        Ok(CatalogDto {
            code: catalog.code.clone(),
            name: catalog.name.clone(),
            master: catalog.master,
            default_language: catalog.default_language.clone(),
            languages: catalog.languages.clone(),
            attributes: Vec::new(),
            brands: Vec::new(),
            category_types: Vec::new(),
            product_types: Vec::new(),
            sku_options: Vec::new(),
            synonym_groups: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeAdapter;

impl DomainAdapter for AttributeAdapter {
    type Entity = Attribute;
    type Dto = AttributeDto;

    fn populate_dto(&self, attribute: &Attribute) -> Result<AttributeDto> {
        Ok(AttributeDto {
            guid: attribute.guid.clone(),
            key: attribute.key.clone(),
            name: attribute.name.clone(),
            attribute_type: attribute.attribute_type.clone(),
            usage: attribute.usage.clone(),
            global: attribute.global || attribute.catalog.is_none(),
            multi_language: attribute.multi_language,
            required: attribute.required,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrandAdapter;

impl DomainAdapter for BrandAdapter {
    type Entity = Brand;
    type Dto = BrandDto;

    fn populate_dto(&self, brand: &Brand) -> Result<BrandDto> {
        Ok(BrandDto {
            guid: brand.guid.clone(),
            code: brand.code.clone(),
            name: brand.name.clone(),
            image_url: brand.image_url.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryTypeAdapter;

impl DomainAdapter for CategoryTypeAdapter {
    type Entity = CategoryType;
    type Dto = CategoryTypeDto;

    fn populate_dto(&self, category_type: &CategoryType) -> Result<CategoryTypeDto> {
        Ok(CategoryTypeDto {
            guid: category_type.guid.clone(),
            name: category_type.name.clone(),
            attributes: category_type.attributes.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductTypeAdapter;

impl DomainAdapter for ProductTypeAdapter {
    type Entity = ProductType;
    type Dto = ProductTypeDto;

    fn populate_dto(&self, product_type: &ProductType) -> Result<ProductTypeDto> {
        if !product_type.multi_sku && !product_type.sku_options.is_empty() {
            return Err(CatexError::Adapter(format!(
                "product type {}: sku options require a multi-sku type",
                product_type.guid
            )));
        }

        Ok(ProductTypeDto {
            guid: product_type.guid.clone(),
            name: product_type.name.clone(),
            attributes: product_type.attributes.clone(),
            sku_attributes: product_type.sku_attributes.clone(),
            sku_options: product_type.sku_options.clone(),
            multi_sku: product_type.multi_sku,
            tax_code: product_type.tax_code.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SkuOptionAdapter;

impl DomainAdapter for SkuOptionAdapter {
    type Entity = SkuOption;
    type Dto = SkuOptionDto;

    fn populate_dto(&self, option: &SkuOption) -> Result<SkuOptionDto> {
        let mut values = option.values.clone();
        values.sort_by_key(|v| v.ordering);

        Ok(SkuOptionDto {
            guid: option.guid.clone(),
            key: option.key.clone(),
            values,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SynonymGroupAdapter;

impl DomainAdapter for SynonymGroupAdapter {
    type Entity = SynonymGroup;
    type Dto = SynonymGroupDto;

    fn populate_dto(&self, group: &SynonymGroup) -> Result<SynonymGroupDto> {
        Ok(SynonymGroupDto {
            guid: group.guid.clone(),
            concept: group.concept.clone(),
            locale: group.locale.clone(),
            synonyms: group.synonyms.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryAdapter;

impl DomainAdapter for CategoryAdapter {
    type Entity = Category;
    type Dto = CategoryDto;

    fn populate_dto(&self, category: &Category) -> Result<CategoryDto> {
        if category.parent.as_ref() == Some(&category.guid) {
            return Err(CatexError::Adapter(format!(
                "category {}: category is its own parent",
                category.guid
            )));
        }

        Ok(CategoryDto {
            guid: category.guid.clone(),
            code: category.code.clone(),
            catalog: category.catalog.clone(),
            name: category.name.clone(),
            parent: category.parent.clone(),
            category_type: category.category_type.clone(),
            ordering: category.ordering,
            hidden: category.hidden,
            attribute_values: category.attribute_values.clone(),
            linked_categories: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedCategoryAdapter;

impl DomainAdapter for LinkedCategoryAdapter {
    type Entity = Category;
    type Dto = LinkedCategoryDto;

    fn populate_dto(&self, category: &Category) -> Result<LinkedCategoryDto> {
        if !category.is_linked() {
            return Err(CatexError::Adapter(format!(
                "category {}: not linked to a master category",
                category.guid
            )));
        }

        Ok(LinkedCategoryDto {
            guid: category.guid.clone(),
            catalog: category.catalog.clone(),
            parent: category.parent.clone(),
            ordering: category.ordering,
            hidden: category.hidden,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductAdapter;

impl DomainAdapter for ProductAdapter {
    type Entity = Product;
    type Dto = ProductDto;

    fn populate_dto(&self, product: &Product) -> Result<ProductDto> {
        let mut codes = HashSet::new();
        for sku in &product.skus {
            if !codes.insert(sku.code.as_str()) {
                return Err(CatexError::Adapter(format!(
                    "product {}: duplicate sku code '{}'",
                    product.guid, sku.code
                )));
            }
        }

        let skus = product
            .skus
            .iter()
            .map(|sku| SkuDto {
                guid: sku.guid.clone(),
                code: sku.code.clone(),
                option_values: sku
                    .option_values
                    .iter()
                    .map(|v| (v.option.clone(), v.value.clone()))
                    .collect(),
                attribute_values: sku.attribute_values.clone(),
            })
            .collect();

        Ok(ProductDto {
            guid: product.guid.clone(),
            code: product.code.clone(),
            catalog: product.catalog.clone(),
            name: product.name.clone(),
            categories: product.categories.clone(),
            brand: product.brand.clone(),
            product_type: product.product_type.clone(),
            hidden: product.hidden,
            attribute_values: product.attribute_values.clone(),
            skus,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GiftCertificateAdapter;

impl DomainAdapter for GiftCertificateAdapter {
    type Entity = GiftCertificate;
    type Dto = GiftCertificateDto;

    fn populate_dto(&self, certificate: &GiftCertificate) -> Result<GiftCertificateDto> {
        validate_amount(
            "purchase amount",
            &format!("gift certificate {}", certificate.guid),
            &certificate.purchase_amount,
        )?;

        Ok(GiftCertificateDto {
            guid: certificate.guid.clone(),
            code: certificate.code.clone(),
            store_code: certificate.store_code.clone(),
            currency: certificate.currency.clone(),
            purchase_amount: certificate.purchase_amount.clone(),
            recipient_name: certificate.recipient_name.clone(),
            sender_name: certificate.sender_name.clone(),
            created: certificate.created,
            transactions: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GiftCertificateTransactionAdapter;

impl DomainAdapter for GiftCertificateTransactionAdapter {
    type Entity = GiftCertificateTransaction;
    type Dto = GiftCertificateTransactionDto;

    fn populate_dto(
        &self,
        transaction: &GiftCertificateTransaction,
    ) -> Result<GiftCertificateTransactionDto> {
        validate_amount(
            "amount",
            &format!("transaction {}", transaction.guid),
            &transaction.amount,
        )?;

        Ok(GiftCertificateTransactionDto {
            guid: transaction.guid.clone(),
            transaction_type: transaction.transaction_type.clone(),
            amount: transaction.amount.clone(),
            authorization_code: transaction.authorization_code.clone(),
            created: transaction.created,
        })
    }
}
