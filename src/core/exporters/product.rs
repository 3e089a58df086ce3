//! Product exporter

use crate::core::export::context::ExportContext;
use crate::core::export::exporter::{ExportSource, ExporterImpl};
use crate::core::export::registry::DependencyRegistry;
use crate::core::transform::{DomainAdapter, ProductAdapter, ProductDto};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Product, Result};
use async_trait::async_trait;

/// Products selected by the query
///
/// Each exported product registers everything it references: its master
/// catalog, its categories, brand and product type, and the attributes and
/// sku options its values use.
#[derive(Debug, Default)]
pub struct ProductSource {
    adapter: ProductAdapter,
}

#[async_trait]
impl ExportSource for ProductSource {
    type Entity = Product;
    type Dto = ProductDto;

    fn job_type(&self) -> JobType {
        JobType::Product
    }

    fn dependent_kinds(&self) -> Vec<EntityKind> {
        vec![
            EntityKind::Catalog,
            EntityKind::Category,
            EntityKind::Brand,
            EntityKind::ProductType,
            EntityKind::Attribute,
            EntityKind::SkuOption,
        ]
    }

    async fn list_exportable_ids(&self, ctx: &mut ExportContext) -> Result<Vec<Guid>> {
        ctx.store().query_guids(JobType::Product, ctx.query()).await
    }

    async fn find_by_ids(&self, ctx: &ExportContext, ids: &[Guid]) -> Result<Vec<Product>> {
        ctx.store().find_products(ids).await
    }

    fn guid_of(&self, product: &Product) -> Guid {
        product.guid.clone()
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = Product, Dto = ProductDto> {
        &self.adapter
    }

    fn register_dependencies(&self, registry: &mut DependencyRegistry, product: &Product) {
        registry.add_dependency(EntityKind::Catalog, product.catalog.to_guid());
        registry.add_dependencies(EntityKind::Category, product.categories.iter().cloned());
        if let Some(brand) = &product.brand {
            registry.add_dependency(EntityKind::Brand, brand.clone());
        }
        registry.add_dependency(EntityKind::ProductType, product.product_type.clone());
        registry.add_dependencies(EntityKind::Attribute, product.referenced_attributes());
        registry.add_dependencies(EntityKind::SkuOption, product.referenced_sku_options());
    }
}

/// Product exporter
pub fn product_exporter() -> ExporterImpl<ProductSource> {
    ExporterImpl::new(ProductSource::default())
}
