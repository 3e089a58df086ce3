//! Product types of a catalog

use super::{ensure_primary, filter_for, master_catalog, select_in_scope};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{CatalogDto, DomainAdapter, ProductTypeAdapter, ProductTypeDto};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{ProductType, Result};
use async_trait::async_trait;

/// Exports the product types owned by a master catalog
///
/// Every returned product type registers its attributes and sku options,
/// so it must run before the attribute and sku option dependents of the
/// same catalog.
#[derive(Debug)]
pub struct ProductTypeDependentExporter {
    adapter: ProductTypeAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for ProductTypeDependentExporter {
    fn default() -> Self {
        Self {
            adapter: ProductTypeAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for ProductTypeDependentExporter {
    type Entity = ProductType;
    type Dto = ProductTypeDto;
    type Primary = CatalogDto;

    fn name(&self) -> &'static str {
        "product_type"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Catalog, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::ProductType));

        let registry = ctx.registry_mut();
        registry.register_kind(EntityKind::Attribute);
        registry.register_kind(EntityKind::SkuOption);
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<ProductType>> {
        let Some(catalog) = master_catalog(ctx, primary).await? else {
            return Ok(Vec::new());
        };
        let product_types = ctx.store().find_catalog_product_types(&catalog).await?;
        let product_types = select_in_scope(
            ctx,
            EntityKind::ProductType,
            &catalog,
            product_types,
            self.filter.is_filtered(primary),
        );

        let registry = ctx.registry_mut();
        for product_type in &product_types {
            registry.add_dependencies(EntityKind::Attribute, product_type.all_attributes().cloned());
            registry.add_dependencies(EntityKind::SkuOption, product_type.sku_options.iter().cloned());
        }

        Ok(product_types)
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = ProductType, Dto = ProductTypeDto> {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<ProductTypeDto>,
        primary: &mut CatalogDto,
    ) -> Result<()> {
        primary.product_types.extend(dtos);
        Ok(())
    }
}
