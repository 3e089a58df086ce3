//! Brands of a catalog

use super::{ensure_primary, filter_for, master_catalog, select_in_scope};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{BrandAdapter, BrandDto, CatalogDto, DomainAdapter};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Brand, Result};
use async_trait::async_trait;

/// Exports the brands owned by a master catalog
#[derive(Debug)]
pub struct BrandDependentExporter {
    adapter: BrandAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for BrandDependentExporter {
    fn default() -> Self {
        Self {
            adapter: BrandAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for BrandDependentExporter {
    type Entity = Brand;
    type Dto = BrandDto;
    type Primary = CatalogDto;

    fn name(&self) -> &'static str {
        "brand"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Catalog, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::Brand));
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<Brand>> {
        let Some(catalog) = master_catalog(ctx, primary).await? else {
            return Ok(Vec::new());
        };
        let brands = ctx.store().find_catalog_brands(&catalog).await?;
        Ok(select_in_scope(
            ctx,
            EntityKind::Brand,
            &catalog,
            brands,
            self.filter.is_filtered(primary),
        ))
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = Brand, Dto = BrandDto> {
        &self.adapter
    }

    fn bind_with_primary_object(&self, dtos: Vec<BrandDto>, primary: &mut CatalogDto) -> Result<()> {
        primary.brands.extend(dtos);
        Ok(())
    }
}
