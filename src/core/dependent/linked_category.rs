//! Virtual catalog placements of a master category

use super::{ensure_primary, filter_for};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{CategoryDto, DomainAdapter, LinkedCategoryAdapter, LinkedCategoryDto};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Category, Result};
use async_trait::async_trait;

/// Exports the virtual catalog categories linked to a master category
///
/// The virtual catalogs the links live in are registered so the catalog
/// exporter picks them up.
#[derive(Debug)]
pub struct LinkedCategoryDependentExporter {
    adapter: LinkedCategoryAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for LinkedCategoryDependentExporter {
    fn default() -> Self {
        Self {
            adapter: LinkedCategoryAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for LinkedCategoryDependentExporter {
    type Entity = Category;
    type Dto = LinkedCategoryDto;
    type Primary = CategoryDto;

    fn name(&self) -> &'static str {
        "linked_category"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Category, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::Category));
        ctx.registry_mut().register_kind(EntityKind::Catalog);
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<Category>> {
        let filtered = self.filter.is_filtered(primary);
        let linked: Vec<Category> = ctx
            .store()
            .find_linked_categories(primary)
            .await?
            .into_iter()
            .filter(|category| !filtered || ctx.registry().contains(EntityKind::Category, &category.guid))
            .collect();

        let registry = ctx.registry_mut();
        for category in &linked {
            registry.add_dependency(EntityKind::Catalog, category.catalog.to_guid());
        }

        Ok(linked)
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = Category, Dto = LinkedCategoryDto> {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<LinkedCategoryDto>,
        primary: &mut CategoryDto,
    ) -> Result<()> {
        primary.linked_categories.extend(dtos);
        Ok(())
    }
}
