//! Category types of a catalog

use super::{ensure_primary, filter_for, master_catalog, select_in_scope};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{CatalogDto, CategoryTypeAdapter, CategoryTypeDto, DomainAdapter};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{CategoryType, Result};
use async_trait::async_trait;

/// Exports the category types owned by a master catalog
///
/// Returned category types register their attributes, so this exporter
/// runs before the attribute dependent of the same catalog.
#[derive(Debug)]
pub struct CategoryTypeDependentExporter {
    adapter: CategoryTypeAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for CategoryTypeDependentExporter {
    fn default() -> Self {
        Self {
            adapter: CategoryTypeAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for CategoryTypeDependentExporter {
    type Entity = CategoryType;
    type Dto = CategoryTypeDto;
    type Primary = CatalogDto;

    fn name(&self) -> &'static str {
        "category_type"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Catalog, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::CategoryType));
        ctx.registry_mut().register_kind(EntityKind::Attribute);
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<CategoryType>> {
        let Some(catalog) = master_catalog(ctx, primary).await? else {
            return Ok(Vec::new());
        };
        let category_types = ctx.store().find_catalog_category_types(&catalog).await?;
        let category_types = select_in_scope(
            ctx,
            EntityKind::CategoryType,
            &catalog,
            category_types,
            self.filter.is_filtered(primary),
        );

        for category_type in &category_types {
            ctx.registry_mut()
                .add_dependencies(EntityKind::Attribute, category_type.attributes.iter().cloned());
        }

        Ok(category_types)
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = CategoryType, Dto = CategoryTypeDto> {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<CategoryTypeDto>,
        primary: &mut CatalogDto,
    ) -> Result<()> {
        primary.category_types.extend(dtos);
        Ok(())
    }
}
