//! Synonym groups of a catalog

use super::{ensure_primary, filter_for, master_catalog, select_in_scope};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{CatalogDto, DomainAdapter, SynonymGroupAdapter, SynonymGroupDto};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Result, SynonymGroup};
use async_trait::async_trait;

/// Exports the synonym groups owned by a master catalog
#[derive(Debug)]
pub struct SynonymGroupDependentExporter {
    adapter: SynonymGroupAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for SynonymGroupDependentExporter {
    fn default() -> Self {
        Self {
            adapter: SynonymGroupAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for SynonymGroupDependentExporter {
    type Entity = SynonymGroup;
    type Dto = SynonymGroupDto;
    type Primary = CatalogDto;

    fn name(&self) -> &'static str {
        "synonym_group"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Catalog, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::SynonymGroup));
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<SynonymGroup>> {
        let Some(catalog) = master_catalog(ctx, primary).await? else {
            return Ok(Vec::new());
        };
        let groups = ctx.store().find_catalog_synonym_groups(&catalog).await?;
        Ok(select_in_scope(
            ctx,
            EntityKind::SynonymGroup,
            &catalog,
            groups,
            self.filter.is_filtered(primary),
        ))
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = SynonymGroup, Dto = SynonymGroupDto> {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<SynonymGroupDto>,
        primary: &mut CatalogDto,
    ) -> Result<()> {
        primary.synonym_groups.extend(dtos);
        Ok(())
    }
}
