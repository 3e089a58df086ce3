//! Sku options of a catalog

use super::{ensure_primary, filter_for, master_catalog, select_in_scope};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{CatalogDto, DomainAdapter, SkuOptionAdapter, SkuOptionDto};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Result, SkuOption};
use async_trait::async_trait;

/// Exports the sku options owned by a master catalog
///
/// In referenced mode the options registered by exported products and by
/// the product type dependent of the same catalog are kept.
#[derive(Debug)]
pub struct SkuOptionDependentExporter {
    adapter: SkuOptionAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for SkuOptionDependentExporter {
    fn default() -> Self {
        Self {
            adapter: SkuOptionAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for SkuOptionDependentExporter {
    type Entity = SkuOption;
    type Dto = SkuOptionDto;
    type Primary = CatalogDto;

    fn name(&self) -> &'static str {
        "sku_option"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Catalog, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::SkuOption));
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<SkuOption>> {
        let Some(catalog) = master_catalog(ctx, primary).await? else {
            return Ok(Vec::new());
        };
        let options = ctx.store().find_catalog_sku_options(&catalog).await?;
        Ok(select_in_scope(
            ctx,
            EntityKind::SkuOption,
            &catalog,
            options,
            self.filter.is_filtered(primary),
        ))
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = SkuOption, Dto = SkuOptionDto> {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<SkuOptionDto>,
        primary: &mut CatalogDto,
    ) -> Result<()> {
        primary.sku_options.extend(dtos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DependencyMode;
    use crate::core::dependent::test_support::context;
    use std::str::FromStr;

    fn guid(s: &str) -> Guid {
        Guid::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_all_mode_returns_every_option() {
        let mut ctx = context(DependencyMode::All);
        let exporter = SkuOptionDependentExporter::default();

        let options = exporter
            .find_dependent_objects(&mut ctx, &guid("MASTER"))
            .await
            .unwrap();
        assert_eq!(options.len(), 2);
    }

    #[tokio::test]
    async fn test_referenced_mode_without_references_is_empty() {
        let mut ctx = context(DependencyMode::Referenced);
        let mut exporter = SkuOptionDependentExporter::default();
        DependentExporter::initialize(&mut exporter, &mut ctx, JobType::Catalog)
            .await
            .unwrap();

        let options = exporter
            .find_dependent_objects(&mut ctx, &guid("MASTER"))
            .await
            .unwrap();
        assert!(options.is_empty());
    }
}
