//! Attributes of a catalog

use super::{ensure_primary, filter_for, master_catalog, select_in_scope};
use super::{DependentExporter, DependentExporterFilter, ExportAllFilter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{AttributeAdapter, AttributeDto, CatalogDto, DomainAdapter};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Attribute, Result};
use async_trait::async_trait;

/// Exports the attributes of a master catalog
///
/// Returns the attributes the catalog owns followed by the global
/// attributes no earlier catalog of the job has emitted. Each global
/// attribute is therefore written once, inside the first catalog that
/// includes it.
#[derive(Debug)]
pub struct AttributeDependentExporter {
    adapter: AttributeAdapter,
    filter: Box<dyn DependentExporterFilter>,
}

impl Default for AttributeDependentExporter {
    fn default() -> Self {
        Self {
            adapter: AttributeAdapter,
            filter: Box::new(ExportAllFilter),
        }
    }
}

#[async_trait]
impl DependentExporter for AttributeDependentExporter {
    type Entity = Attribute;
    type Dto = AttributeDto;
    type Primary = CatalogDto;

    fn name(&self) -> &'static str {
        "attribute"
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::Catalog, primary_job)?;
        self.filter = filter_for(ctx.dependency_mode(EntityKind::Attribute));
        Ok(())
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<Attribute>> {
        let Some(catalog) = master_catalog(ctx, primary).await? else {
            return Ok(Vec::new());
        };
        let filtered = self.filter.is_filtered(primary);

        let owned = ctx.store().find_catalog_attributes(&catalog).await?;
        let globals = ctx.store().find_global_attributes().await?;

        let mut attributes =
            select_in_scope(ctx, EntityKind::Attribute, &catalog, owned, filtered);
        for attribute in select_in_scope(ctx, EntityKind::Attribute, &catalog, globals, filtered) {
            if ctx
                .registry_mut()
                .mark_emitted(EntityKind::Attribute, &attribute.guid)
            {
                attributes.push(attribute);
            }
        }

        Ok(attributes)
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = Attribute, Dto = AttributeDto> {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<AttributeDto>,
        primary: &mut CatalogDto,
    ) -> Result<()> {
        primary.attributes.extend(dtos);
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

    fn keys(attributes: &[Attribute]) -> Vec<&str> {
        attributes.iter().map(|a| a.key.as_str()).collect()
    }

    #[tokio::test]
    async fn test_globals_emitted_with_first_catalog_only() {
        let mut ctx = context(DependencyMode::All);
        let exporter = AttributeDependentExporter::default();

        let master = exporter
            .find_dependent_objects(&mut ctx, &guid("MASTER"))
            .await
            .unwrap();
        assert_eq!(keys(&master), vec!["A_DESC", "A_ZOOM", "A_GLOBAL"]);

        let other = exporter
            .find_dependent_objects(&mut ctx, &guid("OTHER"))
            .await
            .unwrap();
        assert_eq!(keys(&other), vec!["A_OTHER"]);
    }

    #[tokio::test]
    async fn test_virtual_catalog_has_no_attributes() {
        let mut ctx = context(DependencyMode::All);
        let exporter = AttributeDependentExporter::default();

        let attributes = exporter
            .find_dependent_objects(&mut ctx, &guid("VIRTUAL"))
            .await
            .unwrap();
        assert!(attributes.is_empty());
        assert!(!ctx.registry().is_emitted(EntityKind::Attribute, &guid("AG")));
    }

    #[tokio::test]
    async fn test_referenced_mode() {
        let mut ctx = context(DependencyMode::Referenced);
        ctx.registry_mut().register_kind(EntityKind::Attribute);
        ctx.registry_mut().add_dependency(EntityKind::Attribute, guid("A2"));
        let mut exporter = AttributeDependentExporter::default();
        DependentExporter::initialize(&mut exporter, &mut ctx, JobType::Catalog)
            .await
            .unwrap();

        let attributes = exporter
            .find_dependent_objects(&mut ctx, &guid("MASTER"))
            .await
            .unwrap();
        assert_eq!(keys(&attributes), vec!["A_ZOOM"]);
    }
}
