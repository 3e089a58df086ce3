//! Catalog exporter

use crate::core::dependent::{
    AttributeDependentExporter, BrandDependentExporter, CategoryTypeDependentExporter,
    ProductTypeDependentExporter, SkuOptionDependentExporter, SynonymGroupDependentExporter,
};
use crate::core::export::context::ExportContext;
use crate::core::export::exporter::{ExportSource, ExporterImpl};
use crate::core::transform::{CatalogAdapter, CatalogDto, DomainAdapter};
use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Catalog, Result};
use async_trait::async_trait;
use std::collections::HashSet;

/// Catalogs selected by the query or referenced by earlier exporters
#[derive(Debug, Default)]
pub struct CatalogSource {
    primary: bool,
    adapter: CatalogAdapter,
}

impl CatalogSource {
    /// Create a source; `primary` sources also export the queried catalogs
    pub fn new(primary: bool) -> Self {
        Self {
            primary,
            adapter: CatalogAdapter,
        }
    }
}

#[async_trait]
impl ExportSource for CatalogSource {
    type Entity = Catalog;
    type Dto = CatalogDto;

    fn job_type(&self) -> JobType {
        JobType::Catalog
    }

    /// Master catalogs come before virtual ones
    async fn list_exportable_ids(&self, ctx: &mut ExportContext) -> Result<Vec<Guid>> {
        let mut ids = if self.primary {
            ctx.store().query_guids(JobType::Catalog, ctx.query()).await?
        } else {
            Vec::new()
        };
        ids.extend(ctx.registry().dependent_guids(EntityKind::Catalog));

        let codes: Vec<CatalogCode> = ids.iter().map(CatalogCode::from).collect();
        let masters: HashSet<Guid> = ctx
            .store()
            .find_catalogs(&codes)
            .await?
            .into_iter()
            .filter(|catalog| catalog.master)
            .map(|catalog| catalog.code.to_guid())
            .collect();
        ids.sort_by_key(|id| !masters.contains(id));

        Ok(ids)
    }

    async fn find_by_ids(&self, ctx: &ExportContext, ids: &[Guid]) -> Result<Vec<Catalog>> {
        let codes: Vec<CatalogCode> = ids.iter().map(CatalogCode::from).collect();
        ctx.store().find_catalogs(&codes).await
    }

    fn guid_of(&self, catalog: &Catalog) -> Guid {
        catalog.code.to_guid()
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = Catalog, Dto = CatalogDto> {
        &self.adapter
    }
}

/// Catalog exporter with its metadata dependents
///
/// Product and category types run before attributes and sku options because
/// they register the attributes and options they use.
pub fn catalog_exporter(primary: bool) -> ExporterImpl<CatalogSource> {
    let mut exporter = ExporterImpl::new(CatalogSource::new(primary));
    exporter.set_dependent_exporters(vec![
        Box::new(ProductTypeDependentExporter::default()),
        Box::new(CategoryTypeDependentExporter::default()),
        Box::new(AttributeDependentExporter::default()),
        Box::new(SkuOptionDependentExporter::default()),
        Box::new(BrandDependentExporter::default()),
        Box::new(SynonymGroupDependentExporter::default()),
    ]);
    exporter
}
