//! Dependent exporters
//!
//! A dependent exporter is attached to a primary exporter and, for each
//! primary object, collects the related objects that travel inside the
//! primary DTO: the metadata of a catalog, the virtual placements of a
//! category, the transactions of a gift certificate.
//!
//! Implementations are written against the typed [`DependentExporter`]
//! trait. Primary exporters hold them through [`BoundDependentExporter`],
//! which only exposes the primary DTO type so dependents of different
//! entity types can share one list.

pub mod attribute;
pub mod brand;
pub mod category_type;
pub mod filter;
pub mod gift_certificate_transaction;
pub mod linked_category;
pub mod product_type;
pub mod sku_option;
pub mod synonym_group;

pub use attribute::AttributeDependentExporter;
pub use brand::BrandDependentExporter;
pub use category_type::CategoryTypeDependentExporter;
pub use filter::{filter_for, DependentExporterFilter, ExportAllFilter, ReferencedOnlyFilter};
pub use gift_certificate_transaction::GiftCertificateTransactionDependentExporter;
pub use linked_category::LinkedCategoryDependentExporter;
pub use product_type::ProductTypeDependentExporter;
pub use sku_option::SkuOptionDependentExporter;
pub use synonym_group::SynonymGroupDependentExporter;

use crate::core::export::context::ExportContext;
use crate::core::export::summary::{codes, SummaryEntry};
use crate::core::transform::DomainAdapter;
use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{CatalogObject, CatalogScope, CatexError, Result, StoreError};
use async_trait::async_trait;

/// Collects the objects a primary object depends on
#[async_trait]
pub trait DependentExporter: Send + Sync {
    /// Domain type of the dependent objects
    type Entity: Send + Sync;
    /// DTO type of the dependent objects
    type Dto: Send;
    /// DTO type of the primary object the dependents are bound into
    type Primary: Send;

    /// Name used in logs and summary entries
    fn name(&self) -> &'static str;

    /// Prepare for a job driven by a `primary_job` exporter
    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()>;

    /// Dependent objects of the primary identified by `primary`
    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<Self::Entity>>;

    /// Adapter building the dependent DTOs
    fn adapter(&self) -> &dyn DomainAdapter<Entity = Self::Entity, Dto = Self::Dto>;

    /// Attach the dependent DTOs to the primary DTO
    fn bind_with_primary_object(&self, dtos: Vec<Self::Dto>, primary: &mut Self::Primary)
        -> Result<()>;
}

/// Dependent exporter seen from a primary exporter with DTO type `P`
#[async_trait]
pub trait BoundDependentExporter<P: Send>: Send + Sync {
    /// Name used in logs and summary entries
    fn name(&self) -> &'static str;

    /// Prepare for a job driven by a `primary_job` exporter
    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()>;

    /// Find, adapt and bind the dependents of one primary object
    ///
    /// Returns the number of dependents bound.
    async fn export_dependents(
        &self,
        ctx: &mut ExportContext,
        primary_guid: &Guid,
        primary: &mut P,
    ) -> Result<usize>;
}

#[async_trait]
impl<D> BoundDependentExporter<D::Primary> for D
where
    D: DependentExporter,
{
    fn name(&self) -> &'static str {
        DependentExporter::name(self)
    }

    async fn initialize(&mut self, ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        DependentExporter::initialize(self, ctx, primary_job).await
    }

    async fn export_dependents(
        &self,
        ctx: &mut ExportContext,
        primary_guid: &Guid,
        primary: &mut D::Primary,
    ) -> Result<usize> {
        let objects = self.find_dependent_objects(ctx, primary_guid).await?;
        let adapter = self.adapter();
        let dtos = objects
            .iter()
            .map(|object| adapter.populate_dto(object))
            .collect::<Result<Vec<_>>>()?;
        let count = dtos.len();

        self.bind_with_primary_object(dtos, primary)?;

        tracing::trace!(
            dependent = DependentExporter::name(self),
            primary = %primary_guid,
            count = count,
            "Bound dependent objects"
        );

        Ok(count)
    }
}

/// Fail if a dependent exporter is attached to the wrong primary exporter
pub(crate) fn ensure_primary(name: &str, expected: JobType, actual: JobType) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CatexError::Export(format!(
            "{name} dependent exporter requires a {expected} primary exporter, got {actual}"
        )))
    }
}

/// Catalog a catalog-scoped dependent works on
///
/// Returns `None` for virtual catalogs, which own no metadata.
pub(crate) async fn master_catalog(
    ctx: &ExportContext,
    primary: &Guid,
) -> Result<Option<CatalogCode>> {
    let code = CatalogCode::from(primary);
    let catalog = ctx
        .store()
        .find_catalogs(std::slice::from_ref(&code))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::CatalogNotFound(code.to_string()))?;

    if catalog.is_virtual() {
        Ok(None)
    } else {
        Ok(Some(catalog.code))
    }
}

/// Keep the objects a catalog may export
///
/// Objects owned by another catalog are dropped with a warning. When
/// `filtered` is set only objects present in the registry under `kind`
/// survive.
pub(crate) fn select_in_scope<T: CatalogObject>(
    ctx: &mut ExportContext,
    kind: EntityKind,
    catalog: &CatalogCode,
    objects: Vec<T>,
    filtered: bool,
) -> Vec<T> {
    objects
        .into_iter()
        .filter(|object| match CatalogScope::of(object, catalog) {
            CatalogScope::OtherCatalog => {
                tracing::warn!(
                    kind = %kind,
                    guid = %object.guid(),
                    catalog = %catalog,
                    "Skipping object owned by another catalog"
                );
                ctx.summary_mut().add_warning(
                    SummaryEntry::new(
                        codes::FOREIGN_CATALOG_OBJECT,
                        format!("{kind} {} is not owned by catalog {catalog}", object.guid()),
                    )
                    .with_job_type(JobType::Catalog)
                    .with_guid(object.guid().clone()),
                );
                false
            }
            CatalogScope::ThisCatalog | CatalogScope::Global => {
                !filtered || ctx.registry().contains(kind, object.guid())
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::adapters::store::{ExportQuery, InMemoryCatalogStore, StoreSnapshot};
    use crate::config::schema::{DependencyMode, ExportConfig};
    use crate::core::export::context::ExportContext;
    use serde_json::json;
    use std::sync::Arc;

    /// Snapshot with a master catalog, a virtual catalog, their metadata and one product
    pub fn snapshot() -> StoreSnapshot {
        serde_json::from_value(json!({
            "catalogs": [
                {"code": "MASTER", "name": "Master"},
                {"code": "OTHER", "name": "Other master"},
                {"code": "VIRTUAL", "name": "Virtual", "master": false}
            ],
            "categories": [
                {"guid": "C1", "code": "cameras", "catalog": "MASTER", "category_type": "CT1"},
                {"guid": "VC1", "code": "cameras", "catalog": "VIRTUAL", "linked_from": "C1"},
                {"guid": "VC2", "code": "deals", "catalog": "VIRTUAL", "linked_from": "C1",
                 "hidden": true}
            ],
            "products": [
                {"guid": "P1", "code": "EOS-R5", "catalog": "MASTER", "categories": ["C1"],
                 "brand": "B1", "product_type": "PT1",
                 "attribute_values": [{"attribute": "A1", "value": "Full frame"}],
                 "skus": [{"guid": "S1", "code": "EOS-R5-BLK",
                           "option_values": [{"option": "O1", "value": "black"}],
                           "attribute_values": [{"attribute": "A2", "value": "1x"}]}]}
            ],
            "attributes": [
                {"guid": "A1", "key": "A_DESC", "name": "Description", "catalog": "MASTER"},
                {"guid": "A2", "key": "A_ZOOM", "name": "Zoom", "catalog": "MASTER"},
                {"guid": "A3", "key": "A_OTHER", "name": "Other", "catalog": "OTHER"},
                {"guid": "AG", "key": "A_GLOBAL", "name": "Global", "global": true}
            ],
            "brands": [
                {"guid": "B1", "code": "CANON", "name": "Canon", "catalog": "MASTER"},
                {"guid": "B2", "code": "NIKON", "name": "Nikon", "catalog": "MASTER"},
                {"guid": "B3", "code": "SONY", "name": "Sony", "catalog": "OTHER"}
            ],
            "category_types": [
                {"guid": "CT1", "name": "Cameras", "catalog": "MASTER", "attributes": ["A1"]}
            ],
            "product_types": [
                {"guid": "PT1", "name": "Camera", "catalog": "MASTER",
                 "attributes": ["A1"], "sku_attributes": ["A2"], "sku_options": ["O1"],
                 "multi_sku": true},
                {"guid": "PT2", "name": "Lens", "catalog": "MASTER"}
            ],
            "sku_options": [
                {"guid": "O1", "key": "COLOR", "catalog": "MASTER"},
                {"guid": "O2", "key": "SIZE", "catalog": "MASTER"}
            ],
            "synonym_groups": [
                {"guid": "SG1", "catalog": "MASTER", "concept": "camera", "locale": "en",
                 "synonyms": ["cam"]}
            ],
            "gift_certificates": [
                {"guid": "GC1", "code": "GC-001", "store_code": "SNAPITUP", "currency": "USD",
                 "purchase_amount": "50.00", "created": "2024-01-01T00:00:00Z"}
            ],
            "gift_certificate_transactions": [
                {"guid": "T2", "gift_certificate": "GC1", "transaction_type": "capture",
                 "amount": "10.00", "created": "2024-02-01T00:00:00Z"},
                {"guid": "T1", "gift_certificate": "GC1", "transaction_type": "authorize",
                 "amount": "10.00", "created": "2024-01-15T00:00:00Z"}
            ]
        }))
        .unwrap()
    }

    /// Context over [`snapshot`] with every dependency kind in `mode`
    pub fn context(mode: DependencyMode) -> ExportContext {
        let mut config = ExportConfig::default();
        config.dependencies.default = mode;
        let store = InMemoryCatalogStore::from_snapshot(snapshot()).unwrap();
        ExportContext::new(config, ExportQuery::default(), Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use crate::config::schema::DependencyMode;
    use crate::domain::Brand;
    use std::str::FromStr;

    fn guid(s: &str) -> Guid {
        Guid::from_str(s).unwrap()
    }

    #[test]
    fn test_ensure_primary() {
        assert!(ensure_primary("brand", JobType::Catalog, JobType::Catalog).is_ok());
        assert!(matches!(
            ensure_primary("brand", JobType::Catalog, JobType::Product),
            Err(CatexError::Export(_))
        ));
    }

    #[tokio::test]
    async fn test_master_catalog_resolution() {
        let ctx = context(DependencyMode::All);

        let master = master_catalog(&ctx, &guid("MASTER")).await.unwrap();
        assert_eq!(master.unwrap().as_str(), "MASTER");

        assert!(master_catalog(&ctx, &guid("VIRTUAL")).await.unwrap().is_none());
        assert!(master_catalog(&ctx, &guid("NOPE")).await.is_err());
    }

    #[tokio::test]
    async fn test_select_in_scope_drops_foreign_objects() {
        let mut ctx = context(DependencyMode::All);
        let master = CatalogCode::from_str("MASTER").unwrap();
        let brands = ctx.store().find_brands(&[guid("B1"), guid("B3")]).await.unwrap();

        let selected: Vec<Brand> =
            select_in_scope(&mut ctx, EntityKind::Brand, &master, brands, false);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].guid, guid("B1"));
        assert_eq!(ctx.summary().warnings.len(), 1);
        assert_eq!(ctx.summary().warnings[0].code, codes::FOREIGN_CATALOG_OBJECT);
    }

    #[tokio::test]
    async fn test_select_in_scope_filtered_keeps_referenced() {
        let mut ctx = context(DependencyMode::Referenced);
        let master = CatalogCode::from_str("MASTER").unwrap();
        ctx.registry_mut().register_kind(EntityKind::Brand);
        ctx.registry_mut().add_dependency(EntityKind::Brand, guid("B2"));
        let brands = ctx.store().find_catalog_brands(&master).await.unwrap();

        let selected: Vec<Brand> =
            select_in_scope(&mut ctx, EntityKind::Brand, &master, brands, true);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].guid, guid("B2"));
    }
}
