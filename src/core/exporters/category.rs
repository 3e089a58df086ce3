//! Category exporter

use crate::adapters::store::CatalogStore;
use crate::core::dependent::LinkedCategoryDependentExporter;
use crate::core::export::context::ExportContext;
use crate::core::export::exporter::{ExportSource, ExporterImpl};
use crate::core::export::registry::DependencyRegistry;
use crate::core::export::summary::{codes, SummaryEntry};
use crate::core::transform::{CategoryAdapter, CategoryDto, DomainAdapter};
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{Category, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Categories selected by the query or referenced by earlier exporters
///
/// The selection is closed over parents: every ancestor of a selected
/// category is exported too, always before its children. A category linked
/// from a master category is preceded by the master category's lineage. A
/// category whose hierarchy is broken is exported alone and recorded as a
/// failure.
#[derive(Debug, Default)]
pub struct CategorySource {
    primary: bool,
    adapter: CategoryAdapter,
}

impl CategorySource {
    /// Create a source; `primary` sources also export the queried categories
    pub fn new(primary: bool) -> Self {
        Self {
            primary,
            adapter: CategoryAdapter,
        }
    }
}

/// `guid` preceded by its ancestors, root first
async fn lineage(store: &dyn CatalogStore, guid: &Guid) -> Result<Vec<Guid>> {
    let mut chain: Vec<Guid> = store
        .find_category_ancestors(guid)
        .await?
        .into_iter()
        .rev()
        .map(|category| category.guid)
        .collect();
    chain.push(guid.clone());
    Ok(chain)
}

/// Lineage of `guid`, or `guid` alone if its ancestors cannot be resolved
///
/// A broken hierarchy is recorded as a failure of that category only.
async fn lineage_or_self(
    ctx: &mut ExportContext,
    store: &dyn CatalogStore,
    guid: &Guid,
) -> Vec<Guid> {
    match lineage(store, guid).await {
        Ok(chain) => chain,
        Err(e) => {
            tracing::error!(guid = %guid, error = %e, "Failed to resolve category ancestors");
            ctx.summary_mut().add_failure(
                SummaryEntry::new(codes::FETCH_FAILED, format!("Failed to resolve ancestors: {e}"))
                    .with_job_type(JobType::Category)
                    .with_guid(guid.clone()),
            );
            vec![guid.clone()]
        }
    }
}

#[async_trait]
impl ExportSource for CategorySource {
    type Entity = Category;
    type Dto = CategoryDto;

    fn job_type(&self) -> JobType {
        JobType::Category
    }

    fn dependent_kinds(&self) -> Vec<EntityKind> {
        vec![
            EntityKind::Catalog,
            EntityKind::CategoryType,
            EntityKind::Attribute,
        ]
    }

    async fn list_exportable_ids(&self, ctx: &mut ExportContext) -> Result<Vec<Guid>> {
        let store = Arc::clone(ctx.store());
        let mut selected = if self.primary {
            store.query_guids(JobType::Category, ctx.query()).await?
        } else {
            Vec::new()
        };
        selected.extend(ctx.registry().dependent_guids(EntityKind::Category));

        let mut ids = Vec::with_capacity(selected.len());
        for guid in &selected {
            let linked_from = store
                .find_categories(std::slice::from_ref(guid))
                .await?
                .into_iter()
                .next()
                .and_then(|category| category.linked_from);
            if let Some(master) = linked_from {
                ids.extend(lineage_or_self(ctx, store.as_ref(), &master).await);
            }
            ids.extend(lineage_or_self(ctx, store.as_ref(), guid).await);
        }

        tracing::debug!(
            selected = selected.len(),
            expanded = ids.len(),
            "Expanded category selection with ancestors"
        );

        Ok(ids)
    }

    async fn find_by_ids(&self, ctx: &ExportContext, ids: &[Guid]) -> Result<Vec<Category>> {
        ctx.store().find_categories(ids).await
    }

    fn guid_of(&self, category: &Category) -> Guid {
        category.guid.clone()
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = Category, Dto = CategoryDto> {
        &self.adapter
    }

    fn register_dependencies(&self, registry: &mut DependencyRegistry, category: &Category) {
        registry.add_dependency(EntityKind::Catalog, category.catalog.to_guid());
        if let Some(category_type) = &category.category_type {
            registry.add_dependency(EntityKind::CategoryType, category_type.clone());
        }
        registry.add_dependencies(
            EntityKind::Attribute,
            category
                .attribute_values
                .iter()
                .map(|value| value.attribute.clone()),
        );
    }
}

/// Category exporter with its linked category dependent
pub fn category_exporter(primary: bool) -> ExporterImpl<CategorySource> {
    let mut exporter = ExporterImpl::new(CategorySource::new(primary));
    exporter.add_dependent_exporter(Box::new(LinkedCategoryDependentExporter::default()));
    exporter
}
