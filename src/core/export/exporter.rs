//! Primary exporter driver
//!
//! [`ExporterImpl`] runs the export loop shared by every primary exporter:
//! list the IDs to export, walk them in chunks, and for each object register
//! its dependencies, adapt it, let the dependent exporters bind their objects
//! into it and write it to the sink. What varies per entity type lives in an
//! [`ExportSource`].
//!
//! Failures of a single object are recorded in the summary and the loop
//! moves on. Registry changes made for a failed object are rolled back, so
//! the bundle carries no dependencies of objects it does not contain. Whatever happens, the exporter reports itself finished once
//! [`Exporter::process_export`] returns.

use crate::adapters::bundle::ExportSink;
use crate::core::dependent::BoundDependentExporter;
use crate::core::export::context::ExportContext;
use crate::core::export::registry::DependencyRegistry;
use crate::core::export::summary::{codes, SummaryEntry};
use crate::core::transform::DomainAdapter;
use crate::domain::ids::Guid;
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{CatexError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Entity-specific part of a primary exporter
#[async_trait]
pub trait ExportSource: Send + Sync {
    /// Domain type of the exported objects
    type Entity: Send + Sync;
    /// DTO written to the bundle
    type Dto: Serialize + Send + Sync;

    /// Job type of this exporter
    fn job_type(&self) -> JobType;

    /// Kinds this exporter records in the dependency registry
    fn dependent_kinds(&self) -> Vec<EntityKind> {
        Vec::new()
    }

    /// Prepare for a job
    async fn initialize(&mut self, _ctx: &mut ExportContext) -> Result<()> {
        Ok(())
    }

    /// GUIDs of the objects to export, possibly with duplicates
    async fn list_exportable_ids(&self, ctx: &mut ExportContext) -> Result<Vec<Guid>>;

    /// Load the objects of one chunk
    async fn find_by_ids(&self, ctx: &ExportContext, ids: &[Guid]) -> Result<Vec<Self::Entity>>;

    /// GUID of a loaded object
    fn guid_of(&self, entity: &Self::Entity) -> Guid;

    /// Adapter building the DTO
    fn adapter(&self) -> &dyn DomainAdapter<Entity = Self::Entity, Dto = Self::Dto>;

    /// Record the objects `entity` references
    fn register_dependencies(&self, _registry: &mut DependencyRegistry, _entity: &Self::Entity) {}
}

/// Primary exporter as seen by the coordinator
#[async_trait]
pub trait Exporter: Send {
    /// Job type of this exporter
    fn job_type(&self) -> JobType;

    /// Kinds this exporter records in the dependency registry
    fn dependent_kinds(&self) -> Vec<EntityKind>;

    /// Prepare the exporter and its dependent exporters
    async fn initialize(&mut self, ctx: &mut ExportContext) -> Result<()>;

    /// Export every selected object to `sink`
    ///
    /// # Errors
    ///
    /// Returns an error only if the IDs to export cannot be listed. Failures
    /// of individual objects are recorded in the summary.
    async fn process_export(
        &mut self,
        ctx: &mut ExportContext,
        sink: &mut dyn ExportSink,
    ) -> Result<()>;

    /// Whether [`Exporter::process_export`] has run
    fn is_finished(&self) -> bool;
}

/// Remove repeated IDs in place, keeping the first occurrence of each
pub fn remove_duplicates<T: Eq + Hash + Clone>(ids: &mut Vec<T>) {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(id.clone()));
}

/// Failure of one primary object
struct ObjectFailure {
    code: &'static str,
    error: CatexError,
}

impl ObjectFailure {
    fn new(code: &'static str, error: CatexError) -> Self {
        Self { code, error }
    }
}

/// Export loop over an [`ExportSource`]
pub struct ExporterImpl<S: ExportSource> {
    source: S,
    dependents: Vec<Box<dyn BoundDependentExporter<S::Dto>>>,
    finished: bool,
}

impl<S: ExportSource> ExporterImpl<S> {
    /// Create an exporter without dependent exporters
    pub fn new(source: S) -> Self {
        Self {
            source,
            dependents: Vec::new(),
            finished: false,
        }
    }

    /// Replace the dependent exporters
    pub fn set_dependent_exporters(
        &mut self,
        dependents: Vec<Box<dyn BoundDependentExporter<S::Dto>>>,
    ) {
        self.dependents = dependents;
    }

    /// Append a dependent exporter; dependents run in the order added
    pub fn add_dependent_exporter(&mut self, dependent: Box<dyn BoundDependentExporter<S::Dto>>) {
        self.dependents.push(dependent);
    }

    /// Current dependent exporters
    pub fn dependent_exporters(&self) -> &[Box<dyn BoundDependentExporter<S::Dto>>] {
        &self.dependents
    }

    /// The entity-specific source
    pub fn source(&self) -> &S {
        &self.source
    }

    async fn export_all(&self, ctx: &mut ExportContext, sink: &mut dyn ExportSink) -> Result<()> {
        let job_type = self.source.job_type();
        let mut ids = self.source.list_exportable_ids(ctx).await?;
        let listed = ids.len();
        remove_duplicates(&mut ids);

        tracing::info!(
            job_type = %job_type,
            listed = listed,
            unique = ids.len(),
            dependents = self.dependents.len(),
            "Starting exporter"
        );

        let batch_size = ctx.batch_size().max(1);
        for (index, chunk) in ids.chunks(batch_size).enumerate() {
            if ctx.is_shutdown_requested() {
                tracing::warn!(
                    job_type = %job_type,
                    chunk = index,
                    "Shutdown requested, stopping exporter"
                );
                ctx.summary_mut().interrupted = true;
                break;
            }

            crate::log_chunk_processing!(job_type, index * batch_size, ids.len());
            self.export_chunk(ctx, sink, chunk).await;
        }

        tracing::info!(
            job_type = %job_type,
            exported = ctx.summary().counter(job_type),
            failures = ctx.summary().failures_for(job_type).count(),
            "Exporter finished"
        );

        Ok(())
    }

    async fn export_chunk(
        &self,
        ctx: &mut ExportContext,
        sink: &mut dyn ExportSink,
        chunk: &[Guid],
    ) {
        let job_type = self.source.job_type();

        let entities = match self.source.find_by_ids(ctx, chunk).await {
            Ok(entities) => entities,
            Err(e) => {
                tracing::error!(
                    job_type = %job_type,
                    size = chunk.len(),
                    error = %e,
                    "Failed to fetch chunk"
                );
                for guid in chunk {
                    ctx.summary_mut().add_failure(
                        SummaryEntry::new(codes::FETCH_FAILED, format!("Failed to fetch: {e}"))
                            .with_job_type(job_type)
                            .with_guid(guid.clone()),
                    );
                }
                return;
            }
        };

        let found: HashSet<Guid> = entities.iter().map(|e| self.source.guid_of(e)).collect();
        for guid in chunk.iter().filter(|guid| !found.contains(*guid)) {
            tracing::warn!(job_type = %job_type, guid = %guid, "Object not found");
            ctx.summary_mut().add_warning(
                SummaryEntry::new(codes::OBJECT_NOT_FOUND, format!("{job_type} {guid} not found"))
                    .with_job_type(job_type)
                    .with_guid(guid.clone()),
            );
        }

        for entity in &entities {
            let guid = self.source.guid_of(entity);
            ctx.registry_mut().begin_object();
            match self.export_object(ctx, sink, &guid, entity).await {
                Ok(()) => {
                    ctx.registry_mut().commit_object();
                    ctx.summary_mut().add_to_counter(job_type, 1);
                }
                Err(failure) => {
                    ctx.registry_mut().rollback_object();
                    tracing::error!(
                        job_type = %job_type,
                        guid = %guid,
                        code = failure.code,
                        error = %failure.error,
                        "Failed to export object"
                    );
                    ctx.summary_mut().add_failure(
                        SummaryEntry::new(failure.code, failure.error.to_string())
                            .with_job_type(job_type)
                            .with_guid(guid),
                    );
                }
            }
        }
    }

    async fn export_object(
        &self,
        ctx: &mut ExportContext,
        sink: &mut dyn ExportSink,
        guid: &Guid,
        entity: &S::Entity,
    ) -> std::result::Result<(), ObjectFailure> {
        let job_type = self.source.job_type();

        self.source.register_dependencies(ctx.registry_mut(), entity);

        let mut dto = self
            .source
            .adapter()
            .populate_dto(entity)
            .map_err(|e| ObjectFailure::new(codes::OBJECT_EXPORT_FAILED, e))?;

        for dependent in &self.dependents {
            dependent
                .export_dependents(ctx, guid, &mut dto)
                .await
                .map_err(|e| {
                    ObjectFailure::new(
                        codes::DEPENDENT_EXPORT_FAILED,
                        CatexError::Export(format!("{} dependents: {e}", dependent.name())),
                    )
                })?;
        }

        let document = serde_json::to_value(&dto)
            .map_err(|e| ObjectFailure::new(codes::OBJECT_EXPORT_FAILED, e.into()))?;

        sink.write(job_type, guid, document)
            .await
            .map_err(|e| ObjectFailure::new(codes::OBJECT_EXPORT_FAILED, e))
    }
}

#[async_trait]
impl<S: ExportSource> Exporter for ExporterImpl<S> {
    fn job_type(&self) -> JobType {
        self.source.job_type()
    }

    fn dependent_kinds(&self) -> Vec<EntityKind> {
        self.source.dependent_kinds()
    }

    async fn initialize(&mut self, ctx: &mut ExportContext) -> Result<()> {
        let job_type = self.source.job_type();

        for kind in self.source.dependent_kinds() {
            ctx.registry_mut().register_kind(kind);
        }

        self.source.initialize(ctx).await?;

        for dependent in &mut self.dependents {
            dependent.initialize(ctx, job_type).await?;
        }

        tracing::debug!(
            job_type = %job_type,
            dependents = self.dependents.len(),
            "Initialized exporter"
        );

        Ok(())
    }

    async fn process_export(
        &mut self,
        ctx: &mut ExportContext,
        sink: &mut dyn ExportSink,
    ) -> Result<()> {
        let result = self.export_all(ctx, sink).await;
        self.finished = true;
        result
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bundle::MemorySink;
    use crate::adapters::store::{ExportQuery, InMemoryCatalogStore, StoreSnapshot};
    use crate::config::schema::ExportConfig;
    use crate::core::dependent::DependentExporter;
    use serde::Serialize;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn guid(s: &str) -> Guid {
        Guid::from_str(s).unwrap()
    }

    fn context(batch_size: usize) -> ExportContext {
        let config = ExportConfig {
            batch_size,
            ..Default::default()
        };
        let store = InMemoryCatalogStore::from_snapshot(StoreSnapshot::default()).unwrap();
        ExportContext::new(config, ExportQuery::default(), Arc::new(store))
    }

    #[derive(Debug, Clone)]
    struct Item {
        guid: Guid,
        name: String,
    }

    #[derive(Debug, Serialize)]
    struct ItemDto {
        guid: Guid,
        name: String,
        children: Vec<String>,
    }

    struct ItemAdapter;

    impl DomainAdapter for ItemAdapter {
        type Entity = Item;
        type Dto = ItemDto;

        fn populate_dto(&self, item: &Item) -> Result<ItemDto> {
            if item.name == "broken" {
                return Err(CatexError::Adapter(format!("{} is broken", item.guid)));
            }
            Ok(ItemDto {
                guid: item.guid.clone(),
                name: item.name.clone(),
                children: Vec::new(),
            })
        }
    }

    #[derive(Default)]
    struct ItemSource {
        ids: Vec<Guid>,
        items: HashMap<Guid, Item>,
        failing_chunk_member: Option<Guid>,
        fail_listing: bool,
        fetches: AtomicUsize,
    }

    impl ItemSource {
        fn with_items(names: &[(&str, &str)]) -> Self {
            let items: HashMap<Guid, Item> = names
                .iter()
                .map(|(g, n)| {
                    (
                        guid(g),
                        Item {
                            guid: guid(g),
                            name: n.to_string(),
                        },
                    )
                })
                .collect();
            Self {
                ids: names.iter().map(|(g, _)| guid(g)).collect(),
                items,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ExportSource for ItemSource {
        type Entity = Item;
        type Dto = ItemDto;

        fn job_type(&self) -> JobType {
            JobType::Product
        }

        fn dependent_kinds(&self) -> Vec<EntityKind> {
            vec![EntityKind::Brand]
        }

        async fn list_exportable_ids(&self, _ctx: &mut ExportContext) -> Result<Vec<Guid>> {
            if self.fail_listing {
                return Err(CatexError::Export("listing failed".to_string()));
            }
            Ok(self.ids.clone())
        }

        async fn find_by_ids(&self, _ctx: &ExportContext, ids: &[Guid]) -> Result<Vec<Item>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(member) = &self.failing_chunk_member {
                if ids.contains(member) {
                    return Err(CatexError::Export("store unavailable".to_string()));
                }
            }
            Ok(ids.iter().filter_map(|id| self.items.get(id).cloned()).collect())
        }

        fn guid_of(&self, item: &Item) -> Guid {
            item.guid.clone()
        }

        fn adapter(&self) -> &dyn DomainAdapter<Entity = Item, Dto = ItemDto> {
            &ItemAdapter
        }

        fn register_dependencies(&self, registry: &mut DependencyRegistry, item: &Item) {
            registry.add_dependency(EntityKind::Brand, guid(&format!("BRAND-{}", item.guid)));
        }
    }

    struct StringAdapter;

    impl DomainAdapter for StringAdapter {
        type Entity = String;
        type Dto = String;

        fn populate_dto(&self, value: &String) -> Result<String> {
            Ok(value.to_uppercase())
        }
    }

    #[derive(Clone, Default)]
    struct Calls {
        initialized: Arc<AtomicUsize>,
        found: Arc<AtomicUsize>,
        bound: Arc<AtomicUsize>,
    }

    struct ChildExporter {
        label: &'static str,
        calls: Calls,
        fail_for: Option<Guid>,
    }

    impl ChildExporter {
        fn new(label: &'static str, calls: &Calls) -> Self {
            Self {
                label,
                calls: calls.clone(),
                fail_for: None,
            }
        }
    }

    #[async_trait]
    impl DependentExporter for ChildExporter {
        type Entity = String;
        type Dto = String;
        type Primary = ItemDto;

        fn name(&self) -> &'static str {
            self.label
        }

        async fn initialize(&mut self, _ctx: &mut ExportContext, _job: JobType) -> Result<()> {
            self.calls.initialized.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn find_dependent_objects(
            &self,
            _ctx: &mut ExportContext,
            primary: &Guid,
        ) -> Result<Vec<String>> {
            self.calls.found.fetch_add(1, Ordering::SeqCst);
            if self.fail_for.as_ref() == Some(primary) {
                return Err(CatexError::Export("lookup failed".to_string()));
            }
            Ok(vec![format!("{}-{}", self.label, primary)])
        }

        fn adapter(&self) -> &dyn DomainAdapter<Entity = String, Dto = String> {
            &StringAdapter
        }

        fn bind_with_primary_object(&self, dtos: Vec<String>, primary: &mut ItemDto) -> Result<()> {
            self.calls.bound.fetch_add(1, Ordering::SeqCst);
            primary.children.extend(dtos);
            Ok(())
        }
    }

    #[test]
    fn test_remove_duplicates_keeps_first_occurrence() {
        let mut numbers: Vec<i64> = vec![3, 1, 3, 2, 1, 4];
        remove_duplicates(&mut numbers);
        assert_eq!(numbers, vec![3, 1, 2, 4]);

        let mut strings = vec!["b", "a", "b", "c", "a"];
        remove_duplicates(&mut strings);
        assert_eq!(strings, vec!["b", "a", "c"]);

        let mut empty: Vec<Guid> = Vec::new();
        remove_duplicates(&mut empty);
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_set_dependent_exporters_initializes_all() {
        let calls = Calls::default();
        let mut exporter = ExporterImpl::new(ItemSource::default());
        exporter.set_dependent_exporters(vec![
            Box::new(ChildExporter::new("one", &calls)),
            Box::new(ChildExporter::new("two", &calls)),
        ]);

        let mut ctx = context(10);
        exporter.initialize(&mut ctx).await.unwrap();

        assert_eq!(calls.initialized.load(Ordering::SeqCst), 2);
        assert!(ctx.registry().is_registered(EntityKind::Brand));
    }

    #[tokio::test]
    async fn test_add_dependent_exporter_initializes_added() {
        let calls = Calls::default();
        let mut exporter = ExporterImpl::new(ItemSource::default());
        exporter.add_dependent_exporter(Box::new(ChildExporter::new("one", &calls)));

        let mut ctx = context(10);
        exporter.initialize(&mut ctx).await.unwrap();

        assert_eq!(calls.initialized.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_after_add_discards_added() {
        let added = Calls::default();
        let replaced = Calls::default();
        let mut exporter = ExporterImpl::new(ItemSource::default());
        exporter.add_dependent_exporter(Box::new(ChildExporter::new("added", &added)));
        exporter.set_dependent_exporters(vec![Box::new(ChildExporter::new("set", &replaced))]);

        let mut ctx = context(10);
        exporter.initialize(&mut ctx).await.unwrap();

        assert_eq!(added.initialized.load(Ordering::SeqCst), 0);
        assert_eq!(replaced.initialized.load(Ordering::SeqCst), 1);
        assert_eq!(exporter.dependent_exporters().len(), 1);
        assert_eq!(exporter.dependent_exporters()[0].name(), "set");
    }

    #[tokio::test]
    async fn test_export_with_dependents() {
        let calls = Calls::default();
        let mut exporter =
            ExporterImpl::new(ItemSource::with_items(&[("P1", "camera"), ("P2", "lens")]));
        exporter.add_dependent_exporter(Box::new(ChildExporter::new("sku", &calls)));

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        exporter.initialize(&mut ctx).await.unwrap();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert!(exporter.is_finished());
        assert_eq!(calls.found.load(Ordering::SeqCst), 2);
        assert_eq!(calls.bound.load(Ordering::SeqCst), 2);
        assert_eq!(ctx.summary().counter(JobType::Product), 2);
        assert_eq!(sink.guids(JobType::Product), &[guid("P1"), guid("P2")]);
        assert_eq!(sink.documents(JobType::Product)[0]["children"][0], "SKU-P1");
        assert_eq!(
            ctx.registry().dependent_guids(EntityKind::Brand),
            vec![guid("BRAND-P1"), guid("BRAND-P2")]
        );
    }

    #[tokio::test]
    async fn test_duplicate_ids_exported_once() {
        let mut source = ItemSource::with_items(&[("P1", "camera"), ("P2", "lens")]);
        source.ids = vec![guid("P2"), guid("P1"), guid("P2")];
        let mut exporter = ExporterImpl::new(source);

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert_eq!(sink.guids(JobType::Product), &[guid("P2"), guid("P1")]);
    }

    #[tokio::test]
    async fn test_finished_even_when_listing_fails() {
        let source = ItemSource {
            fail_listing: true,
            ..Default::default()
        };
        let mut exporter = ExporterImpl::new(source);
        assert!(!exporter.is_finished());

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        let result = exporter.process_export(&mut ctx, &mut sink).await;

        assert!(result.is_err());
        assert!(exporter.is_finished());
    }

    #[tokio::test]
    async fn test_object_failure_does_not_stop_export() {
        let mut exporter = ExporterImpl::new(ItemSource::with_items(&[
            ("P1", "camera"),
            ("P2", "broken"),
            ("P3", "lens"),
        ]));

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert!(exporter.is_finished());
        assert_eq!(ctx.summary().counter(JobType::Product), 2);
        assert_eq!(ctx.summary().failures.len(), 1);
        assert_eq!(ctx.summary().failures[0].code, codes::OBJECT_EXPORT_FAILED);
        assert_eq!(ctx.summary().failures[0].guid, Some(guid("P2")));
    }

    #[tokio::test]
    async fn test_dependent_failure_recorded_per_object() {
        let calls = Calls::default();
        let mut child = ChildExporter::new("sku", &calls);
        child.fail_for = Some(guid("P1"));
        let mut exporter =
            ExporterImpl::new(ItemSource::with_items(&[("P1", "camera"), ("P2", "lens")]));
        exporter.add_dependent_exporter(Box::new(child));

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert_eq!(ctx.summary().counter(JobType::Product), 1);
        assert_eq!(ctx.summary().failures[0].code, codes::DEPENDENT_EXPORT_FAILED);
        assert_eq!(sink.guids(JobType::Product), &[guid("P2")]);
    }

    #[tokio::test]
    async fn test_failed_objects_leave_no_dependencies() {
        let calls = Calls::default();
        let mut child = ChildExporter::new("sku", &calls);
        child.fail_for = Some(guid("P3"));
        let mut exporter = ExporterImpl::new(ItemSource::with_items(&[
            ("P1", "camera"),
            ("P2", "broken"),
            ("P3", "lens"),
        ]));
        exporter.add_dependent_exporter(Box::new(child));

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        exporter.initialize(&mut ctx).await.unwrap();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert_eq!(ctx.summary().failures.len(), 2);
        assert_eq!(
            ctx.registry().dependent_guids(EntityKind::Brand),
            vec![guid("BRAND-P1")]
        );
    }

    #[tokio::test]
    async fn test_chunk_fetch_failure_records_every_id() {
        let mut source = ItemSource::with_items(&[
            ("P1", "a"),
            ("P2", "b"),
            ("P3", "c"),
            ("P4", "d"),
            ("P5", "e"),
        ]);
        source.failing_chunk_member = Some(guid("P3"));
        let mut exporter = ExporterImpl::new(source);

        let mut ctx = context(2);
        let mut sink = MemorySink::new();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert_eq!(exporter.source().fetches.load(Ordering::SeqCst), 3);
        assert_eq!(ctx.summary().counter(JobType::Product), 3);
        let failed: Vec<Option<Guid>> =
            ctx.summary().failures.iter().map(|f| f.guid.clone()).collect();
        assert_eq!(failed, vec![Some(guid("P3")), Some(guid("P4"))]);
        assert!(ctx
            .summary()
            .failures
            .iter()
            .all(|f| f.code == codes::FETCH_FAILED));
    }

    #[tokio::test]
    async fn test_missing_objects_are_warnings() {
        let mut source = ItemSource::with_items(&[("P1", "camera")]);
        source.ids.push(guid("GONE"));
        let mut exporter = ExporterImpl::new(source);

        let mut ctx = context(10);
        let mut sink = MemorySink::new();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert_eq!(ctx.summary().counter(JobType::Product), 1);
        assert!(ctx.summary().failures.is_empty());
        assert_eq!(ctx.summary().warnings[0].code, codes::OBJECT_NOT_FOUND);
        assert_eq!(ctx.summary().warnings[0].guid, Some(guid("GONE")));
    }

    #[tokio::test]
    async fn test_shutdown_stops_between_chunks() {
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let mut exporter =
            ExporterImpl::new(ItemSource::with_items(&[("P1", "a"), ("P2", "b")]));

        let mut ctx = context(1).with_shutdown(shutdown_rx);
        shutdown_tx.send(true).unwrap();
        let mut sink = MemorySink::new();
        exporter.process_export(&mut ctx, &mut sink).await.unwrap();

        assert!(exporter.is_finished());
        assert!(ctx.summary().interrupted);
        assert_eq!(ctx.summary().counter(JobType::Product), 0);
    }
}
