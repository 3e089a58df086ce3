//! Gift certificate exporter

use crate::core::dependent::GiftCertificateTransactionDependentExporter;
use crate::core::export::context::ExportContext;
use crate::core::export::exporter::{ExportSource, ExporterImpl};
use crate::core::transform::{DomainAdapter, GiftCertificateAdapter, GiftCertificateDto};
use crate::domain::ids::Guid;
use crate::domain::kinds::JobType;
use crate::domain::{GiftCertificate, Result};
use async_trait::async_trait;

/// Gift certificates of the queried stores
#[derive(Debug, Default)]
pub struct GiftCertificateSource {
    adapter: GiftCertificateAdapter,
}

#[async_trait]
impl ExportSource for GiftCertificateSource {
    type Entity = GiftCertificate;
    type Dto = GiftCertificateDto;

    fn job_type(&self) -> JobType {
        JobType::GiftCertificate
    }

    async fn list_exportable_ids(&self, ctx: &mut ExportContext) -> Result<Vec<Guid>> {
        ctx.store()
            .query_guids(JobType::GiftCertificate, ctx.query())
            .await
    }

    async fn find_by_ids(
        &self,
        ctx: &ExportContext,
        ids: &[Guid],
    ) -> Result<Vec<GiftCertificate>> {
        ctx.store().find_gift_certificates(ids).await
    }

    fn guid_of(&self, certificate: &GiftCertificate) -> Guid {
        certificate.guid.clone()
    }

    fn adapter(&self) -> &dyn DomainAdapter<Entity = GiftCertificate, Dto = GiftCertificateDto> {
        &self.adapter
    }
}

/// Gift certificate exporter with its transaction dependent
pub fn gift_certificate_exporter() -> ExporterImpl<GiftCertificateSource> {
    let mut exporter = ExporterImpl::new(GiftCertificateSource::default());
    exporter.add_dependent_exporter(Box::new(
        GiftCertificateTransactionDependentExporter::default(),
    ));
    exporter
}
