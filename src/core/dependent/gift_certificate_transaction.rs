//! Transactions of a gift certificate

use super::{ensure_primary, DependentExporter};
use crate::core::export::context::ExportContext;
use crate::core::transform::{
    DomainAdapter, GiftCertificateDto, GiftCertificateTransactionAdapter,
    GiftCertificateTransactionDto,
};
use crate::domain::ids::Guid;
use crate::domain::kinds::JobType;
use crate::domain::{GiftCertificateTransaction, Result};
use async_trait::async_trait;

/// Exports the transaction history of a gift certificate, oldest first
///
/// Transactions belong to exactly one certificate, so they are never
/// filtered.
#[derive(Debug, Default)]
pub struct GiftCertificateTransactionDependentExporter {
    adapter: GiftCertificateTransactionAdapter,
}

#[async_trait]
impl DependentExporter for GiftCertificateTransactionDependentExporter {
    type Entity = GiftCertificateTransaction;
    type Dto = GiftCertificateTransactionDto;
    type Primary = GiftCertificateDto;

    fn name(&self) -> &'static str {
        "gift_certificate_transaction"
    }

    async fn initialize(&mut self, _ctx: &mut ExportContext, primary_job: JobType) -> Result<()> {
        ensure_primary(self.name(), JobType::GiftCertificate, primary_job)
    }

    async fn find_dependent_objects(
        &self,
        ctx: &mut ExportContext,
        primary: &Guid,
    ) -> Result<Vec<GiftCertificateTransaction>> {
        ctx.store().find_gift_certificate_transactions(primary).await
    }

    fn adapter(
        &self,
    ) -> &dyn DomainAdapter<Entity = GiftCertificateTransaction, Dto = GiftCertificateTransactionDto>
    {
        &self.adapter
    }

    fn bind_with_primary_object(
        &self,
        dtos: Vec<GiftCertificateTransactionDto>,
        primary: &mut GiftCertificateDto,
    ) -> Result<()> {
        primary.transactions.extend(dtos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DependencyMode;
    use crate::core::dependent::test_support::context;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_transactions_oldest_first() {
        let mut ctx = context(DependencyMode::All);
        let exporter = GiftCertificateTransactionDependentExporter::default();

        let transactions = exporter
            .find_dependent_objects(&mut ctx, &Guid::from_str("GC1").unwrap())
            .await
            .unwrap();

        let guids: Vec<&str> = transactions.iter().map(|t| t.guid.as_str()).collect();
        assert_eq!(guids, vec!["T1", "T2"]);
    }

    #[tokio::test]
    async fn test_unknown_certificate_fails() {
        let mut ctx = context(DependencyMode::All);
        let exporter = GiftCertificateTransactionDependentExporter::default();

        let result = exporter
            .find_dependent_objects(&mut ctx, &Guid::from_str("NOPE").unwrap())
            .await;
        assert!(result.is_err());
    }
}
