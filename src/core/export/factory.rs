//! Exporter sequence
//!
//! A job runs its exporters one after another. Exporters that only emit
//! dependencies run after the exporters that register them, which the job
//! type rank guarantees: products, then gift certificates, then categories,
//! then catalogs.

use crate::core::export::exporter::Exporter;
use crate::core::exporters::{
    catalog_exporter, category_exporter, gift_certificate_exporter, product_exporter,
};
use crate::domain::kinds::JobType;
use std::collections::BTreeMap;

/// Builds exporters and the order they run in
#[derive(Debug, Clone, Copy, Default)]
pub struct ExporterFactory;

impl ExporterFactory {
    /// Create the exporter of a job type
    ///
    /// A `primary` exporter exports the objects selected by the query; a
    /// non-primary one only exports what earlier exporters registered.
    pub fn create_exporter(&self, job_type: JobType, primary: bool) -> Box<dyn Exporter> {
        match job_type {
            JobType::Product => Box::new(product_exporter()),
            JobType::GiftCertificate => Box::new(gift_certificate_exporter()),
            JobType::Category => Box::new(category_exporter(primary)),
            JobType::Catalog => Box::new(catalog_exporter(primary)),
        }
    }

    /// Job types to run for the configured primaries, in run order
    ///
    /// Each entry says whether the job type was configured. Job types owning
    /// a kind some planned exporter registers are added as non-primary.
    pub fn plan(&self, job_types: &[JobType]) -> Vec<(JobType, bool)> {
        let mut planned: BTreeMap<JobType, bool> =
            job_types.iter().map(|job_type| (*job_type, true)).collect();
        let mut pending: Vec<JobType> = planned.keys().copied().collect();

        while let Some(job_type) = pending.pop() {
            for kind in self.create_exporter(job_type, true).dependent_kinds() {
                let owner = kind.owning_job();
                if owner != job_type && !planned.contains_key(&owner) {
                    planned.insert(owner, false);
                    pending.push(owner);
                }
            }
        }

        let mut plan: Vec<(JobType, bool)> = planned.into_iter().collect();
        plan.sort_by_key(|(job_type, _)| job_type.rank());
        plan
    }

    /// Exporters to run for the configured primaries, in run order
    pub fn sequence(&self, job_types: &[JobType]) -> Vec<Box<dyn Exporter>> {
        self.plan(job_types)
            .into_iter()
            .map(|(job_type, primary)| {
                tracing::debug!(job_type = %job_type, primary = primary, "Planned exporter");
                self.create_exporter(job_type, primary)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[JobType::Product], &[(JobType::Product, true), (JobType::Category, false), (JobType::Catalog, false)] ; "product pulls categories and catalogs")]
    #[test_case(&[JobType::Category], &[(JobType::Category, true), (JobType::Catalog, false)] ; "category pulls catalogs")]
    #[test_case(&[JobType::Catalog], &[(JobType::Catalog, true)] ; "catalog alone")]
    #[test_case(&[JobType::GiftCertificate], &[(JobType::GiftCertificate, true)] ; "gift certificates alone")]
    #[test_case(&[JobType::Catalog, JobType::Product, JobType::Catalog], &[(JobType::Product, true), (JobType::Category, false), (JobType::Catalog, true)] ; "configured order and duplicates ignored")]
    fn test_plan(job_types: &[JobType], expected: &[(JobType, bool)]) {
        assert_eq!(ExporterFactory.plan(job_types), expected.to_vec());
    }

    #[test]
    fn test_sequence_runs_in_rank_order() {
        let sequence = ExporterFactory.sequence(&[JobType::Catalog, JobType::GiftCertificate]);
        let job_types: Vec<JobType> = sequence.iter().map(|e| e.job_type()).collect();
        assert_eq!(job_types, vec![JobType::GiftCertificate, JobType::Catalog]);
        assert!(sequence.iter().all(|e| !e.is_finished()));
    }
}
