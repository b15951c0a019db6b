use super::banking::{check_banking, BankingCheck};
use super::dispatcher::{ValidationEngine, ValidationReport};
use super::registry::DocumentType;
use super::status::ValidationStatus;
use super::value::FieldMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DossierError {
    #[error("validation requires a commercial invoice as the source of truth")]
    MissingSourceOfTruth,
    #[error("failed to read dossier: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dossier: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extracted field mappings for every document uploaded for one shipment.
///
/// A `null` slot stands for a document whose extraction failed; it is
/// skipped like a document that was never uploaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentDossier {
    documents: BTreeMap<DocumentType, Option<FieldMap>>,
}

impl ShipmentDossier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DossierError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DossierError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn insert(&mut self, document: DocumentType, fields: FieldMap) {
        self.documents.insert(document, Some(fields));
    }

    /// Stores a primary extraction with its null fields filled from a
    /// fallback extraction of the same document.
    pub fn insert_consolidated(
        &mut self,
        document: DocumentType,
        primary: Option<FieldMap>,
        fallback: Option<FieldMap>,
    ) {
        let consolidated = match (primary, fallback) {
            (Some(primary), Some(fallback)) => Some(primary.patched_with(&fallback)),
            (primary, fallback) => primary.or(fallback),
        };
        self.documents.insert(document, consolidated);
    }

    pub fn document(&self, document: DocumentType) -> Option<&FieldMap> {
        self.documents.get(&document).and_then(Option::as_ref)
    }

    pub fn source_of_truth(&self) -> Option<&FieldMap> {
        self.document(DocumentType::CommercialInvoice)
    }

    /// Documents to compare against the invoice, in slot order.
    pub fn targets(&self) -> impl Iterator<Item = (DocumentType, &FieldMap)> {
        self.documents
            .iter()
            .filter(|(document, _)| !document.is_source_of_truth())
            .filter_map(|(document, fields)| fields.as_ref().map(|fields| (*document, fields)))
    }
}

/// A failing field in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DossierIssue {
    pub document: DocumentType,
    pub field: String,
    pub status: ValidationStatus,
}

/// Everything produced for a dossier: the at-a-glance matrix, the detailed
/// report per document and the banking check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DossierOutcome {
    pub summary: FieldMap<BTreeMap<DocumentType, ValidationStatus>>,
    pub reports: BTreeMap<DocumentType, ValidationReport>,
    pub banking: BankingCheck,
}

impl DossierOutcome {
    pub fn documents(&self) -> impl Iterator<Item = DocumentType> + '_ {
        self.reports.keys().copied()
    }

    pub fn issues(&self) -> Vec<DossierIssue> {
        self.reports
            .iter()
            .flat_map(|(document, report)| {
                report
                    .iter()
                    .filter(|(_, result)| result.status.is_issue())
                    .map(|(field, result)| DossierIssue {
                        document: *document,
                        field: field.to_string(),
                        status: result.status,
                    })
            })
            .collect()
    }
}

impl ValidationEngine {
    pub fn validate_dossier(
        &self,
        dossier: &ShipmentDossier,
    ) -> Result<DossierOutcome, DossierError> {
        let source = dossier
            .source_of_truth()
            .ok_or(DossierError::MissingSourceOfTruth)?;

        let mut summary: FieldMap<BTreeMap<DocumentType, ValidationStatus>> = source
            .keys()
            .map(|field| (field, BTreeMap::new()))
            .collect();
        let mut reports = BTreeMap::new();

        for (document, target) in dossier.targets() {
            let report = self.validate(source, target, document.tag());
            for (field, result) in report.iter() {
                if let Some(row) = summary.get_mut(field) {
                    row.insert(document, result.status);
                }
            }
            info!(
                document = document.tag(),
                fields = report.len(),
                issues = report.iter().filter(|(_, result)| result.status.is_issue()).count(),
                "document validated against commercial invoice"
            );
            reports.insert(document, report);
        }

        if reports.is_empty() {
            warn!("only a commercial invoice was provided; no documents to validate");
        }

        Ok(DossierOutcome {
            summary,
            reports,
            banking: check_banking(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::registry::fields::*;
    use crate::validation::value::FieldValue;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(key, value)| (*key, FieldValue::from(*value)))
            .collect()
    }

    #[test]
    fn dossier_requires_commercial_invoice() {
        let mut dossier = ShipmentDossier::new();
        dossier.insert(DocumentType::PackingList, fields(&[(VOYAGE, "1")]));

        let err = ValidationEngine::default()
            .validate_dossier(&dossier)
            .expect_err("no source of truth");
        assert!(matches!(err, DossierError::MissingSourceOfTruth));
    }

    #[test]
    fn invoice_only_dossier_still_runs_banking_check() {
        let mut dossier = ShipmentDossier::new();
        dossier.insert(
            DocumentType::CommercialInvoice,
            fields(&[(BANKING_DETAILS, "USD account"), (TOTAL_VALUE, "$5.00")]),
        );

        let outcome = ValidationEngine::default()
            .validate_dossier(&dossier)
            .expect("dossier validates");

        assert!(outcome.reports.is_empty());
        assert_eq!(
            outcome.banking.status,
            crate::validation::banking::BankingCheckStatus::Match
        );
        assert!(outcome
            .summary
            .iter()
            .all(|(_, row)| row.is_empty()));
    }

    #[test]
    fn summary_matrix_has_one_column_per_target() {
        let mut dossier = ShipmentDossier::new();
        dossier.insert(
            DocumentType::CommercialInvoice,
            fields(&[(VOYAGE, "412N"), (TOTAL_CARTONS, "10")]),
        );
        dossier.insert(DocumentType::Eur1, fields(&[(VOYAGE, "412N")]));
        dossier.insert(DocumentType::PackingList, fields(&[(TOTAL_CARTONS, "11")]));

        let outcome = ValidationEngine::default()
            .validate_dossier(&dossier)
            .expect("dossier validates");

        let documents: Vec<DocumentType> = outcome.documents().collect();
        assert_eq!(documents, vec![DocumentType::PackingList, DocumentType::Eur1]);

        let voyage = outcome.summary.get(VOYAGE).expect("voyage row");
        assert_eq!(
            voyage.get(&DocumentType::Eur1),
            Some(&ValidationStatus::MatchedContentOnly)
        );
        assert_eq!(
            voyage.get(&DocumentType::PackingList),
            Some(&ValidationStatus::NotApplicable)
        );

        let issues = outcome.issues();
        assert_eq!(
            issues,
            vec![
                DossierIssue {
                    document: DocumentType::PackingList,
                    field: TOTAL_CARTONS.to_string(),
                    status: ValidationStatus::DoesNotMatch,
                },
                DossierIssue {
                    document: DocumentType::Eur1,
                    field: TOTAL_CARTONS.to_string(),
                    status: ValidationStatus::MissingRequiredField,
                },
            ]
        );
    }

    #[test]
    fn consolidation_prefers_primary_extraction() {
        let mut primary = fields(&[(VOYAGE, "412N")]);
        primary.insert(VESSEL_NAME, FieldValue::Null);
        let fallback = fields(&[(VOYAGE, "999"), (VESSEL_NAME, "MSC ANNA")]);

        let mut dossier = ShipmentDossier::new();
        dossier.insert_consolidated(DocumentType::BillOfLading, Some(primary), Some(fallback));
        dossier.insert_consolidated(DocumentType::Ppecb, None, None);

        let bol = dossier
            .document(DocumentType::BillOfLading)
            .expect("bill of lading stored");
        assert_eq!(bol.value(VOYAGE), &FieldValue::from("412N"));
        assert_eq!(bol.value(VESSEL_NAME), &FieldValue::from("MSC ANNA"));
        assert!(dossier.document(DocumentType::Ppecb).is_none());
        assert_eq!(dossier.targets().count(), 1);
    }

    #[test]
    fn dossier_json_accepts_null_slots() {
        let dossier = ShipmentDossier::from_reader(
            r#"{"commercial_invoice": {"voyage": "1"}, "phyto_certificate": null}"#.as_bytes(),
        )
        .expect("dossier parses");
        assert!(dossier.source_of_truth().is_some());
        assert_eq!(dossier.targets().count(), 0);

        assert!(ShipmentDossier::from_reader(r#"{"air_waybill": {}}"#.as_bytes()).is_err());
    }
}
