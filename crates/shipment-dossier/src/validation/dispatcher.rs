use super::registry::FieldRegistry;
use super::status::{FieldResult, FieldVerdict, ValidationStatus};
use super::validators;
use super::value::{FieldMap, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Per-field results for one target document, in source-of-truth order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    fields: FieldMap<FieldResult>,
}

impl ValidationReport {
    pub fn get(&self, field: &str) -> Option<&FieldResult> {
        self.fields.get(field)
    }

    pub fn status(&self, field: &str) -> Option<ValidationStatus> {
        self.get(field).map(|result| result.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldResult)> {
        self.fields.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn status_counts(&self) -> BTreeMap<ValidationStatus, usize> {
        let mut counts = BTreeMap::new();
        for (_, result) in self.fields.iter() {
            *counts.entry(result.status).or_insert(0) += 1;
        }
        counts
    }

    pub fn has_issues(&self) -> bool {
        self.fields.iter().any(|(_, result)| result.status.is_issue())
    }
}

/// Stateless engine comparing target documents against the source of truth.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: FieldRegistry,
}

impl ValidationEngine {
    pub fn new(registry: FieldRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Validates every source-of-truth field against `target`.
    ///
    /// Fields only present in the target are ignored. A missing target value
    /// is `MissingRequiredField` when the document's profile requires it and
    /// `NotApplicable` otherwise; no comparison runs for either.
    pub fn validate(
        &self,
        source_of_truth: &FieldMap,
        target: &FieldMap,
        target_document_type: &str,
    ) -> ValidationReport {
        let mut fields = FieldMap::new();

        for (field, source_value) in source_of_truth.iter() {
            let target_value = target.value(field);
            let verdict =
                self.validate_field(field, source_value, target_value, target_document_type);
            debug!(
                document = target_document_type,
                field,
                status = %verdict.status,
                score = ?verdict.score,
                "field validated"
            );
            fields.insert(
                field,
                FieldResult::from_verdict(verdict, source_value, target_value),
            );
        }

        ValidationReport { fields }
    }

    fn validate_field(
        &self,
        field: &str,
        source_value: &FieldValue,
        target_value: &FieldValue,
        target_document_type: &str,
    ) -> FieldVerdict {
        if target_value.is_missing() {
            return if self.registry.is_required(target_document_type, field) {
                FieldVerdict::unscored(
                    ValidationStatus::MissingRequiredField,
                    "This required field is missing from the document.",
                )
            } else {
                FieldVerdict::unscored(
                    ValidationStatus::NotApplicable,
                    "This field is not applicable to this document type.",
                )
            };
        }

        if source_value.is_missing() {
            return FieldVerdict::new(ValidationStatus::DoesNotMatch, 0)
                .with_notes("The source of truth has no value for this field.");
        }

        let category = self.registry.category(field);
        validators::compare(category, source_value, target_value).unwrap_or_else(|err| {
            warn!(
                document = target_document_type,
                field,
                value = err.value(),
                "field value could not be parsed"
            );
            FieldVerdict::from(err)
        })
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(FieldRegistry::standard())
    }
}
