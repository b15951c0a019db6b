use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Field names produced by the document extractors.
pub mod fields {
    pub const EXPORTER_ADDRESS: &str = "exporter_address";
    pub const CONSIGNEE_DETAILS: &str = "consignee_details";
    pub const NOTIFY_PARTY_DETAILS: &str = "notify_party_details";
    pub const INVOICE_PARTY_DETAILS: &str = "invoice_party_details";
    pub const CONTAINER_NUMBER: &str = "container_number";
    pub const VESSEL_NAME: &str = "vessel_name";
    pub const VOYAGE: &str = "voyage";
    pub const PORT_OF_DESTINATION: &str = "port_of_destination";
    pub const TOTAL_CARTONS: &str = "total_cartons";
    pub const TOTAL_VALUE: &str = "total_value";
    pub const TOTAL_GROSS_MASS_KG: &str = "total_gross_mass_kg";
    pub const TOTAL_NET_MASS_KG: &str = "total_net_mass_kg";
    pub const BANKING_DETAILS: &str = "banking_details";
}

use fields::*;

/// Validator-selection tag attached to a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    MultiLineText,
    Integer,
    Float,
    Currency,
    ContainerList,
    SimpleText,
    PartialMatchText,
    Generic,
}

/// Documents that make up a shipment dossier, in upload-slot order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    CommercialInvoice,
    PackingList,
    BillOfLading,
    PhytoCertificate,
    Ppecb,
    CertificateOfOrigin,
    Eur1,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::CommercialInvoice,
        DocumentType::PackingList,
        DocumentType::BillOfLading,
        DocumentType::PhytoCertificate,
        DocumentType::Ppecb,
        DocumentType::CertificateOfOrigin,
        DocumentType::Eur1,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::CommercialInvoice => "commercial_invoice",
            DocumentType::PackingList => "packing_list",
            DocumentType::BillOfLading => "bill_of_lading",
            DocumentType::PhytoCertificate => "phyto_certificate",
            DocumentType::Ppecb => "ppecb",
            DocumentType::CertificateOfOrigin => "certificate_of_origin",
            DocumentType::Eur1 => "eur1",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::CommercialInvoice => "Commercial Invoice (CI)",
            DocumentType::PackingList => "Packing List (PL)",
            DocumentType::BillOfLading => "Bill of Lading (BOL) / Sea Waybill",
            DocumentType::PhytoCertificate => "Phytosanitary Certificate",
            DocumentType::Ppecb => "PPECB Certificate",
            DocumentType::CertificateOfOrigin => "Certificate of Origin (COO)",
            DocumentType::Eur1 => "EUR.1 Certificate",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        DocumentType::ALL
            .into_iter()
            .find(|document| document.tag() == tag)
    }

    pub fn is_source_of_truth(&self) -> bool {
        matches!(self, DocumentType::CommercialInvoice)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Immutable field classification and per-document required-field profiles.
///
/// Profiles are keyed by document tag so custom profile sets may describe
/// document types the engine does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRegistry {
    categories: BTreeMap<String, FieldCategory>,
    profiles: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read profile set: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile set: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FieldRegistry {
    pub fn new(
        categories: BTreeMap<String, FieldCategory>,
        profiles: BTreeMap<String, BTreeSet<String>>,
    ) -> Self {
        Self {
            categories,
            profiles,
        }
    }

    /// The classification and profiles used for the standard export dossier.
    pub fn standard() -> Self {
        let categories = [
            (EXPORTER_ADDRESS, FieldCategory::MultiLineText),
            (CONSIGNEE_DETAILS, FieldCategory::MultiLineText),
            (NOTIFY_PARTY_DETAILS, FieldCategory::MultiLineText),
            (INVOICE_PARTY_DETAILS, FieldCategory::MultiLineText),
            (BANKING_DETAILS, FieldCategory::MultiLineText),
            (TOTAL_CARTONS, FieldCategory::Integer),
            (TOTAL_GROSS_MASS_KG, FieldCategory::Float),
            (TOTAL_NET_MASS_KG, FieldCategory::Float),
            (TOTAL_VALUE, FieldCategory::Currency),
            (CONTAINER_NUMBER, FieldCategory::ContainerList),
            (VESSEL_NAME, FieldCategory::SimpleText),
            (VOYAGE, FieldCategory::SimpleText),
            // Abbreviation-prone; compared with the lenient partial matcher.
            (PORT_OF_DESTINATION, FieldCategory::PartialMatchText),
        ]
        .into_iter()
        .map(|(field, category)| (field.to_string(), category))
        .collect();

        let profiles = [
            (
                DocumentType::BillOfLading,
                &[
                    EXPORTER_ADDRESS,
                    CONSIGNEE_DETAILS,
                    NOTIFY_PARTY_DETAILS,
                    CONTAINER_NUMBER,
                    VESSEL_NAME,
                    VOYAGE,
                    PORT_OF_DESTINATION,
                    TOTAL_CARTONS,
                    TOTAL_GROSS_MASS_KG,
                    TOTAL_NET_MASS_KG,
                ][..],
            ),
            (
                DocumentType::PhytoCertificate,
                &[
                    EXPORTER_ADDRESS,
                    CONSIGNEE_DETAILS,
                    CONTAINER_NUMBER,
                    PORT_OF_DESTINATION,
                    TOTAL_CARTONS,
                    TOTAL_NET_MASS_KG,
                    TOTAL_GROSS_MASS_KG,
                ][..],
            ),
            (
                DocumentType::Eur1,
                &[
                    EXPORTER_ADDRESS,
                    CONSIGNEE_DETAILS,
                    VESSEL_NAME,
                    VOYAGE,
                    PORT_OF_DESTINATION,
                    CONTAINER_NUMBER,
                    TOTAL_CARTONS,
                    TOTAL_GROSS_MASS_KG,
                    TOTAL_NET_MASS_KG,
                ][..],
            ),
            (
                DocumentType::CertificateOfOrigin,
                &[
                    EXPORTER_ADDRESS,
                    CONSIGNEE_DETAILS,
                    CONTAINER_NUMBER,
                    TOTAL_GROSS_MASS_KG,
                    TOTAL_CARTONS,
                ][..],
            ),
            (
                DocumentType::PackingList,
                &[
                    EXPORTER_ADDRESS,
                    CONSIGNEE_DETAILS,
                    NOTIFY_PARTY_DETAILS,
                    INVOICE_PARTY_DETAILS,
                    CONTAINER_NUMBER,
                    VESSEL_NAME,
                    PORT_OF_DESTINATION,
                    TOTAL_CARTONS,
                    TOTAL_GROSS_MASS_KG,
                    TOTAL_NET_MASS_KG,
                ][..],
            ),
            (
                DocumentType::Ppecb,
                &[
                    EXPORTER_ADDRESS,
                    CONTAINER_NUMBER,
                    VOYAGE,
                    VESSEL_NAME,
                    PORT_OF_DESTINATION,
                    TOTAL_CARTONS,
                    TOTAL_GROSS_MASS_KG,
                    TOTAL_NET_MASS_KG,
                ][..],
            ),
        ]
        .into_iter()
        .map(|(document, required)| {
            (
                document.tag().to_string(),
                required.iter().map(|field| field.to_string()).collect(),
            )
        })
        .collect();

        Self::new(categories, profiles)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Category for `field`; unclassified fields are compared generically.
    pub fn category(&self, field: &str) -> FieldCategory {
        self.categories
            .get(field)
            .copied()
            .unwrap_or(FieldCategory::Generic)
    }

    /// Required fields for a document tag; unknown tags require nothing.
    pub fn required_fields(&self, document_tag: &str) -> impl Iterator<Item = &str> {
        self.profiles
            .get(document_tag)
            .into_iter()
            .flat_map(|required| required.iter().map(String::as_str))
    }

    pub fn is_required(&self, document_tag: &str, field: &str) -> bool {
        self.profiles
            .get(document_tag)
            .map(|required| required.contains(field))
            .unwrap_or(false)
    }

    pub fn document_tags(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_categories_cover_extractor_vocabulary() {
        let registry = FieldRegistry::standard();
        assert_eq!(registry.category(TOTAL_CARTONS), FieldCategory::Integer);
        assert_eq!(registry.category(TOTAL_NET_MASS_KG), FieldCategory::Float);
        assert_eq!(registry.category(TOTAL_VALUE), FieldCategory::Currency);
        assert_eq!(
            registry.category(CONTAINER_NUMBER),
            FieldCategory::ContainerList
        );
        assert_eq!(registry.category(VOYAGE), FieldCategory::SimpleText);
        assert_eq!(
            registry.category(BANKING_DETAILS),
            FieldCategory::MultiLineText
        );
    }

    #[test]
    fn port_of_destination_is_partial_match_only() {
        let registry = FieldRegistry::standard();
        assert_eq!(
            registry.category(PORT_OF_DESTINATION),
            FieldCategory::PartialMatchText
        );
    }

    #[test]
    fn unknown_field_defaults_to_generic() {
        let registry = FieldRegistry::standard();
        assert_eq!(registry.category("incoterms"), FieldCategory::Generic);
    }

    #[test]
    fn profiles_fail_open_for_unknown_documents() {
        let registry = FieldRegistry::standard();
        assert_eq!(registry.required_fields("air_waybill").count(), 0);
        assert!(!registry.is_required("air_waybill", EXPORTER_ADDRESS));
        assert_eq!(
            registry
                .required_fields(DocumentType::CommercialInvoice.tag())
                .count(),
            0
        );
    }

    #[test]
    fn certificate_of_origin_profile_matches_extractor_output() {
        let registry = FieldRegistry::standard();
        let tag = DocumentType::CertificateOfOrigin.tag();
        assert!(registry.is_required(tag, EXPORTER_ADDRESS));
        assert!(registry.is_required(tag, TOTAL_CARTONS));
        assert!(!registry.is_required(tag, VOYAGE));
        assert!(!registry.is_required(tag, TOTAL_NET_MASS_KG));
        assert_eq!(registry.document_tags().count(), 6);
    }

    #[test]
    fn registry_round_trips_through_json() {
        let registry = FieldRegistry::standard();
        let json = serde_json::to_string(&registry).expect("registry serializes");
        let loaded = FieldRegistry::from_reader(json.as_bytes()).expect("registry loads");
        assert_eq!(loaded, registry);
    }

    #[test]
    fn document_tags_resolve_to_types() {
        for document in DocumentType::ALL {
            assert_eq!(DocumentType::from_tag(document.tag()), Some(document));
        }
        assert_eq!(DocumentType::from_tag("EUR1"), None);
    }
}
