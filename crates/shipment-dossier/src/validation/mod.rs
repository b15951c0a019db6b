pub mod banking;
pub mod display;
mod dispatcher;
pub mod dossier;
pub mod export;
pub mod normalizer;
pub mod registry;
pub mod similarity;
mod status;
pub mod validators;
mod value;

pub use banking::{check_banking, BankingCheck, BankingCheckStatus, Currency};
pub use dispatcher::{ValidationEngine, ValidationReport};
pub use dossier::{DossierError, DossierIssue, DossierOutcome, ShipmentDossier};
pub use normalizer::{normalize_fuzzy, normalize_numeric, ValueTypeError};
pub use registry::{fields, DocumentType, FieldCategory, FieldRegistry, RegistryError};
pub use status::{FieldResult, FieldVerdict, StatusTone, UnknownStatus, ValidationStatus};
pub use validators::{
    validate_containers, validate_currency, validate_float, validate_generic, validate_integer,
    validate_partial_match,
};
pub use value::{FieldMap, FieldValue};
