//! Cross-document field validation for trade shipment dossiers.
//!
//! The commercial invoice is the source of truth; every other document in a
//! dossier is compared to it field by field and each field receives exactly
//! one [`validation::ValidationStatus`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod validation;
