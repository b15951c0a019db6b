use super::display::title_case;
use super::dossier::DossierOutcome;
use std::io::Write;

/// Writes the summary matrix as CSV: one row per field, one column per
/// validated document. Cells hold status labels, `N/A` where a document has
/// no entry.
pub fn write_summary_csv<W: Write>(
    outcome: &DossierOutcome,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let documents: Vec<_> = outcome.documents().collect();

    let mut header = vec!["Field".to_string()];
    header.extend(documents.iter().map(|document| title_case(document.tag())));
    csv_writer.write_record(&header)?;

    for (field, row) in outcome.summary.iter() {
        let mut record = vec![title_case(field)];
        record.extend(documents.iter().map(|document| {
            row.get(document)
                .map(|status| status.label().to_string())
                .unwrap_or_else(|| "N/A".to_string())
        }));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::registry::{fields::*, DocumentType};
    use crate::validation::value::{FieldMap, FieldValue};
    use crate::validation::{ShipmentDossier, ValidationEngine};

    #[test]
    fn summary_csv_lists_documents_as_columns() {
        let mut invoice = FieldMap::new();
        invoice.insert(TOTAL_CARTONS, FieldValue::from("1,920"));
        invoice.insert(VOYAGE, FieldValue::from("412N"));
        let mut bill = FieldMap::new();
        bill.insert(TOTAL_CARTONS, FieldValue::from("1920"));

        let mut dossier = ShipmentDossier::new();
        dossier.insert(DocumentType::CommercialInvoice, invoice);
        dossier.insert(DocumentType::BillOfLading, bill);

        let outcome = ValidationEngine::default()
            .validate_dossier(&dossier)
            .expect("dossier validates");

        let mut buffer = Vec::new();
        write_summary_csv(&outcome, &mut buffer).expect("csv writes");
        let csv = String::from_utf8(buffer).expect("csv is utf-8");

        assert_eq!(
            csv,
            "Field,Bill Of Lading\nTotal Cartons,Matched Exactly\nVoyage,Missing Required Field\n"
        );
    }
}
