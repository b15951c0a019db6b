use crate::infra::build_engine;
use clap::{Args, ValueEnum};
use shipment_dossier::config::AppConfig;
use shipment_dossier::error::AppError;
use shipment_dossier::telemetry;
use shipment_dossier::validation::display::{format_value, title_case};
use shipment_dossier::validation::export::write_summary_csv;
use shipment_dossier::validation::{
    BankingCheckStatus, DossierOutcome, FieldRegistry, ShipmentDossier,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable summary, banking check and per-document detail
    #[default]
    Text,
    /// The full outcome as JSON
    Json,
    /// The summary matrix as CSV
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file mapping document tags to extracted fields
    #[arg(long)]
    pub(crate) dossier: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Alternative field categories and document profiles (JSON)
    #[arg(long)]
    pub(crate) profiles: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProfilesArgs {
    /// Alternative field categories and document profiles (JSON)
    #[arg(long)]
    pub(crate) profiles: Option<PathBuf>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let ValidateArgs {
        dossier,
        format,
        profiles,
    } = args;

    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let engine = build_engine(&mut config, profiles)?;

    let dossier = ShipmentDossier::from_path(&dossier)?;
    let outcome = engine.validate_dossier(&dossier)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&outcome, engine.registry())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Csv => write_summary_csv(&outcome, std::io::stdout().lock())?,
    }

    Ok(())
}

pub(crate) fn run_profiles(args: ProfilesArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    let engine = build_engine(&mut config, args.profiles)?;
    println!("{}", serde_json::to_string_pretty(engine.registry())?);
    Ok(())
}

pub(crate) fn render_text(outcome: &DossierOutcome, registry: &FieldRegistry) -> String {
    let mut lines = vec!["Shipment dossier validation".to_string()];

    let documents: Vec<_> = outcome.documents().collect();
    if documents.is_empty() {
        lines.push("Documents validated: none (commercial invoice only)".to_string());
    } else {
        let labels: Vec<&str> = documents.iter().map(|document| document.label()).collect();
        lines.push(format!("Documents validated: {}", labels.join(", ")));

        lines.push(String::new());
        lines.push("Summary".to_string());
        for (field, row) in outcome.summary.iter() {
            let cells: Vec<String> = documents
                .iter()
                .map(|document| {
                    let status = row
                        .get(document)
                        .map(|status| status.label())
                        .unwrap_or("N/A");
                    format!("{} {}", document.label(), status)
                })
                .collect();
            lines.push(format!("- {}: {}", title_case(field), cells.join(" | ")));
        }
    }

    lines.push(String::new());
    let banking = &outcome.banking;
    match banking.status {
        BankingCheckStatus::NotApplicable => {
            lines.push(format!("Banking check: {}", banking.status.label()));
        }
        _ => lines.push(format!(
            "Banking check: {} ({})",
            banking.status.label(),
            banking.notes
        )),
    }

    let issues = outcome.issues();
    if issues.is_empty() {
        lines.push(String::new());
        lines.push("Issues: none".to_string());
    } else {
        lines.push(String::new());
        lines.push("Issues".to_string());
        for issue in &issues {
            lines.push(format!(
                "- [{}] {}: {}",
                issue.document.label(),
                title_case(&issue.field),
                issue.status.label()
            ));
        }
    }

    for (document, report) in &outcome.reports {
        lines.push(String::new());
        lines.push(document.label().to_string());
        for (field, result) in report.iter() {
            let score = result
                .score
                .map(|score| format!(" (score {score})"))
                .unwrap_or_default();
            lines.push(format!(
                "- {}: {}{}",
                title_case(field),
                result.status.label(),
                score
            ));

            let category = registry.category(field);
            let source = format_value(category, &result.source_value).replace('\n', ", ");
            let target = format_value(category, &result.target_value).replace('\n', ", ");
            lines.push(format!("  invoice: {source} | document: {target}"));
            if let Some(notes) = &result.notes {
                lines.push(format!("  notes: {notes}"));
            }
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
