use crate::report::{run_profiles, run_validate, ProfilesArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shipment_dossier::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Shipment Dossier Validator",
    about = "Cross-check extracted export shipment documents against their commercial invoice",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate a dossier of extracted documents and print the results
    Validate(ValidateArgs),
    /// Print the active field categories and document profiles as JSON
    Profiles(ProfilesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Profiles(args) => run_profiles(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["shipment-dossier-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn validate_accepts_format_and_profiles() {
        let cli = Cli::try_parse_from([
            "shipment-dossier-api",
            "validate",
            "--dossier",
            "dossier.json",
            "--format",
            "csv",
            "--profiles",
            "profiles.json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Validate(args)) => {
                assert_eq!(args.dossier.to_str(), Some("dossier.json"));
                assert_eq!(args.format, OutputFormat::Csv);
                assert!(args.profiles.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn validate_requires_a_dossier() {
        assert!(Cli::try_parse_from(["shipment-dossier-api", "validate"]).is_err());
    }
}
