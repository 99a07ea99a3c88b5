//! Mailshift command-line runtime.

#![forbid(unsafe_code)]

mod commands;
mod config;

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use commands::{Cli, Commands, MapArgs, ScoreArgs};
use config::CliConfig;
use mailshift_application::{
    BatchEligibilityService, ExecutionMode, GrantExecutionService, PermissionMappingService,
    WellKnownFolderResolver,
};
use mailshift_core::{AppError, AppResult, RunId};
use mailshift_domain::MigrationBatch;
use mailshift_infrastructure::{
    CachingWellKnownFolderResolver, ConsoleGrantExecutor, CsvInputReader, CsvReportWriter,
    StaticWellKnownFolderResolver,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let run_id = RunId::new();

    match cli.command {
        Commands::Score(args) => run_score(&config, run_id, args),
        Commands::Map(args) => run_map(&config, run_id, args).await,
    }
}

fn run_score(config: &CliConfig, run_id: RunId, args: ScoreArgs) -> AppResult<()> {
    let scoring = config.scoring(args.threshold)?;
    let reader = CsvInputReader::new(config.csv_has_headers);

    let batch = MigrationBatch::new(reader.read_identities(&args.users)?);
    let candidates = reader.read_identities(&args.shared)?;
    let exclusions = match &args.exclusions {
        Some(path) => reader.read_identities(path)?,
        None => Vec::new(),
    };
    let records = reader.read_permission_records(&args.permissions)?;

    info!(
        run_id = %run_id,
        batch_users = batch.len(),
        candidates = candidates.len(),
        exclusions = exclusions.len(),
        records = records.len(),
        threshold = scoring.threshold(),
        "scoring shared mailboxes"
    );

    let scored = BatchEligibilityService::new(scoring).score_candidates(
        records,
        &candidates,
        &batch,
        &exclusions,
    );

    let writer = CsvReportWriter::new(run_id);
    match &args.output {
        Some(path) => writer.write_scored_mailboxes_file(path, &scored),
        None => writer.write_scored_mailboxes(io::stdout().lock(), &scored),
    }
}

async fn run_map(config: &CliConfig, run_id: RunId, args: MapArgs) -> AppResult<()> {
    let reader = CsvInputReader::new(config.csv_has_headers);
    let batch = MigrationBatch::new(reader.read_identities(&args.users)?);
    let records = reader.read_permission_records(&args.permissions)?;

    let folder_resolver = build_folder_resolver(args.folder_names.as_deref())?;
    let mapping_service = PermissionMappingService::new(folder_resolver)
        .with_calendar_options(config.calendar_options.clone());
    let mode = if args.apply {
        ExecutionMode::Apply
    } else {
        ExecutionMode::ReportOnly
    };
    let execution_service =
        GrantExecutionService::new(Arc::new(ConsoleGrantExecutor::new()), mode);

    info!(
        run_id = %run_id,
        batch_users = batch.len(),
        records = records.len(),
        mode = ?execution_service.mode(),
        "mapping permissions"
    );

    let actions = mapping_service.map_batch(&records, &batch).await;

    let writer = CsvReportWriter::new(run_id);
    match &args.output {
        Some(path) => writer.write_grant_actions_file(path, &actions)?,
        None => writer.write_grant_actions(io::stdout().lock(), &actions)?,
    }

    let summary = execution_service.execute_all(&actions).await;
    if summary.failed > 0 {
        return Err(AppError::External(format!(
            "{} of {} grant actions failed",
            summary.failed,
            actions.len()
        )));
    }

    Ok(())
}

fn build_folder_resolver(
    folder_names: Option<&Path>,
) -> AppResult<Arc<dyn WellKnownFolderResolver>> {
    let resolver = match folder_names {
        Some(path) => StaticWellKnownFolderResolver::from_json_file(path)?,
        None => StaticWellKnownFolderResolver::new(),
    };

    Ok(Arc::new(CachingWellKnownFolderResolver::new(Arc::new(resolver))))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
