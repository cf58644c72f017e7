mod prompt;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use ads2vsc_migrate::{
  ConnectionMigrator, MigrateError, MigrationConfig, MigrationMode, MigrationPaths,
};
use clap::Parser;
use tracing::{error, info};

pub use report::{error_lines, report_lines};

#[derive(Parser, Debug)]
#[command(
  name = "ads2vsc",
  version,
  about = "Migrate Azure Data Studio connections into VS Code mssql settings"
)]
pub struct Cli {
  /// Azure Data Studio settings.json (prompted for when omitted)
  #[arg(short, long)]
  pub source: Option<PathBuf>,

  /// VS Code settings.json to update (prompted for when omitted)
  #[arg(short, long)]
  pub target: Option<PathBuf>,

  /// Print the updated target document instead of writing it
  #[arg(long)]
  pub dry_run: bool,

  /// Enable verbose logging (info/debug to stderr)
  #[arg(short = 'v', long)]
  pub verbose: bool,
}

pub fn run() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let paths = match resolve_paths(&cli) {
    Ok(paths) => paths,
    Err(e) => {
      eprintln!("Error: could not read path: {e}");
      return ExitCode::from(1);
    }
  };

  let mode = if cli.dry_run { MigrationMode::DryRun } else { MigrationMode::Write };
  match execute(&paths, mode) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!(kind = ?e.kind(), "migration failed");
      for line in error_lines(&e) {
        eprintln!("{line}");
      }
      ExitCode::from(1)
    }
  }
}

fn init_logging(verbose: bool) {
  let default_filter = if verbose {
    "ads2vsc=debug,ads2vsc_lib=debug,ads2vsc_migrate=debug"
  } else {
    "ads2vsc=warn,ads2vsc_lib=warn,ads2vsc_migrate=warn"
  };
  let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| default_filter.into());

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(io::stderr)
    .with_target(false)
    .init();
}

fn resolve_paths(cli: &Cli) -> io::Result<MigrationPaths> {
  let source = prompt::path_or_prompt(cli.source.clone(), prompt::SOURCE_PROMPT)?;
  let target = prompt::path_or_prompt(cli.target.clone(), prompt::TARGET_PROMPT)?;
  Ok(MigrationPaths { source, target })
}

fn execute(paths: &MigrationPaths, mode: MigrationMode) -> Result<(), MigrateError> {
  let migrator = ConnectionMigrator::new(MigrationConfig::default());
  info!(source = %paths.source.display(), target = %paths.target.display(), "starting migration");

  let result = migrator.migrate_files(paths, mode)?;
  let lines = report_lines(&result.report, &paths.target, result.written);

  // Dry run: the document owns stdout, the report moves to stderr.
  if mode == MigrationMode::DryRun {
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(&result.output).and_then(|_| writeln!(stdout)) {
      return Err(MigrateError::Write { path: PathBuf::from("<stdout>"), source: e });
    }
    for line in lines {
      eprintln!("{line}");
    }
  } else {
    for line in lines {
      println!("{line}");
    }
  }

  info!(migrated = result.report.migrated, skipped = result.report.skipped, "migration finished");
  Ok(())
}
