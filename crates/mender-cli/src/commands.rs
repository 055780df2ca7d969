//! Dispatches parsed subcommands to the library passes.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use mender_checks::{
    Check, CheckReport, GuardCheck, IncludeCheck, LicenseCheck, normalize_files, run_check,
};
use mender_config::Config;
use mender_harness::{
    CommandOracle, ConstifyRule, EditRule, IncludePruneRule, Rewriter, RunReport,
};
use mender_scan::{LexicalScanner, ScanError, SourcePath, SymbolIndex, TreeWalker};
use tracing::info;

use crate::cli::{CheckArgs, CliCommand, FileArgs};
use crate::errors::AppError;
use crate::transcript::{
    TranscriptListener, write_check_report, write_normalize_report, write_run_summary,
};

const COMMAND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::commands");

/// Which extensions a pass walks.
#[derive(Debug, Clone, Copy)]
enum FileSet {
    Headers,
    Sources,
    All,
}

pub(crate) fn execute<W: Write>(
    command: &CliCommand,
    config: &Config,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    match command {
        CliCommand::Constify(args) => {
            let index = build_index(config)?;
            info!(target: COMMAND_TARGET, symbols = index.len(), "symbol index ready");
            let rule = ConstifyRule::new(&index);
            rewrite(&rule, config, args, FileSet::Sources, stdout)
        }
        CliCommand::PruneIncludes(args) => {
            rewrite(&IncludePruneRule::new(), config, args, FileSet::All, stdout)
        }
        CliCommand::CheckGuards(args) => {
            run_checker(&GuardCheck, config, args, FileSet::Headers, stdout)
        }
        CliCommand::CheckLicense(args) => {
            let license = LicenseCheck::new(config.license_marker());
            run_checker(&license, config, args, FileSet::All, stdout)
        }
        CliCommand::CheckIncludes(args) => {
            let includes = IncludeCheck::new(config.roots());
            run_checker(&includes, config, args, FileSet::All, stdout)
        }
        CliCommand::Normalize(args) => {
            let report = normalize_files(files(config, args, FileSet::All))?;
            write_normalize_report(stdout, &report).map_err(AppError::Transcript)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn rewrite<W: Write>(
    rule: &dyn EditRule,
    config: &Config,
    args: &FileArgs,
    set: FileSet,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    let paths = files(config, args, set).collect::<Result<Vec<_>, _>>()?;
    let mut oracle = CommandOracle::new(
        config.build_command()?,
        config.build_dir().into_std_path_buf(),
    );
    if let Some(log) = config.build_log() {
        oracle = oracle.with_log(log.into_std_path_buf())?;
    }

    let mut listener = TranscriptListener::new(stdout);
    let result = Rewriter::new(rule, &oracle).run(&paths, &mut listener);
    listener.finish().map_err(AppError::Transcript)?;
    let report: RunReport = result?;

    write_run_summary(stdout, &report).map_err(AppError::Transcript)?;
    Ok(ExitCode::SUCCESS)
}

fn run_checker<W: Write>(
    pass: &dyn Check,
    config: &Config,
    args: &CheckArgs,
    set: FileSet,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    let report: CheckReport = run_check(pass, files(config, &args.files, set))?;
    write_check_report(stdout, &report).map_err(AppError::Transcript)?;
    if args.strict && !report.is_clean() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn build_index(config: &Config) -> Result<SymbolIndex, AppError> {
    let walker = walker(config, FileSet::Headers);
    Ok(SymbolIndex::build(walker.walk(), &LexicalScanner::new())?)
}

fn walker(config: &Config, set: FileSet) -> TreeWalker {
    let extensions = match set {
        FileSet::Headers => config.header_extensions(),
        FileSet::Sources => config.source_extensions(),
        FileSet::All => config.all_extensions(),
    };
    TreeWalker::new(config.base_dir().as_std_path())
        .with_roots(config.roots())
        .with_extensions(extensions)
}

/// Explicit files when given, otherwise every matching file under the roots.
fn files(
    config: &Config,
    args: &FileArgs,
    set: FileSet,
) -> Box<dyn Iterator<Item = Result<PathBuf, ScanError>>> {
    if args.files.is_empty() {
        let walked: Vec<_> = walker(config, set)
            .walk()
            .map(|entry| entry.map(SourcePath::into_path))
            .collect();
        Box::new(walked.into_iter())
    } else {
        Box::new(args.files.clone().into_iter().map(Ok))
    }
}
