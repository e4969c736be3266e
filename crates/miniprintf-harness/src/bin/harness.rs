//! CLI entrypoint for the miniprintf conformance harness.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use miniprintf_harness::fixtures::fixture_paths;
use miniprintf_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, StreamKind, now_utc, validate_log_file,
};
use miniprintf_harness::{
    ConformanceReport, FixtureArg, FixtureSet, HarnessError, TestRunner, VerificationSummary,
};

/// Conformance tooling for miniprintf.
#[derive(Debug, Parser)]
#[command(name = "miniprintf-harness")]
#[command(about = "Conformance testing harness for miniprintf")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; JSON is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Only run cases whose section starts with this prefix.
        #[arg(long)]
        section: Option<String>,
    },
    /// Re-record a fixture file's expectations from the host libc.
    Capture {
        /// Fixture file whose cases are replayed.
        #[arg(long)]
        fixture: PathBuf,
        /// Where to write the captured fixture.
        #[arg(long)]
        output: PathBuf,
    },
    /// Format once and print to stdout.
    Render {
        /// Format string.
        format: String,
        /// Arguments: int:N, uint:N, double:X, str:TEXT, ptr:N or null.
        args: Vec<String>,
    },
    /// Validate a structured JSONL log.
    ValidateLog {
        #[arg(long)]
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
            section,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let mut fixture_sets = Vec::new();
            for path in fixture_paths(&fixture)? {
                match FixtureSet::from_file(&path) {
                    Ok(set) => fixture_sets.push(set),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let mut runner = TestRunner::new("fixture-verify");
            if let Some(prefix) = section {
                runner = runner.with_section_filter(prefix);
            }
            let started = Instant::now();
            let results: Vec<_> = fixture_sets.iter().flat_map(|set| runner.run(set)).collect();
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let summary = VerificationSummary::from_results(results);
            let report_doc = ConformanceReport {
                title: String::from("miniprintf Conformance Report"),
                families: fixture_sets.iter().map(|s| s.family.clone()).collect(),
                timestamp: now_utc(),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );
            for failure in report_doc.summary.failures() {
                eprintln!("FAIL {} ({:?})", failure.case_name, failure.format);
                if let Some(diff) = &failure.diff {
                    eprintln!("{diff}");
                }
            }

            let mut artifacts = Vec::new();
            if let Some(report_path) = &report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
                artifacts.push((report_path.clone(), "report_markdown"));
                artifacts.push((json_path, "report_json"));
            }

            if let Some(log_path) = &log {
                let run_id = format!("verify-{}", std::process::id());
                let mut emitter = LogEmitter::to_file(log_path, &run_id)?;
                for result in &report_doc.summary.results {
                    emitter.emit_entry(LogEntry::for_result(result))?;
                }
                emitter.emit_entry(
                    LogEntry::new("", LogLevel::Info, "verify_complete")
                        .with_stream(StreamKind::Conformance)
                        .with_duration_ms(elapsed_ms)
                        .with_artifacts(
                            artifacts
                                .iter()
                                .map(|(path, _)| path.display().to_string())
                                .collect(),
                        )
                        .with_details(serde_json::json!({
                            "total": report_doc.summary.total,
                            "passed": report_doc.summary.passed,
                            "failed": report_doc.summary.failed,
                        })),
                )?;
                emitter.flush()?;
                artifacts.push((log_path.clone(), "log_jsonl"));

                let mut index = ArtifactIndex::new(&run_id);
                for (path, kind) in &artifacts {
                    index.add_file(path, *kind)?;
                }
                let index_path = log_path.with_extension("artifacts.json");
                std::fs::write(&index_path, index.to_json()?)?;
                eprintln!("Wrote log to {} and index to {}", log_path.display(), index_path.display());
            }

            if !report_doc.summary.all_passed() {
                return Err(HarnessError::VerificationFailed {
                    failed: report_doc.summary.failed,
                    total: report_doc.summary.total,
                }
                .into());
            }
        }
        Command::Capture { fixture, output } => capture(&fixture, &output)?,
        Command::Render { format, args } => {
            let parsed = args
                .iter()
                .map(|raw| raw.parse::<FixtureArg>())
                .collect::<Result<Vec<_>, _>>()?;
            let args: Vec<_> = parsed.iter().map(FixtureArg::to_arg).collect();
            let written = miniprintf_core::printf(format.as_bytes(), &args);
            println!();
            eprintln!("{written} characters");
        }
        Command::ValidateLog { path } => {
            let (lines, errors) = validate_log_file(&path)?;
            for error in &errors {
                eprintln!("{error}");
            }
            eprintln!("{lines} lines, {} errors", errors.len());
            if !errors.is_empty() {
                return Err(format!("{} invalid log lines", errors.len()).into());
            }
        }
    }

    Ok(())
}

#[cfg(unix)]
fn capture(fixture: &std::path::Path, output: &std::path::Path) -> Result<(), HarnessError> {
    eprintln!("Capturing {} against the host libc", fixture.display());
    let set = FixtureSet::from_file(fixture)?;
    let captured = miniprintf_harness::capture::capture_set(&set, &now_utc())?;
    captured.validate()?;
    std::fs::write(output, captured.to_json()?)?;
    eprintln!("Wrote {} cases to {}", captured.cases.len(), output.display());
    Ok(())
}

#[cfg(not(unix))]
fn capture(fixture: &std::path::Path, _output: &std::path::Path) -> Result<(), HarnessError> {
    Err(HarnessError::UnsupportedCase {
        case: fixture.display().to_string(),
        reason: "host capture needs a unix libc".to_string(),
    })
}
