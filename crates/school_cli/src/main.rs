//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `school_core` linkage.
//! - Optionally print the bulletin of one stored student:
//!   `school_cli <student-uuid>` against `SCHOOL_DB_PATH`.

use school_core::{ReportService, SchoolConfig, SqliteStudentRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("school_core ping={}", school_core::ping());
    println!("school_core version={}", school_core::core_version());

    let Some(raw_id) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_bulletin(&raw_id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn print_bulletin(raw_id: &str) -> Result<(), String> {
    let config = SchoolConfig::from_env();
    school_core::init_logging_from_config(&config)?;

    let id = raw_id
        .trim()
        .parse()
        .map_err(|err| format!("invalid student id `{raw_id}`: {err}"))?;
    let conn = config.open_db().map_err(|err| format!("db open failed: {err}"))?;
    let repo =
        SqliteStudentRepository::try_new(&conn).map_err(|err| format!("repo init failed: {err}"))?;
    let report = ReportService::new(repo)
        .student_report(id)
        .map_err(|err| err.to_string())?;

    println!("{}", report.bulletin);
    Ok(())
}
