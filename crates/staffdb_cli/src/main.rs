//! CLI probe over a staff database file.
//!
//! # Responsibility
//! - Verify `staffdb_core` linkage and schema bootstrap against a real file.
//! - Print one deterministic line per department with its head-count.
//!
//! Usage: `staffdb_cli [--log-dir DIR] [DB_PATH]`. `STAFFDB_LOG_DIR` is used
//! when `--log-dir` is absent; without either, nothing is logged.

use staffdb_core::{
    DepartmentRepository, EmployeeRepository, RepoResult, RepositoryFactory,
    SqliteConnectionProvider,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "STAFFDB_LOG_DIR";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    log_dir: Option<PathBuf>,
    db_path: Option<String>,
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("staffdb: {message}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = args
        .log_dir
        .or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from));
    if let Some(dir) = log_dir {
        if let Err(message) = start_logging(dir) {
            eprintln!("staffdb: {message}");
            return ExitCode::FAILURE;
        }
    }

    let code = run(args.db_path.as_deref());
    staffdb_core::flush_logging();
    code
}

fn run(db_path: Option<&str>) -> ExitCode {
    let Some(db_path) = db_path else {
        println!("staffdb_core version={}", staffdb_core::core_version());
        return ExitCode::SUCCESS;
    };

    match summarize(db_path) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("staffdb: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args<I: Iterator<Item = String>>(mut raw: I) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = raw.next() {
        if arg == "--log-dir" {
            let dir = raw.next().ok_or("--log-dir needs a directory")?;
            args.log_dir = Some(PathBuf::from(dir));
        } else if args.db_path.is_none() {
            args.db_path = Some(arg);
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }
    Ok(args)
}

fn start_logging(dir: PathBuf) -> Result<(), String> {
    let dir = if dir.is_absolute() {
        dir
    } else {
        std::env::current_dir()
            .map_err(|err| format!("cannot resolve log directory: {err}"))?
            .join(dir)
    };
    let dir = dir
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not UTF-8", dir.display()))?;
    staffdb_core::init_logging(staffdb_core::default_log_level(), dir)
}

fn summarize(db_path: &str) -> RepoResult<Vec<String>> {
    let factory = RepositoryFactory::connect(&SqliteConnectionProvider::file(db_path))?;

    let mut headcount: BTreeMap<Option<u64>, usize> = BTreeMap::new();
    for employee in factory.employees().get_all()? {
        *headcount.entry(employee.department_id).or_default() += 1;
    }

    let mut lines = Vec::new();
    for department in factory.departments().get_all()? {
        let members = headcount.remove(&Some(department.id)).unwrap_or(0);
        lines.push(format!(
            "department id={} name={} location={} employees={members}",
            department.id, department.name, department.location
        ));
    }

    let unassigned: usize = headcount.values().sum();
    lines.push(format!("unassigned employees={unassigned}"));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Args};
    use std::path::PathBuf;

    fn parse(raw: &[&str]) -> Result<Args, String> {
        parse_args(raw.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn log_dir_flag_may_come_before_or_after_the_db_path() {
        let expected = Args {
            log_dir: Some(PathBuf::from("/tmp/staffdb-logs")),
            db_path: Some("staff.sqlite3".to_string()),
        };
        assert_eq!(
            parse(&["--log-dir", "/tmp/staffdb-logs", "staff.sqlite3"]).unwrap(),
            expected
        );
        assert_eq!(
            parse(&["staff.sqlite3", "--log-dir", "/tmp/staffdb-logs"]).unwrap(),
            expected
        );
    }

    #[test]
    fn no_arguments_means_version_only() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn dangling_flag_and_extra_paths_are_rejected() {
        assert!(parse(&["--log-dir"]).is_err());
        assert!(parse(&["a.sqlite3", "b.sqlite3"]).is_err());
    }
}
