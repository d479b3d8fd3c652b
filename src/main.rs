use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};
use serde_json::json;

use u_print_batch::models::Schedule;
use u_print_batch::scheduler::{BatchKpi, BatchScheduler, ScheduleRequest};
use u_print_batch::validation::check_schedule;
use u_print_batch::ScheduleError;

fn init_logging() {
    env_logger::Builder::from_default_env()
        .format_timestamp(Some(env_logger::fmt::TimestampPrecision::Millis))
        .init();
}

pub fn build_cli_command() -> Command {
    Command::new("u-print-batch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Orders a 3D-printing queue into capacity-constrained batches")
        .arg(
            Arg::new("input")
                .help("Request JSON file ({\"jobs\": [...], \"constraints\": {...}}); '-' or absent reads stdin"),
        )
        .arg(
            Arg::new("max_volume")
                .long("max-volume")
                .value_parser(value_parser!(f64))
                .help("Override the request's max_volume"),
        )
        .arg(
            Arg::new("max_items")
                .long("max-items")
                .value_parser(value_parser!(usize))
                .help("Override the request's max_items"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Indent the JSON output"),
        )
        .arg(
            Arg::new("kpi")
                .long("kpi")
                .action(ArgAction::SetTrue)
                .help("Include batch metrics in the output"),
        )
}

/// Reads the request from a file, or stdin for `-` / no path.
fn read_request(path: Option<&String>) -> Result<ScheduleRequest, Box<dyn Error>> {
    let input = match path.map(String::as_str) {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => fs::read_to_string(path)?,
    };
    Ok(ScheduleRequest::from_json(&input)?)
}

fn apply_overrides(request: ScheduleRequest, matches: &ArgMatches) -> ScheduleRequest {
    let mut constraints = request.constraints;
    if let Some(&max_volume) = matches.get_one::<f64>("max_volume") {
        constraints = constraints.with_max_volume(max_volume);
    }
    if let Some(&max_items) = matches.get_one::<usize>("max_items") {
        constraints = constraints.with_max_items(max_items);
    }
    request.with_constraints(constraints)
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let request = read_request(matches.get_one::<String>("input"))?;
    let request = apply_overrides(request, matches);
    info!(
        "scheduling {} job(s), max_volume={}, max_items={}",
        request.jobs.len(),
        request.constraints.max_volume,
        request.constraints.max_items
    );

    let scheduler = BatchScheduler::new();
    let batches = scheduler.plan(&request.jobs, &request.constraints)?;
    let schedule = Schedule::from_batches(&batches)?;

    let output = if matches.get_flag("kpi") {
        if let Err(violations) = check_schedule(&request.jobs, &request.constraints, &schedule) {
            for v in &violations {
                warn!("audit: {}", v.message);
            }
        }
        let kpi = BatchKpi::calculate(&batches, &request.jobs, &request.constraints);
        json!({
            "print_order": schedule.print_order,
            "total_time": schedule.total_time,
            "kpi": kpi,
        })
    } else {
        serde_json::to_value(&schedule)?
    };

    if matches.get_flag("pretty") {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}

fn exit_code(err: &(dyn Error + 'static)) -> i32 {
    match err.downcast_ref::<ScheduleError>() {
        Some(ScheduleError::Validation { .. }) | Some(ScheduleError::Config { .. }) => 2,
        Some(ScheduleError::Scheduling { .. }) | Some(ScheduleError::TimeOverflow { .. }) => 3,
        _ => 1,
    }
}

fn main() {
    init_logging();
    let matches = build_cli_command().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e}");
        process::exit(exit_code(e.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_print_batch::models::{PrintJob, PrinterConstraints};

    fn sample_request() -> ScheduleRequest {
        ScheduleRequest::new(
            vec![PrintJob::new("M1").with_volume(100.0).with_print_time(60)],
            PrinterConstraints::new(300.0, 2),
        )
    }

    #[test]
    fn test_overrides() {
        let matches = build_cli_command()
            .try_get_matches_from(["u-print-batch", "jobs.json", "--max-items", "5"])
            .unwrap();
        let request = apply_overrides(sample_request(), &matches);
        assert_eq!(request.constraints, PrinterConstraints::new(300.0, 5));

        let matches = build_cli_command()
            .try_get_matches_from(["u-print-batch", "--max-volume", "50.5"])
            .unwrap();
        let request = apply_overrides(sample_request(), &matches);
        assert_eq!(request.constraints.max_volume, 50.5);
    }

    #[test]
    fn test_exit_codes() {
        let request = sample_request().with_constraints(PrinterConstraints::new(50.0, 2));
        let err: Box<dyn Error> = BatchScheduler::new()
            .schedule_request(&request)
            .unwrap_err()
            .into();
        assert_eq!(exit_code(err.as_ref()), 3);

        let err: Box<dyn Error> = ScheduleError::Config {
            field: "max_items",
            reason: "must be at least 1, got 0".into(),
        }
        .into();
        assert_eq!(exit_code(err.as_ref()), 2);

        let err: Box<dyn Error> = ScheduleRequest::from_json(
            r#"{"jobs": [], "constraints": {"max_volume": 300, "max_items": -1}}"#,
        )
        .unwrap_err()
        .into();
        assert_eq!(exit_code(err.as_ref()), 2);

        let err: Box<dyn Error> = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert_eq!(exit_code(err.as_ref()), 1);
    }
}
