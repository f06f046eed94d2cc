use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use ocr_series::core::format_timestamp_utc;
use ocr_series::run_pipeline;
use ocr_series::telemetry::init_tracing_with_filter;

const USAGE: &str =
    "usage: replay_ocr_transcript --input <path|-> [--records] [--log <filter>]";

#[derive(Debug)]
struct CliArgs {
    input: Option<PathBuf>,
    print_records: bool,
    log_filter: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = init_tracing_with_filter(args.log_filter.as_deref());
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            buf
        }
    };

    let outcome = run_pipeline(&raw);
    println!("{}", outcome.extracted_json);
    if args.print_records {
        println!("records: {}", outcome.records.len());
        for record in &outcome.records {
            println!("{}\t{}", format_timestamp_utc(record.timestamp), record.value);
        }
    }

    match outcome.error {
        Some(err) => Err(err.to_string()),
        None => Ok(()),
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut input_seen = false;
    let mut print_records = false;
    let mut log_filter = None::<String>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input_seen = true;
                input = (value != "-").then(|| PathBuf::from(value));
            }
            "--records" => print_records = true,
            "--log" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --log".to_owned())?;
                log_filter = Some(value);
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    if !input_seen {
        return Err(USAGE.to_owned());
    }
    Ok(CliArgs {
        input,
        print_records,
        log_filter,
    })
}
