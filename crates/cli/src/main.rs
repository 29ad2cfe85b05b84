#![forbid(unsafe_code)]

mod command;
mod config;

use orbit_storage::Response;
use std::process::ExitCode;

fn print_envelope(response: &Response) -> ExitCode {
    match serde_json::to_string(response) {
        Ok(line) => println!("{line}"),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    if response.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = match config::parse_args() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let db = match cfg.open() {
        Ok(db) => db,
        Err(err) => return print_envelope(&Response::failure(err)),
    };
    log::debug!(
        "store {} ({:?})",
        cfg.storage_dir.display(),
        cfg.backend
    );

    let response = command::execute(&db, cfg.command).await;
    print_envelope(&response)
}
