use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use domain::models::{ErrorBody, ErrorOut};
use services::output::{paint, Status};
use services::platform::{ensure_nix_present, NixMissing};

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            report_fatal(&cli, &err);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    ensure_nix_present()?;
    commands::handle_check_commands(cli)
}

fn report_fatal(cli: &Cli, err: &anyhow::Error) {
    if cli.json {
        let code = if err.is::<NixMissing>() {
            "NIX_NOT_FOUND"
        } else {
            "INTERNAL"
        };
        let out = ErrorOut {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: format!("{err:#}"),
            },
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_default()
        );
    } else {
        eprintln!("{}", paint(Status::Fail, &format!("Error: {err:#}")));
    }
}
