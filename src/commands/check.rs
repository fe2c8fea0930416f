use crate::cli::{Cli, Commands};
use crate::domain::constants::PLATFORM_ATTRS_APP;
use crate::domain::models::{ConfReport, HookReport, ReadinessReport};
use crate::services::direnv::{interactive_decision, run_hooks_check, ToolStatus};
use crate::services::nix_conf::{check_nix_conf, load_snapshot};
use crate::services::output::{ind, print_json, print_report_line, print_status, Status};
use crate::services::platform::{current_user, is_apple_silicon, platform};
use crate::services::storage::audit;
use anyhow::Context;

pub fn handle_check_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Check { app_name } => {
            if !cli.json {
                println!(
                    "{}\n",
                    ind(&format!("{} READINESS TEST:", app_name.to_uppercase()), 1)
                );
            }
            let conf = run_conf_check(cli, app_name)?;
            let hooks = run_hook_flow(cli)?;
            let ready = conf.passed && hooks.ready;
            audit(
                "check",
                serde_json::json!({"app": app_name, "ready": ready}),
            );
            if cli.json {
                print_json(
                    ready,
                    &ReadinessReport {
                        app: app_name.clone(),
                        conf,
                        hooks,
                        ready,
                    },
                )?;
            } else if ready {
                print_next_steps();
            } else {
                print_status(
                    Status::Fail,
                    &format!(
                        "\n{}",
                        ind(
                            "Readiness Test failed: correct the issue(s) above and retest before installation.",
                            1
                        )
                    ),
                );
            }
            Ok(ready)
        }
        Commands::Conf { app_name } => {
            let conf = run_conf_check(cli, app_name)?;
            let passed = conf.passed;
            audit(
                "conf",
                serde_json::json!({"app": app_name, "passed": passed}),
            );
            if cli.json {
                print_json(passed, &conf)?;
            }
            Ok(passed)
        }
        Commands::Hooks => {
            let hooks = run_hook_flow(cli)?;
            let ready = hooks.ready;
            audit("hooks", serde_json::json!({"ready": ready}));
            if cli.json {
                print_json(ready, &hooks)?;
            }
            Ok(ready)
        }
    }
}

fn run_conf_check(cli: &Cli, app_name: &str) -> anyhow::Result<ConfReport> {
    if !cli.json {
        print_status(Status::Neutral, &ind("Checking nix.conf...", 1));
    }
    let snapshot = load_snapshot()?;
    let needs_platform_attrs = app_name == PLATFORM_ATTRS_APP && is_apple_silicon();
    let report = check_nix_conf(&snapshot, needs_platform_attrs, current_user().as_deref());
    if !cli.json {
        render_conf(&report);
    }
    Ok(report)
}

fn render_conf(report: &ConfReport) {
    for attr in &report.attributes {
        print_report_line(&attr.attribute, attr.passed);
        if !attr.passed {
            if let Some(detail) = &attr.detail {
                print_status(Status::Fail, &ind(detail, 4));
            }
            for item in &attr.missing {
                print_status(Status::Fail, &ind(item, 5));
            }
        }
    }
    let (status, verdict) = verdict_of(report.passed);
    print_status(status, &format!("{}\n", ind(&format!("nix.conf: {verdict}"), 1)));
}

fn run_hook_flow(cli: &Cli) -> anyhow::Result<HookReport> {
    if !cli.json {
        print_status(Status::Neutral, &ind("Checking direnv...", 1));
    }
    let home = dirs::home_dir().context("locate home directory")?;
    let attended = !cli.json && dialoguer::console::user_attended();
    let decide = {
        let json = cli.json;
        let inner = interactive_decision(cli.yes, attended);
        move |status: &ToolStatus| {
            if !json {
                match status {
                    ToolStatus::Stale(version) => print_status(
                        Status::Fail,
                        &ind(
                            &format!("* direnv {version} is below the required version (2.30+)."),
                            2,
                        ),
                    ),
                    ToolStatus::NotFound => {
                        print_status(Status::Fail, &ind("* direnv is not installed.", 2))
                    }
                    ToolStatus::UpToDate(_) => {}
                }
            }
            inner(status)
        }
    };
    let report = run_hooks_check(&home, platform(), decide);
    if !cli.json {
        render_hooks(&report);
    }
    Ok(report)
}

fn render_hooks(report: &HookReport) {
    if report.tool_status == "ok" {
        if let Some(version) = &report.version {
            print_status(Status::Pass, &ind(&format!("* direnv version: {version}"), 2));
        }
    } else if report.installed {
        print_status(Status::Neutral, &ind("direnv installed successfully.", 2));
    }
    if let Some(err) = &report.install_error {
        print_status(
            Status::Fail,
            &ind(&format!("direnv installation failed with {err}"), 2),
        );
    }
    for outcome in &report.dotfiles {
        if outcome.status == "configured" {
            print_status(
                Status::Neutral,
                &ind(&format!("* direnv hook added to '{}'", outcome.dotfile), 2),
            );
        } else {
            print_status(
                Status::Fail,
                &ind(&format!("Unable to configure {} file", outcome.dotfile), 2),
            );
            if let Some(detail) = &outcome.detail {
                print_status(Status::Fail, &ind(detail, 4));
            }
        }
    }
    let (status, verdict) = verdict_of(report.ready);
    print_status(status, &ind(&format!("direnv: {verdict}"), 1));
}

fn verdict_of(passed: bool) -> (Status, &'static str) {
    if passed {
        (Status::Pass, "PASSED")
    } else {
        (Status::Fail, "FAILED")
    }
}

fn print_next_steps() {
    let message = [
        "All checks passed! Next steps:",
        "  1.) Open a new terminal window and enter your project directory.",
        "  2.) Enter `direnv allow` to build the dev environment.",
        "  3.) After the build completes, continue with your project's setup command.",
    ]
    .join("\n");
    println!("\n{}", ind(&message, 1));
}
