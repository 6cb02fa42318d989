use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use client_core::{
    FormController, FormEvent, HttpPredictionService, PredictionService, SubmitOutcome,
};
use shared::domain::{
    education_codes, FormSchema, AREA_FIELD, AREA_OPTIONS, EDUCATION_FIELD, QUARTER_FIELD,
    QUARTER_OPTIONS, SEX_FIELD, SEX_OPTIONS, YEAR_FIELD,
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod terminal;

use config::load_settings;
use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "lfpr", about = "Labour force participation rate prediction client")]
struct Cli {
    /// Base URL of the prediction service.
    #[arg(long, global = true)]
    service_url: Option<String>,
    /// Settings file; defaults to ./lfpr.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Refuse to submit while any field fails validation.
    #[arg(long, global = true)]
    gate_submit: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill the form from flags and submit it once.
    Predict(PredictArgs),
    /// Show the model behind the prediction service.
    ModelInfo,
    /// Drive the form with line commands read from stdin.
    Interactive,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Buddhist-calendar year, e.g. 2567.
    #[arg(long)]
    year: Option<String>,
    #[arg(long, help = education_help())]
    education: Option<String>,
    #[arg(long, help = area_help())]
    area: Option<String>,
    #[arg(long, help = sex_help())]
    sex: Option<String>,
    #[arg(long, help = quarter_help())]
    quarter: Option<String>,
    /// Start from the sample values before applying other flags.
    #[arg(long)]
    sample: bool,
}

fn education_help() -> String {
    let codes: Vec<String> = education_codes()
        .map(|(code, label)| format!("{code}={label}"))
        .collect();
    format!("Education level code: {}", codes.join(" | "))
}

fn area_help() -> String {
    format!("Area: {}", AREA_OPTIONS.join(" | "))
}

fn sex_help() -> String {
    format!("Sex: {}", SEX_OPTIONS.join(" | "))
}

fn quarter_help() -> String {
    format!("Quarter: {}", QUARTER_OPTIONS.join(" | "))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.service_url {
        settings.service_url = url;
    }
    if cli.gate_submit {
        settings.gate_submit = true;
    }
    info!(service_url = %settings.service_url, "prediction client starting");

    let service = Arc::new(HttpPredictionService::new(settings.service_config()));
    let schema = FormSchema::lfpr();
    let view = TerminalView::new(schema.defaults(), io::stdout());
    let mut controller =
        FormController::new(view, service, schema, settings.controller_config());

    match cli.command {
        Command::Predict(args) => predict(&mut controller, args).await,
        Command::ModelInfo => model_info(controller.service().as_ref()).await,
        Command::Interactive => {
            println!("{}", interactive::HELP);
            let stdin = BufReader::new(tokio::io::stdin());
            interactive::run(&mut controller, stdin).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn predict<W, S>(
    controller: &mut FormController<TerminalView<W>, S>,
    args: PredictArgs,
) -> Result<ExitCode>
where
    W: io::Write,
    S: PredictionService + ?Sized,
{
    if args.sample {
        controller.dispatch(FormEvent::LoadSample);
    }

    let edits = [
        (YEAR_FIELD, args.year),
        (EDUCATION_FIELD, args.education),
        (AREA_FIELD, args.area),
        (SEX_FIELD, args.sex),
        (QUARTER_FIELD, args.quarter),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            controller.dispatch(FormEvent::Input {
                field: field.to_string(),
                value,
            });
        }
    }

    // Blur validation is advisory: warnings print but the request still goes out.
    let fields: Vec<String> = controller
        .schema()
        .fields()
        .iter()
        .map(|field| field.name.clone())
        .collect();
    for field in fields {
        controller.dispatch(FormEvent::Blur { field });
    }

    let code = match controller.submit().await {
        Some(SubmitOutcome::Predicted { .. }) => ExitCode::SUCCESS,
        Some(_) => ExitCode::FAILURE,
        None => {
            controller
                .view_mut()
                .print_line("Submission refused; fix the fields above and retry.");
            ExitCode::from(2)
        }
    };
    Ok(code)
}

async fn model_info<S>(service: &S) -> Result<ExitCode>
where
    S: PredictionService + ?Sized,
{
    let info = service.model_info().await?;
    println!("Model: {}", info.model_type);
    println!(
        "Performance: R2 {:.4}, MAE {:.2}, RMSE {:.2}",
        info.performance.r2_score, info.performance.mae, info.performance.rmse
    );
    println!("Features ({}):", info.features.len());
    for feature in &info.features {
        println!("  {feature}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[path = "tests/interactive_tests.rs"]
mod interactive_tests;
