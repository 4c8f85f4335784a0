use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

use crate::cli::commands::{ClassifyArgs, NormalsArgs, OutputFormatArg};
use crate::cli::output::{OutputFormat, OutputFormatter};
use crate::config::NasalstageConfig;
use crate::severity::{predict_severity, ReferenceNormals, SeverityRequest};

/// Runs `classify` and returns the process exit code
pub fn handle_classify(args: &ClassifyArgs, config: &NasalstageConfig) -> i32 {
    match run_classify(args, config) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

/// Runs `normals` and returns the process exit code
pub fn handle_normals(args: &NormalsArgs, config: &NasalstageConfig) -> i32 {
    let result = resolve_format(args.format, config).and_then(|format| {
        OutputFormatter::new(format).format_normals(&ReferenceNormals::STANDARD)
    });

    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

/// Runs `config` and returns the process exit code
pub fn handle_config(args: &NormalsArgs, config: &NasalstageConfig) -> i32 {
    let result = resolve_format(args.format, config)
        .and_then(|format| OutputFormatter::new(format).format_config(config));

    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn run_classify(args: &ClassifyArgs, config: &NasalstageConfig) -> Result<()> {
    let format = resolve_format(args.format, config)?;
    let request = build_request(args)?;
    debug!(?request, "classifying");

    let result = predict_severity(&request);
    info!(
        stage = %result.stage,
        score = result.obstruction_score,
        "classification complete"
    );

    let output = OutputFormatter::new(format).format(&result)?;
    write_output(&output, args.output.as_deref())
}

/// Builds the request from `--input` or from the measurement flags
pub fn build_request(args: &ClassifyArgs) -> Result<SeverityRequest> {
    if let Some(ref input) = args.input {
        let request = if input.as_os_str() == "-" {
            SeverityRequest::from_reader(io::stdin().lock())
                .context("Failed to read request from stdin")?
        } else {
            SeverityRequest::from_file(input)
                .with_context(|| format!("Failed to load request {}", input.display()))?
        };
        return Ok(request);
    }

    let airway_cc = args
        .airway_cc
        .ok_or_else(|| anyhow!("--airway-cc is required without --input"))?;
    let volume_mm2 = args
        .volume_mm2
        .ok_or_else(|| anyhow!("--volume-mm2 is required without --input"))?;

    Ok(SeverityRequest::new(airway_cc, volume_mm2)
        .with_bmi(args.bmi)
        .with_mouth_breathing(args.mouth_breathing.into())
        .with_bruxism(args.bruxism.into()))
}

fn resolve_format(arg: Option<OutputFormatArg>, config: &NasalstageConfig) -> Result<OutputFormat> {
    match arg {
        Some(format) => Ok(format.into()),
        None => Ok(config.output_format()?),
    }
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "wrote classification");
        }
        None => println!("{}", output.trim_end()),
    }
    Ok(())
}
