/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! stencil binary - format {{ name }} templates from the command line

mod cli;
mod config;
mod diagnostics;

use std::io::{IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use stencil_core::{ParameterSet, StencilError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;
use crate::config::{ParamSpec, StencilConfig, resolve_locale};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stencil=warn,stencil_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let source_name = args
        .file
        .as_ref()
        .map_or_else(|| "<template>".to_string(), |p| p.display().to_string());

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<StencilError>() {
                Some(StencilError::Parse(parse)) => {
                    let color = std::io::stderr().is_terminal();
                    eprint!(
                        "{}",
                        diagnostics::render_parse_error(parse, &source_name, color)
                    );
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => StencilConfig::load(path)?,
        None => StencilConfig::default(),
    };

    let locale = resolve_locale(args.locale.as_deref(), config.locale.as_ref(), |var| {
        std::env::var(var).ok()
    })?;

    let parameters = collect_parameters(config.params.into_iter(), args)?;
    let template = read_template(args)?;

    tracing::debug!(%locale, parameters = parameters.len(), "formatting template");
    Ok(stencil_core::format(&template, &locale, &parameters)?)
}

/// Merge config-file parameters with command-line ones and apply options.
fn collect_parameters(
    from_config: impl Iterator<Item = (String, ParamSpec)>,
    args: &Args,
) -> Result<ParameterSet> {
    let mut specs: Vec<(String, ParamSpec)> = from_config.collect();
    specs.extend(args.param_specs()?);

    // Options apply to the last definition of each name
    for name in &args.upper {
        match specs.iter_mut().rev().find(|(n, _)| n == name) {
            Some((_, spec)) => spec.set_uppercase(name)?,
            None => bail!("--upper refers to unknown parameter {name}"),
        }
    }
    for name in &args.prefixed {
        match specs.iter_mut().rev().find(|(n, _)| n == name) {
            Some((_, spec)) => spec.set_prefixed(name)?,
            None => bail!("--prefixed refers to unknown parameter {name}"),
        }
    }

    Ok(specs
        .iter()
        .map(|(name, spec)| spec.to_parameter(name))
        .collect())
}

fn read_template(args: &Args) -> Result<String> {
    if let Some(template) = &args.template {
        return Ok(template.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()));
    }

    let mut template = String::new();
    std::io::stdin()
        .read_to_string(&mut template)
        .context("Failed to read template from stdin")?;
    Ok(template)
}
