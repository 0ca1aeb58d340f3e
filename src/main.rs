// loader: reads a policy artifact, builds a packed binary blob for one
// function, and installs it into an in-process enforcement engine registry.

#![allow(dead_code)]

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use libcall_sandbox::cli::{Cli, OutputFormat};
use libcall_sandbox::engine::Registry;
use libcall_sandbox::model::IdMode;
use libcall_sandbox::output::{self, LoadReport, EXIT_ARG_OR_PARSE_ERROR, EXIT_ENGINE_REJECTED, EXIT_SUCCESS};
use libcall_sandbox::wire::{self, PolicyArtifact};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap already printed usage/help to stdout/stderr as appropriate.
            let _ = e.print();
            return ExitCode::from(EXIT_ARG_OR_PARSE_ERROR as u8);
        }
    };

    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(Stage::ArgOrParse(err)) => {
            output::error(&format!("{err:#}"));
            ExitCode::from(EXIT_ARG_OR_PARSE_ERROR as u8)
        }
        Err(Stage::EngineRejected(err)) => {
            output::error(&format!("{err:#}"));
            ExitCode::from(EXIT_ENGINE_REJECTED as u8)
        }
    }
}

enum Stage {
    ArgOrParse(anyhow::Error),
    EngineRejected(anyhow::Error),
}

fn run(cli: &Cli) -> Result<i32, Stage> {
    let text = fs::read_to_string(&cli.artifact)
        .with_context(|| format!("cannot read {}", cli.artifact.display()))
        .map_err(Stage::ArgOrParse)?;

    let artifact: PolicyArtifact = serde_json::from_str(&text)
        .context("malformed policy artifact")
        .map_err(Stage::ArgOrParse)?;

    let id_mode = if cli.unique { IdMode::Unique } else { IdMode::Dummy };

    let blob = wire::build_blob(&artifact, cli.function_index, cli.pid, id_mode)
        .context("cannot build policy blob")
        .map_err(Stage::ArgOrParse)?;

    let func = wire::select_function(&artifact, cli.function_index)
        .map_err(|e| Stage::ArgOrParse(e.into()))?;
    let function_name = func.function_name.clone();

    let (header, edges) = wire::blob::decode(&blob)
        .context("cannot inspect policy blob")
        .map_err(Stage::ArgOrParse)?;

    let registry = Registry::new();
    registry
        .load_policy(&blob)
        .context("engine rejected policy")
        .map_err(Stage::EngineRejected)?;

    match cli.output {
        OutputFormat::Human => {
            output::success(&format!(
                "loaded policy for pid {} (function '{}', {} nodes, {} edges, {} mode)",
                cli.pid,
                function_name,
                header.num_nodes,
                header.num_edges,
                id_mode.as_str(),
            ));
        }
        OutputFormat::Json => {
            let report = LoadReport {
                pid: cli.pid,
                function_index: cli.function_index,
                function_name,
                id_mode: id_mode.as_str().to_string(),
                num_nodes: header.num_nodes,
                num_edges: edges.len() as u32,
            };
            println!(
                "{}",
                serde_json::to_string(&report)
                    .context("cannot serialize report")
                    .map_err(Stage::ArgOrParse)?
            );
        }
    }

    Ok(EXIT_SUCCESS)
}
