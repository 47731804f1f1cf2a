// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lifeline CLI entrypoint.
//!
//! Runs the external borrow analyzer on one Rust source file and writes the rendered
//! explanation document to `--output` or stdout. Diagram mode is the default; `--narrative`
//! selects the prose rendering.

use std::error::Error;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--narrative] [--home <dir>] [--sysroot <dir>] [--output <file>] <source.rs>\n\nRuns the rust-life analyzer (extract-error) on <source.rs> and writes a self-contained\nHTML explanation of the reported borrow chain.\n\n--narrative renders the prose explanation instead of the diagram.\n--home overrides the analyzer home directory (default ~/.rust-life).\n--sysroot overrides the toolchain sysroot passed to the analyzer.\n--output writes the document to a file instead of stdout."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    narrative: bool,
    home: Option<String>,
    sysroot: Option<String>,
    output: Option<String>,
    source: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--narrative" => {
                if options.narrative {
                    return Err(());
                }
                options.narrative = true;
            }
            "--home" => {
                if options.home.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.home = Some(dir);
            }
            "--sysroot" => {
                if options.sysroot.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.sysroot = Some(dir);
            }
            "--output" => {
                if options.output.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.output = Some(file);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.source.is_some() {
                    return Err(());
                }
                options.source = Some(arg);
            }
        }
    }

    if options.source.is_none() {
        return Err(());
    }

    Ok(options)
}

fn analyzer_config(options: &CliOptions) -> lifeline::runner::AnalyzerConfig {
    let user_home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let defaults = lifeline::runner::AnalyzerConfig::from_user_home(&user_home);

    let home = options
        .home
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| defaults.home().to_path_buf());
    let sysroot = options
        .sysroot
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| defaults.sysroot().to_path_buf());

    lifeline::runner::AnalyzerConfig::new(home, sysroot)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "lifeline".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = analyzer_config(&options);
        let source = PathBuf::from(options.source.as_deref().expect("source is required"));
        let mode = if options.narrative {
            lifeline::render::RenderMode::Narrative
        } else {
            lifeline::render::RenderMode::Diagram
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        let visualization =
            match runtime.block_on(lifeline::surface::visualize(&config, &source, mode)) {
                Ok(visualization) => visualization,
                Err(err) if err.is_silent_skip() => {
                    // Not a Rust document; the skip was already logged.
                    return Ok(());
                }
                Err(err) => return Err(Box::new(err)),
            };

        match options.output.as_deref() {
            Some(path) => std::fs::write(path, visualization.html())?,
            None => {
                use std::io::Write as _;
                std::io::stdout().write_all(visualization.html().as_bytes())?;
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("lifeline: {err}");
        std::process::exit(1);
    }
}
