// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Invocation of the external borrow analyzer (`rust-life`, executable `extract-error`).
//!
//! The runner only promises capture: stdout, stderr and the exit code come back regardless of
//! exit status, and only a failure to spawn at all propagates as an error. Whether a non-zero
//! exit is worth aborting over is the caller's call.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::process::Command;

use crate::model::RunOutput;

const TOOL_HOME_DIR_NAME: &str = ".rust-life";
const ANALYZER_EXE_NAME: &str = "extract-error";
const ARTIFACT_DIR_NAME: &str = "nll-facts";
const ARTIFACT_FILE_NAME: &str = "error_graph.json";

/// The toolchain the analyzer build is pinned against. Linux x86_64 only, like the analyzer
/// itself.
pub const DEFAULT_TOOLCHAIN: &str = "nightly-2019-05-21-x86_64-unknown-linux-gnu";

/// Locations the analyzer needs: its home directory (working dir and artifact drop site), the
/// executable inside it, and the sysroot of the matching toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    home: PathBuf,
    executable: PathBuf,
    sysroot: PathBuf,
}

impl AnalyzerConfig {
    pub fn new(home: impl Into<PathBuf>, sysroot: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let executable = home.join(ANALYZER_EXE_NAME);
        Self {
            home,
            executable,
            sysroot: sysroot.into(),
        }
    }

    /// The stock layout under a user home: `~/.rust-life` next to the pinned rustup toolchain.
    pub fn from_user_home(user_home: &Path) -> Self {
        Self::new(
            user_home.join(TOOL_HOME_DIR_NAME),
            user_home.join(".rustup").join("toolchains").join(DEFAULT_TOOLCHAIN),
        )
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn sysroot(&self) -> &Path {
        &self.sysroot
    }

    /// Library directory of the toolchain; exported as `LD_LIBRARY_PATH` for the analyzer.
    pub fn lib_dir(&self) -> PathBuf {
        self.sysroot.join("lib")
    }

    /// Fixed, well-known path the analyzer dumps its JSON artifact to.
    pub fn artifact_path(&self) -> PathBuf {
        self.home.join(ARTIFACT_DIR_NAME).join(ARTIFACT_FILE_NAME)
    }
}

#[derive(Debug)]
pub enum RunnerError {
    Spawn { program: PathBuf, source: io::Error },
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "cannot spawn analyzer {program:?}: {source}")
            }
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
        }
    }
}

/// Runs the analyzer on one source file and captures its output.
///
/// Invocation contract: `extract-error --sysroot <sysroot> <source_file>`, cwd = the tool home,
/// environment = the inherited search path plus `RUST_BACKTRACE=1` and an `LD_LIBRARY_PATH`
/// pointing at the matching toolchain's `lib` directory.
pub async fn run_analyzer(
    config: &AnalyzerConfig,
    source_file: &Path,
) -> Result<RunOutput, RunnerError> {
    tracing::debug!(
        program = ?config.executable(),
        sysroot = ?config.sysroot(),
        source = ?source_file,
        "running the borrow analyzer"
    );
    let started = Instant::now();

    let output = Command::new(config.executable())
        .arg("--sysroot")
        .arg(config.sysroot())
        .arg(source_file)
        .current_dir(config.home())
        .env("RUST_BACKTRACE", "1")
        .env("LD_LIBRARY_PATH", config.lib_dir())
        .output()
        .await
        .map_err(|source| RunnerError::Spawn {
            program: config.executable().to_path_buf(),
            source,
        })?;

    let run = RunOutput::new(
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.code(),
    );

    tracing::info!(
        code = ?run.code(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "borrow analyzer terminated"
    );
    tracing::debug!(stdout = %run.stdout(), stderr = %run.stderr(), "analyzer output");

    Ok(run)
}
