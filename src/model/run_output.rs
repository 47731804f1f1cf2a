// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Captured output of one analyzer invocation. Read-only; produced once per run.
///
/// `code` is `None` when the process died to a signal instead of exiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

impl RunOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            code,
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}
