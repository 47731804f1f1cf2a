// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{ErrorGraph, Region};

static LET_BINDING: OnceLock<Regex> = OnceLock::new();
static LET_MUT_BINDING: OnceLock<Regex> = OnceLock::new();

fn let_binding() -> &'static Regex {
    LET_BINDING.get_or_init(|| Regex::new(r"let\s+(\w+)").expect("valid let pattern"))
}

fn let_mut_binding() -> &'static Regex {
    LET_MUT_BINDING.get_or_init(|| Regex::new(r"let\s+mut\s+(\w+)").expect("valid let mut pattern"))
}

/// Best-effort name and defining line for the local behind a region.
///
/// `line_nr == 0` with an empty `name` means "unresolved"; callers degrade the rendered label
/// and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedLocal {
    pub line_nr: usize,
    pub name: String,
}

impl ResolvedLocal {
    pub fn is_resolved_line(&self) -> bool {
        self.line_nr >= 1
    }
}

/// Recovers the binding name and defining line for `region`.
///
/// The structured locals entry wins when it carries a real line number. Otherwise the first
/// source line attributed to the region supplies the line, and its text is matched against a
/// binding declaration to recover a name: `let <ident>`, retried as `let mut <ident>` when the
/// first capture is the `mut` qualifier itself. The heuristic is allowed to be wrong; it only
/// exists to keep partially-incomplete artifacts useful.
pub fn resolve_local(graph: &ErrorGraph, region: Region) -> ResolvedLocal {
    if let Some(info) = graph.locals_info(region) {
        if info.line_nr >= 1 {
            return ResolvedLocal {
                line_nr: info.line_nr as usize,
                name: info.name.clone(),
            };
        }
    }

    let Some(first_line) = graph.region_lines(region).first() else {
        return ResolvedLocal::default();
    };

    ResolvedLocal {
        line_nr: first_line.line_nr,
        name: binding_name_from_line(&first_line.text).unwrap_or_default(),
    }
}

fn binding_name_from_line(text: &str) -> Option<String> {
    let captures = let_binding().captures(text)?;
    let token = captures.get(1)?.as_str();

    if token != "mut" {
        return Some(token.to_owned());
    }

    let captures = let_mut_binding().captures(text)?;
    Some(captures.get(1)?.as_str().to_owned())
}
