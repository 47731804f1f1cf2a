// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only computations over the error graph.

pub mod locals;
pub mod path;

pub use locals::{resolve_local, ResolvedLocal};
pub use path::{find_source_node, find_successor, reconstruct_path};
