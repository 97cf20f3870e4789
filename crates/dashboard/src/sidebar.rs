// SPDX-License-Identifier: MIT

//! Sidebar virtual list: frames, then a
//! "Locals" header and local variables, then a "Breakpoints" header and
//! breakpoints — each section omitted entirely if empty. Scrolling is by
//! virtual-item index over the flattened list below, not by section.

use cogdbg_core::{BreakpointInfo, StackFrame, Variable};

use crate::state::SessionView;

/// One row of the flattened sidebar list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Frame { index: u32, text: String },
    LocalsHeader,
    Local { text: String },
    BreakpointsHeader,
    Breakpoint { text: String },
}

/// Build the flattened row list for `view`. Scrolling and rendering both
/// index into this same vector, so a scroll offset always lands on a
/// coherent row regardless of which sections are present.
pub fn rows(view: &SessionView) -> Vec<SidebarRow> {
    let mut rows = Vec::new();

    for frame in &view.stack {
        rows.push(SidebarRow::Frame {
            index: frame.index,
            text: frame_text(frame),
        });
    }

    if !view.locals.is_empty() {
        rows.push(SidebarRow::LocalsHeader);
        for var in &view.locals {
            rows.push(SidebarRow::Local { text: local_text(var) });
        }
    }

    if !view.breakpoints.is_empty() {
        rows.push(SidebarRow::BreakpointsHeader);
        for bp in &view.breakpoints {
            rows.push(SidebarRow::Breakpoint { text: breakpoint_text(bp) });
        }
    }

    rows
}

fn frame_text(frame: &StackFrame) -> String {
    match &frame.location {
        Some(loc) => format!(
            "#{} {} ({}:{})",
            frame.index,
            frame.name,
            loc.file.display(),
            loc.line
        ),
        None => format!("#{} {}", frame.index, frame.name),
    }
}

fn local_text(var: &Variable) -> String {
    match &var.ty {
        Some(ty) => format!("{}: {} = {}", var.name, ty, var.value),
        None => format!("{} = {}", var.name, var.value),
    }
}

fn breakpoint_text(bp: &BreakpointInfo) -> String {
    let mark = if bp.verified { '*' } else { ' ' };
    format!("{mark}[{}] {}:{}", bp.id, bp.file.display(), bp.line)
}

#[cfg(test)]
#[path = "sidebar_tests.rs"]
mod tests;
