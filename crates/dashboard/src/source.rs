// SPDX-License-Identifier: MIT

//! Source window construction.
//!
//! On a `stop` event whose location carries an absolute path, the
//! dashboard reads the full file, splits it into lines, and keeps a
//! `±radius` window around the stop line. The actual read goes through the
//! [`SourceLoader`] trait so it can be swapped out in tests; [`FsLoader`] is
//! the ordinary filesystem-backed implementation the dashboard binary uses.

use std::path::{Path, PathBuf};

use cogdbg_core::{SOURCE_LINE_MAX_BYTES, SOURCE_WINDOW_MAX_LINES, SOURCE_WINDOW_RADIUS};

/// One numbered line in a source window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub line_num: u32,
    pub text: String,
    pub is_current: bool,
}

/// A `±radius` neighborhood of source lines around a stop location.
#[derive(Debug, Clone)]
pub struct SourceWindow {
    pub path: PathBuf,
    pub lines: Vec<SourceLine>,
    /// Index into `lines` of the line matching the stop location.
    pub current_idx: usize,
    /// First visible row of `lines` in the source pane.
    pub scroll: usize,
}

impl SourceWindow {
    /// Clamp `scroll` against `lines.len()` and a given pane height.
    pub fn clamp_scroll(&mut self, visible_rows: usize) {
        let max = self.lines.len().saturating_sub(visible_rows);
        self.scroll = self.scroll.min(max);
    }

    /// Re-center the viewport on `current_idx`, clamped to content bounds.
    /// Called on a fresh stop and whenever the focused session changes.
    pub fn recenter(&mut self, visible_rows: usize) {
        self.scroll = self.current_idx.saturating_sub(visible_rows / 2);
        self.clamp_scroll(visible_rows);
    }
}

/// The source-file loading contract. Only absolute paths are ever looked
/// up; a relative path leaves the view without a source window.
pub trait SourceLoader: Send + Sync {
    /// Read `path` and return its lines, in order. `Err` (including "file
    /// not found") means no source window is built for this stop.
    fn load(&self, path: &Path) -> std::io::Result<Vec<String>>;
}

/// Reads real files off disk. Binary safety is not required — lines are
/// truncated, not validated as UTF-8-safe beyond `String::from_utf8_lossy`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> std::io::Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.lines().map(str::to_owned).collect())
    }
}

/// Build a source window around `current_line` (1-indexed), or `None` if
/// `path` is not absolute or could not be loaded.
pub fn build_window(
    loader: &dyn SourceLoader,
    path: &Path,
    current_line: u32,
    visible_rows: usize,
) -> Option<SourceWindow> {
    if !path.is_absolute() {
        return None;
    }
    let file_lines = loader.load(path).ok()?;
    if file_lines.is_empty() {
        return None;
    }

    let total = file_lines.len() as u32;
    let center = current_line.clamp(1, total);
    let start = center.saturating_sub(SOURCE_WINDOW_RADIUS as u32).max(1);
    let end = (start + SOURCE_WINDOW_MAX_LINES as u32 - 1).min(total);

    let mut lines = Vec::with_capacity((end - start + 1) as usize);
    let mut current_idx = 0;
    for (offset, raw) in file_lines[(start as usize - 1)..end as usize].iter().enumerate() {
        let line_num = start + offset as u32;
        let is_current = line_num == center;
        if is_current {
            current_idx = offset;
        }
        lines.push(SourceLine {
            line_num,
            text: truncate(raw),
            is_current,
        });
    }

    let mut window = SourceWindow {
        path: path.to_owned(),
        lines,
        current_idx,
        scroll: 0,
    };
    window.recenter(visible_rows);
    Some(window)
}

fn truncate(line: &str) -> String {
    if line.len() <= SOURCE_LINE_MAX_BYTES {
        return line.to_owned();
    }
    let mut end = SOURCE_LINE_MAX_BYTES;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].to_owned()
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
