//! Reading, writing and diffing ttx snapshots

use std::{fs, io, path::Path};

use similar::TextDiff;
use write_fonts::types::Tag;

use crate::{ttx::TableDumper, Error};

/// The previous and freshly generated contents of one snapshot file.
///
/// Lines are normalized by [`read_ttx`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub previous: Vec<String>,
    pub new: Vec<String>,
}

impl Snapshot {
    /// A unified diff from the previous to the new contents.
    ///
    /// Returns `None` if there was no previous snapshot, or if nothing changed.
    pub fn diff(&self) -> Option<String> {
        if self.previous.is_empty() || self.previous == self.new {
            return None;
        }
        let previous = join_lines(&self.previous);
        let new = join_lines(&self.new);
        let diff = TextDiff::from_lines(&previous, &new)
            .unified_diff()
            .context_radius(3)
            .header("previous", "new")
            .to_string();
        Some(diff)
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Read a ttx file as a list of lines, or nothing if it does not exist.
///
/// Trailing whitespace is trimmed, and the `<ttFont ...>` element is reduced
/// to a bare `<ttFont>`, since its `ttLibVersion` attribute changes with the
/// fontTools release and says nothing about the tables.
pub fn read_ttx(path: &Path) -> Result<Vec<String>, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(Error::FileIo {
                path: path.to_owned(),
                source,
            })
        }
    };
    Ok(contents.lines().map(normalize_line).collect())
}

fn normalize_line(line: &str) -> String {
    if line.starts_with("<ttFont ") {
        "<ttFont>".to_string()
    } else {
        line.trim_end().to_string()
    }
}

/// Serialize `tables` from `font` into the snapshot at `to_path`.
///
/// Whatever was at `to_path` before is read first and returned alongside the
/// new contents. The file is always overwritten.
pub fn write_snapshot(
    dumper: &dyn TableDumper,
    font: &Path,
    tables: &[Tag],
    to_path: &Path,
) -> Result<Snapshot, Error> {
    let previous = read_ttx(to_path)?;
    dumper.dump(font, tables, to_path)?;
    let new = read_ttx(to_path)?;
    Ok(Snapshot { previous, new })
}
