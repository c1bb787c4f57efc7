//! Reader for lake parameter files.
//!
//! Parses the whitespace-delimited text source holding one lake record per
//! grid cell and hands back [`LakeParameterRecord`]s by cell id.
//!
//! # File Format
//!
//! ```text
//! # cell max_depth nodes min_depth max_rate depth_in runoff_frac fractions...
//! 4021 9.0 5 1.0 0.02 4.5 0.8 0.12 0.10 0.07 0.04 0.01
//! 4022 6.0 3 0.5 0.02 3.0 0.6
//!      0.05 0.03 0.01
//! ```
//!
//! A record starts on a line whose first token is the integer cell id.
//! The profile tail is `nodes` area fractions for a tabulated profile, or
//! `footprint_fraction exponent` for the analytic one. Tokens may continue
//! on following lines. Text after `#` is a comment. Records for other
//! cells are stepped over by their token count, so a continuation line may
//! itself start with an integer.
//!
//! Searches move forward from the end of the previous record, so cells
//! must be requested in file order unless rewind is enabled.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::{debug, trace};

use super::constants::MAX_LAKE_NODES;
use super::params::{LakeParameterRecord, ProfileKind, ProfileSpec};
use crate::error::{LakeParamError, Result};

/// Forward-scanning cursor over a lake parameter source.
#[derive(Debug, Clone)]
pub struct LakeParamReader {
    lines: Vec<String>,
    /// Index of the next line to examine.
    cursor: usize,
    rewind: bool,
    max_nodes: usize,
}

impl LakeParamReader {
    /// Read a whole source into memory.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self::from_lines(lines))
    }

    /// Open a lake parameter file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a reader over in-memory text.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines().map(str::to_owned).collect())
    }

    fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: 0,
            rewind: false,
            max_nodes: MAX_LAKE_NODES,
        }
    }

    /// Restart every search from the top of the source.
    pub fn with_rewind(mut self, rewind: bool) -> Self {
        self.rewind = rewind;
        self
    }

    /// Largest node count accepted before the profile tail is read.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn set_max_nodes(&mut self, max_nodes: usize) {
        self.max_nodes = max_nodes;
    }

    /// Move the cursor back to the start of the source.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Number of lines in the source.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the source has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Locate and parse the record for `cell_id`.
    ///
    /// On success the cursor sits on the line after the record. Reaching
    /// the end of the source gives [`LakeParamError::CellNotFound`].
    pub fn find_record(&mut self, cell_id: i64, kind: ProfileKind) -> Result<LakeParameterRecord> {
        if self.rewind {
            self.rewind();
        }

        while self.cursor < self.lines.len() {
            let line_idx = self.cursor;
            self.cursor += 1;

            let first = match strip_comment(&self.lines[line_idx]).split_whitespace().next() {
                Some(token) => token,
                None => continue,
            };
            // Lines not led by an integer are record continuations.
            let id = match first.parse::<i64>() {
                Ok(id) => id,
                Err(_) => continue,
            };
            if id != cell_id {
                trace!("skipping lake record for cell {id}");
                if let Some(last) = self.skip_record(line_idx, kind) {
                    self.cursor = last + 1;
                }
                continue;
            }

            let mut tokens = Tokens::new(&self.lines, line_idx);
            tokens.next_token();
            let record = parse_record(&mut tokens, cell_id, kind, self.max_nodes)?;
            self.cursor = tokens.last_line() + 1;
            debug!(
                "found lake record for cell {} at line {} ({} nodes)",
                cell_id,
                line_idx + 1,
                record.node_count
            );
            return Ok(record);
        }

        Err(LakeParamError::CellNotFound { cell_id })
    }

    /// Last line of the record starting at `line_idx`, or `None` if the
    /// record is too malformed to measure.
    fn skip_record(&self, line_idx: usize, kind: ProfileKind) -> Option<usize> {
        let mut tokens = Tokens::new(&self.lines, line_idx);
        tokens.next_token()?;
        tokens.next_token()?;
        let node_count = tokens.next_token()?.parse::<usize>().ok()?;
        if node_count > self.max_nodes {
            return None;
        }
        let tail = match kind {
            ProfileKind::Tabulated => node_count,
            ProfileKind::Parabolic => 2,
        };
        // id, max_depth and node_count are consumed; four scalars and the tail remain.
        for _ in 0..4 + tail {
            tokens.next_token()?;
        }
        Some(tokens.last_line())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Token stream that continues across line breaks.
struct Tokens<'a> {
    lines: &'a [String],
    line: usize,
    pending: std::vec::IntoIter<&'a str>,
}

impl<'a> Tokens<'a> {
    fn new(lines: &'a [String], line: usize) -> Self {
        let pending = Self::split(lines, line);
        Self {
            lines,
            line,
            pending,
        }
    }

    fn split(lines: &'a [String], line: usize) -> std::vec::IntoIter<&'a str> {
        strip_comment(&lines[line])
            .split_whitespace()
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn next_token(&mut self) -> Option<&'a str> {
        loop {
            if let Some(token) = self.pending.next() {
                return Some(token);
            }
            if self.line + 1 >= self.lines.len() {
                return None;
            }
            self.line += 1;
            self.pending = Self::split(self.lines, self.line);
        }
    }

    fn last_line(&self) -> usize {
        self.line
    }

    fn next_value<T: FromStr>(&mut self, cell_id: i64, field: &str) -> Result<T> {
        let token = self.next_token().ok_or_else(|| LakeParamError::Parse {
            line: self.line + 1,
            message: format!("missing {field} for cell {cell_id}"),
        })?;
        token.parse::<T>().map_err(|_| LakeParamError::Parse {
            line: self.line + 1,
            message: format!("invalid {field} '{token}' for cell {cell_id}"),
        })
    }
}

fn parse_record(
    tokens: &mut Tokens<'_>,
    cell_id: i64,
    kind: ProfileKind,
    max_nodes: usize,
) -> Result<LakeParameterRecord> {
    let max_depth: f64 = tokens.next_value(cell_id, "max_depth")?;
    let node_count: usize = tokens.next_value(cell_id, "node_count")?;
    let min_depth: f64 = tokens.next_value(cell_id, "min_depth")?;
    let max_drawdown_rate: f64 = tokens.next_value(cell_id, "max_drawdown_rate")?;
    let initial_depth: f64 = tokens.next_value(cell_id, "initial_depth")?;
    let runoff_fraction: f64 = tokens.next_value(cell_id, "runoff_fraction")?;

    // The tail length depends on the node count, so bound it first.
    if node_count > max_nodes {
        return Err(LakeParamError::NodeCountExceedsLimit {
            node_count,
            max_nodes,
        });
    }

    let profile = match kind {
        ProfileKind::Tabulated => {
            let area_fractions = (0..node_count)
                .map(|i| tokens.next_value(cell_id, &format!("area fraction {i}")))
                .collect::<Result<Vec<f64>>>()?;
            ProfileSpec::Tabulated { area_fractions }
        }
        ProfileKind::Parabolic => ProfileSpec::Parabolic {
            footprint_fraction: tokens.next_value(cell_id, "footprint_fraction")?,
            exponent: tokens.next_value(cell_id, "exponent")?,
        },
    };

    Ok(LakeParameterRecord {
        cell_id,
        max_depth,
        node_count,
        min_depth,
        max_drawdown_rate,
        initial_depth,
        runoff_fraction,
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SOURCE: &str = "\
# cell max_depth nodes min_depth max_rate depth_in runoff_frac fractions
101 9.0 5 1.0 0.02 4.5 0.8 0.12 0.10 0.07 0.04 0.01
102 6.0 3 0.5 0.02 3.0 0.6
    0.05 0.03 0.01

205 4.0 2 0.2 0.01 2.0 0.0 0.3 0.1   # trailing comment
";

    #[test]
    fn reads_single_line_record() {
        let mut reader = LakeParamReader::from_text(SOURCE);
        let r = reader.find_record(101, ProfileKind::Tabulated).unwrap();
        assert_eq!(r.cell_id, 101);
        assert_eq!(r.max_depth, 9.0);
        assert_eq!(r.node_count, 5);
        assert_eq!(r.min_depth, 1.0);
        assert_eq!(r.max_drawdown_rate, 0.02);
        assert_eq!(r.initial_depth, 4.5);
        assert_eq!(r.runoff_fraction, 0.8);
        assert_eq!(
            r.profile,
            ProfileSpec::Tabulated {
                area_fractions: vec![0.12, 0.10, 0.07, 0.04, 0.01]
            }
        );
    }

    #[test]
    fn reads_record_continued_on_next_line() {
        let mut reader = LakeParamReader::from_text(SOURCE);
        let r = reader.find_record(102, ProfileKind::Tabulated).unwrap();
        assert_eq!(
            r.profile,
            ProfileSpec::Tabulated {
                area_fractions: vec![0.05, 0.03, 0.01]
            }
        );
    }

    #[test]
    fn scans_forward_through_cells_in_order() {
        let mut reader = LakeParamReader::from_text(SOURCE);
        assert_eq!(reader.find_record(101, ProfileKind::Tabulated).unwrap().cell_id, 101);
        assert_eq!(reader.find_record(102, ProfileKind::Tabulated).unwrap().cell_id, 102);
        let r = reader.find_record(205, ProfileKind::Tabulated).unwrap();
        assert_eq!(r.node_count, 2);
        assert_eq!(r.profile.footprint_fraction(), 0.3);
    }

    #[test]
    fn missing_cell_is_not_found() {
        let mut reader = LakeParamReader::from_text(SOURCE);
        assert!(matches!(
            reader.find_record(999, ProfileKind::Tabulated),
            Err(LakeParamError::CellNotFound { cell_id: 999 })
        ));
    }

    #[test]
    fn earlier_cell_not_found_without_rewind() {
        let mut reader = LakeParamReader::from_text(SOURCE);
        reader.find_record(205, ProfileKind::Tabulated).unwrap();
        assert!(matches!(
            reader.find_record(101, ProfileKind::Tabulated),
            Err(LakeParamError::CellNotFound { .. })
        ));
    }

    #[test]
    fn rewind_mode_finds_cells_out_of_order() {
        let mut reader = LakeParamReader::from_text(SOURCE).with_rewind(true);
        reader.find_record(205, ProfileKind::Tabulated).unwrap();
        assert_eq!(reader.find_record(101, ProfileKind::Tabulated).unwrap().cell_id, 101);
    }

    #[test]
    fn manual_rewind() {
        let mut reader = LakeParamReader::from_text(SOURCE);
        reader.find_record(205, ProfileKind::Tabulated).unwrap();
        reader.rewind();
        assert!(reader.find_record(102, ProfileKind::Tabulated).is_ok());
    }

    #[test]
    fn parabolic_tail() {
        let text = "7 12.0 6 2.0 0.05 8.0 1.0 0.15 2.5\n";
        let mut reader = LakeParamReader::from_text(text);
        let r = reader.find_record(7, ProfileKind::Parabolic).unwrap();
        assert_eq!(
            r.profile,
            ProfileSpec::Parabolic {
                footprint_fraction: 0.15,
                exponent: 2.5
            }
        );
    }

    #[test]
    fn invalid_token_reports_line() {
        let text = "1 5.0 3 1.0 0.02 2.0 0.5 0.1 0.05 0.01\n2 5.0 three 1.0 0.02 2.0 0.5\n";
        let mut reader = LakeParamReader::from_text(text);
        match reader.find_record(2, ProfileKind::Tabulated) {
            Err(LakeParamError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("node_count"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_is_parse_error() {
        let mut reader = LakeParamReader::from_text("3 5.0 3 1.0 0.02 2.0 0.5 0.1 0.05\n");
        assert!(matches!(
            reader.find_record(3, ProfileKind::Tabulated),
            Err(LakeParamError::Parse { .. })
        ));
    }

    #[test]
    fn oversized_node_count_rejected_before_tail() {
        let mut reader = LakeParamReader::from_text("4 30.0 50 1.0 0.02 2.0 0.5\n");
        assert!(matches!(
            reader.find_record(4, ProfileKind::Tabulated),
            Err(LakeParamError::NodeCountExceedsLimit {
                node_count: 50,
                max_nodes: MAX_LAKE_NODES
            })
        ));
    }

    #[test]
    fn skipped_record_with_integer_led_continuation() {
        // Line 2 continues cell 5 and starts with a fully covered node.
        let text = "5 5.0 3 1.0 0.02 2.0 0.5\n1 0.5 0.2\n1 5.0 3 1.0 0.02 2.0 0.5 0.3 0.2 0.1\n";
        let mut reader = LakeParamReader::from_text(text);
        let r = reader.find_record(1, ProfileKind::Tabulated).unwrap();
        assert_eq!(r.cell_id, 1);
        assert_eq!(
            r.profile,
            ProfileSpec::Tabulated {
                area_fractions: vec![0.3, 0.2, 0.1]
            }
        );
    }

    #[test]
    fn skipped_parabolic_record_with_integer_led_continuation() {
        let text = "8 6.0 4 1.0 0.02 2.0 0.5\n0 2.0\n0 6.0 4 1.0 0.02 2.0 0.5 0.1 3.0\n";
        let mut reader = LakeParamReader::from_text(text);
        let r = reader.find_record(0, ProfileKind::Parabolic).unwrap();
        assert_eq!(r.profile.footprint_fraction(), 0.1);
    }

    #[test]
    fn builder_node_limit() {
        let mut reader = LakeParamReader::from_text(SOURCE).with_max_nodes(3);
        assert!(matches!(
            reader.find_record(101, ProfileKind::Tabulated),
            Err(LakeParamError::NodeCountExceedsLimit {
                node_count: 5,
                max_nodes: 3
            })
        ));
        // A record within the limit further down is still reachable.
        assert_eq!(reader.find_record(102, ProfileKind::Tabulated).unwrap().node_count, 3);
    }

    #[test]
    fn reads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SOURCE}").unwrap();

        let mut reader = LakeParamReader::open(file.path()).unwrap();
        assert_eq!(reader.len(), 6);
        let r = reader.find_record(102, ProfileKind::Tabulated).unwrap();
        assert_eq!(r.node_count, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = LakeParamReader::open(Path::new("/nonexistent/lake_param.txt"));
        assert!(matches!(result, Err(LakeParamError::Io(_))));
    }
}
