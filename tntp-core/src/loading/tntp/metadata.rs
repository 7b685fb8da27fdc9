//! Metadata block shared by TNTP network and demand files
//!
//! ```text
//! <NUMBER OF ZONES> 24
//! <NUMBER OF NODES> 24
//! <FIRST THRU NODE> 1
//! <NUMBER OF LINKS> 76
//! <END OF METADATA>
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::Error;

pub(crate) const NUMBER_OF_ZONES: &str = "<NUMBER OF ZONES>";
pub(crate) const NUMBER_OF_NODES: &str = "<NUMBER OF NODES>";
pub(crate) const NUMBER_OF_LINKS: &str = "<NUMBER OF LINKS>";
pub(crate) const FIRST_THRU_NODE: &str = "<FIRST THRU NODE>";
pub(crate) const TOTAL_OD_FLOW: &str = "<TOTAL OD FLOW>";
pub(crate) const END_OF_METADATA: &str = "<END OF METADATA>";

/// Values declared in a metadata block
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TntpMetadata {
    pub zones: Option<usize>,
    pub nodes: Option<usize>,
    pub links: Option<usize>,
    pub first_thru_node: Option<usize>,
    pub total_od_flow: Option<f64>,
}

impl TntpMetadata {
    /// Records the value of a recognised header line, ignores anything else
    pub fn read_line(&mut self, line: &str) -> Result<(), Error> {
        if let Some(value) = header_value(line, NUMBER_OF_ZONES)? {
            self.zones = Some(value);
        } else if let Some(value) = header_value(line, NUMBER_OF_NODES)? {
            self.nodes = Some(value);
        } else if let Some(value) = header_value(line, NUMBER_OF_LINKS)? {
            self.links = Some(value);
        } else if let Some(value) = header_value(line, FIRST_THRU_NODE)? {
            self.first_thru_node = Some(value);
        } else if let Some(value) = header_value(line, TOTAL_OD_FLOW)? {
            self.total_od_flow = Some(value);
        }
        Ok(())
    }

    /// Value of a header that must have been declared
    pub fn require(value: Option<usize>, header: &str) -> Result<usize, Error> {
        value.ok_or_else(|| Error::Format(format!("Metadata does not declare {header}")))
    }
}

/// Parses `<HEADER> value`, `None` when the line is another header
fn header_value<T: FromStr>(line: &str, header: &str) -> Result<Option<T>, Error> {
    let Some(raw) = line.strip_prefix(header) else {
        return Ok(None);
    };
    let raw = raw.trim();
    raw.parse()
        .map(Some)
        .map_err(|_| Error::Format(format!("Invalid value '{raw}' for {header}")))
}

pub(crate) fn is_end_of_metadata(line: &str) -> bool {
    line.starts_with(END_OF_METADATA)
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.starts_with('~')
}

/// Node and zone ids are integers registered by their decimal text, so `01` names node `1`
pub(crate) fn canonical_id(id: u64) -> String {
    id.to_string()
}

/// Canonical text of a raw id field, `None` when it is not an integer
pub(crate) fn parse_canonical_id(raw: &str) -> Option<String> {
    raw.parse().ok().map(canonical_id)
}

/// Opens `path` for line-by-line reading
pub(crate) fn open(path: &Path) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|source| Error::NamedFileIO {
        file: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Trimmed lines of `path` with their 1-based line numbers
pub(crate) fn trimmed_lines(
    path: &Path,
) -> Result<impl Iterator<Item = Result<(usize, String), Error>>, Error> {
    let reader = open(path)?;
    let file = path.to_path_buf();
    Ok(reader.lines().enumerate().map(move |(index, line)| {
        line.map(|line| (index + 1, line.trim().to_string()))
            .map_err(|source| Error::from(source).at(&file, index + 1))
    }))
}

/// Reads the metadata block of `path`, stopping at `<END OF METADATA>`
pub(crate) fn read_metadata(path: &Path) -> Result<TntpMetadata, Error> {
    let mut metadata = TntpMetadata::default();
    for line in trimmed_lines(path)? {
        let (line_number, line) = line?;
        if is_end_of_metadata(&line) {
            return Ok(metadata);
        }
        metadata
            .read_line(&line)
            .map_err(|e| e.at(path, line_number))?;
    }
    Err(Error::Format(format!(
        "'{}' has no {END_OF_METADATA} line",
        path.display()
    )))
}
