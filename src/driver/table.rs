//! The mask table file read by the ocean model.
//!
//! ```text
//! <nmask>
//! <idiv>,<jdiv>
//! <i_1>,<j_1>
//! ...
//! ```
use crate::prelude::*;
use crate::types::{BlockId, Layout};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_TABLE_NAME: &str = "MOM_auto_mask_table";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("mask table is missing the {0}")]
    Truncated(&'static str),

    #[error("line {line}: expected {expected}, found {found:?}")]
    Malformed {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("mask table lists {found} blocks but announces {announced}")]
    CountMismatch { announced: usize, found: usize },

    #[error("block {block} lies outside of layout {layout}")]
    OutOfLayout { block: BlockId, layout: Layout },

    #[error("block {block} is listed more than once")]
    Duplicate { block: BlockId },

    #[error("masking {nmask} of {count} blocks leaves no task")]
    NothingLeft { nmask: usize, count: usize },
}

/// The blocks to drop from a layout so that exactly `layout.count() - blocks.len()` tasks remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskTable {
    pub layout: Layout,
    pub blocks: Vec<BlockId>,
}

impl MaskTable {
    /// Table for `npes` tasks, keeping the first `layout.count() - npes` eliminable blocks.
    pub fn new(layout: Layout, npes: usize, eliminable: &[BlockId]) -> Result<Self> {
        let count = layout.count();
        ensure!(
            npes <= count,
            "cannot run {} tasks on layout {} with only {} blocks",
            npes,
            layout,
            count
        );

        let nmask = count - npes;
        ensure!(
            nmask <= eliminable.len(),
            "layout {} needs {} masked blocks but only {} are eliminable",
            layout,
            nmask,
            eliminable.len()
        );

        Ok(Self {
            layout,
            blocks: eliminable[..nmask].to_vec(),
        })
    }

    pub fn nmask(&self) -> usize {
        self.blocks.len()
    }

    /// Number of tasks left after masking.
    pub fn npes(&self) -> usize {
        self.layout.count() - self.nmask()
    }

    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result {
        let file =
            File::create(path).with_context(|| format!("while creating {:?}", path))?;

        self.write_to(BufWriter::new(file))
            .with_context(|| format!("while writing {:?}", path))?;

        info!("wrote mask table with {} blocks to {:?}", self.nmask(), path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("while opening {:?}", path))?;

        content
            .parse()
            .with_context(|| format!("while parsing {:?}", path))
    }
}

impl Display for MaskTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.nmask())?;
        writeln!(f, "{}", self.layout)?;

        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }

        Ok(())
    }
}

fn parse_pair(
    line: usize,
    text: &str,
    expected: &'static str,
) -> Result<(usize, usize), TableError> {
    let malformed = || TableError::Malformed {
        line,
        expected,
        found: text.to_string(),
    };

    let (a, b) = text.split(',').collect_tuple().ok_or_else(malformed)?;
    let a = a.trim().parse().map_err(|_| malformed())?;
    let b = b.trim().parse().map_err(|_| malformed())?;

    Ok((a, b))
}

impl FromStr for MaskTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text.trim()))
            .filter(|(_, text)| !text.is_empty());

        let (line, text) = lines.next().ok_or(TableError::Truncated("block count"))?;
        let nmask: usize = text.parse().map_err(|_| TableError::Malformed {
            line,
            expected: "the number of masked blocks",
            found: text.to_string(),
        })?;

        let (line, text) = lines.next().ok_or(TableError::Truncated("layout"))?;
        let (idiv, jdiv) = parse_pair(line, text, "a layout `idiv,jdiv`")?;
        let layout = Layout::new(idiv, jdiv);

        if idiv == 0 || jdiv == 0 {
            return Err(TableError::Malformed {
                line,
                expected: "a layout with positive division counts",
                found: text.to_string(),
            });
        }

        let mut blocks = Vec::with_capacity(min(nmask, layout.count()));
        for (line, text) in lines {
            let (i, j) = parse_pair(line, text, "a block `i,j`")?;
            let block = BlockId::new(i, j);

            if !layout.contains(block) {
                return Err(TableError::OutOfLayout { block, layout });
            }

            if blocks.contains(&block) {
                return Err(TableError::Duplicate { block });
            }

            blocks.push(block);
        }

        if blocks.len() != nmask {
            return Err(TableError::CountMismatch {
                announced: nmask,
                found: blocks.len(),
            });
        }

        if nmask >= layout.count() {
            return Err(TableError::NothingLeft {
                nmask,
                count: layout.count(),
            });
        }

        Ok(Self { layout, blocks })
    }
}
