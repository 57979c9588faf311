//! Precomputed peer adjacency for all 81 cells.

use std::ops::Index;

use crate::{CellIndex, CellSet};

/// The peer sets of a single cell.
///
/// `row`, `col`, and `boxp` each hold the 8 other cells of that house;
/// `all` is their union plus the cell itself (21 cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPeers {
    /// The other 8 cells of this cell's row.
    pub row: CellSet,
    /// The other 8 cells of this cell's column.
    pub col: CellSet,
    /// The other 8 cells of this cell's box.
    pub boxp: CellSet,
    /// Every cell sharing a house with this cell, including the cell itself.
    pub all: CellSet,
}

/// Row/column/box adjacency for every cell, fixed by grid geometry.
///
/// Computed once per session and treated as read-only thereafter.
///
/// # Examples
///
/// ```
/// use gridtap_core::{CellIndex, PeerTable};
///
/// let peers = PeerTable::new();
/// let corner = CellIndex::new(0);
/// assert_eq!(peers[corner].row.len(), 8);
/// assert_eq!(peers[corner].all.len(), 21);
/// assert!(!peers[corner].row.contains(corner));
/// assert!(peers[corner].all.contains(corner));
/// ```
#[derive(Debug, Clone)]
pub struct PeerTable {
    peers: Box<[CellPeers; 81]>,
}

impl PeerTable {
    /// Computes the full peer table.
    #[must_use]
    pub fn new() -> Self {
        let mut peers = Vec::with_capacity(CellIndex::COUNT);
        for cell in CellIndex::all() {
            let mut row = CellSet::EMPTY;
            let mut col = CellSet::EMPTY;
            let mut boxp = CellSet::EMPTY;
            let mut all = CellSet::single(cell);
            for other in CellIndex::all() {
                if other == cell {
                    continue;
                }
                if other.row() == cell.row() {
                    row.insert(other);
                }
                if other.col() == cell.col() {
                    col.insert(other);
                }
                if other.box_index() == cell.box_index() {
                    boxp.insert(other);
                }
            }
            all |= row | col | boxp;
            peers.push(CellPeers {
                row,
                col,
                boxp,
                all,
            });
        }
        let peers: Box<[CellPeers; 81]> = peers
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| unreachable!("81 cells were pushed"));
        Self { peers }
    }
}

impl Default for PeerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<CellIndex> for PeerTable {
    type Output = CellPeers;

    fn index(&self, cell: CellIndex) -> &CellPeers {
        &self.peers[cell.as_usize()]
    }
}
