//! Sixteen-way soil tile selection from 4-neighbour adjacency.

/// Which orthogonal neighbours of a cell are tilled. Out-of-bounds
/// neighbours count as not tilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Neighbors {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Neighbors {
    /// Bit layout: top = 1, right = 2, bottom = 4, left = 8.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            top: bits & 1 != 0,
            right: bits & 2 != 0,
            bottom: bits & 4 != 0,
            left: bits & 8 != 0,
        }
    }

    pub fn bits(self) -> u8 {
        self.top as u8 | (self.right as u8) << 1 | (self.bottom as u8) << 2 | (self.left as u8) << 3
    }
}

/// The sprite to draw for a tilled cell, named after the shape of the run it
/// sits in. Edge names describe which side of the run the cell closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileVariant {
    Alone,
    AllSides,
    /// Only the left neighbour is tilled: the right end of a horizontal run.
    RightEnd,
    /// Only the right neighbour is tilled.
    LeftEnd,
    Horizontal,
    /// Only the top neighbour is tilled: the bottom end of a vertical run.
    BottomEnd,
    TopEnd,
    Vertical,
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    NoLeft,
    NoRight,
    NoBottom,
    NoTop,
}

impl TileVariant {
    pub const ALL: [TileVariant; 16] = [
        TileVariant::Alone,
        TileVariant::AllSides,
        TileVariant::RightEnd,
        TileVariant::LeftEnd,
        TileVariant::Horizontal,
        TileVariant::BottomEnd,
        TileVariant::TopEnd,
        TileVariant::Vertical,
        TileVariant::TopRight,
        TileVariant::TopLeft,
        TileVariant::BottomRight,
        TileVariant::BottomLeft,
        TileVariant::NoLeft,
        TileVariant::NoRight,
        TileVariant::NoBottom,
        TileVariant::NoTop,
    ];

    pub fn from_neighbors(n: Neighbors) -> Self {
        let Neighbors { top: t, right: r, bottom: b, left: l } = n;
        match (t, r, b, l) {
            (false, false, false, false) => TileVariant::Alone,
            (true, true, true, true) => TileVariant::AllSides,

            // horizontal only
            (false, false, false, true) => TileVariant::RightEnd,
            (false, true, false, false) => TileVariant::LeftEnd,
            (false, true, false, true) => TileVariant::Horizontal,

            // vertical only
            (true, false, false, false) => TileVariant::BottomEnd,
            (false, false, true, false) => TileVariant::TopEnd,
            (true, false, true, false) => TileVariant::Vertical,

            // corners
            (false, false, true, true) => TileVariant::TopRight,
            (false, true, true, false) => TileVariant::TopLeft,
            (true, false, false, true) => TileVariant::BottomRight,
            (true, true, false, false) => TileVariant::BottomLeft,

            // T shapes
            (true, true, true, false) => TileVariant::NoLeft,
            (true, false, true, true) => TileVariant::NoRight,
            (true, true, false, true) => TileVariant::NoBottom,
            (false, true, true, true) => TileVariant::NoTop,
        }
    }

    /// Key of the soil sprite in the asset pack.
    pub fn asset_key(self) -> &'static str {
        match self {
            TileVariant::Alone => "o",
            TileVariant::AllSides => "x",
            TileVariant::RightEnd => "r",
            TileVariant::LeftEnd => "l",
            TileVariant::Horizontal => "lr",
            TileVariant::BottomEnd => "b",
            TileVariant::TopEnd => "t",
            TileVariant::Vertical => "tb",
            TileVariant::TopRight => "tr",
            TileVariant::TopLeft => "tl",
            TileVariant::BottomRight => "br",
            TileVariant::BottomLeft => "bl",
            TileVariant::NoLeft => "tbr",
            TileVariant::NoRight => "tbl",
            TileVariant::NoBottom => "lrb",
            TileVariant::NoTop => "lrt",
        }
    }
}
