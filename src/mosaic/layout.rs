use super::tier::SizeTier;

/// Grid auto-placement flavour, mirroring CSS `grid-auto-flow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packing {
    /// `row`: the placement cursor only moves forward, so reading order follows rank order.
    #[default]
    Sparse,
    /// `row dense`: every tile takes the first free slot from the top-left, filling holes.
    Dense,
}

/// Cell rectangle occupied by one tile, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    fn overlaps(&self, other: &Placement) -> bool {
        self.column < other.column + other.width
            && other.column < self.column + self.width
            && self.row < other.row + other.height
            && other.row < self.row + self.height
    }
}

/// Packed grid; `placements[i]` belongs to the i-th tile handed to [`MosaicLayout::pack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicLayout {
    columns: u32,
    rows: u32,
    placements: Vec<Placement>,
}

impl MosaicLayout {
    /// Place tiles in the given order. Footprints wider than the grid are clamped to it.
    pub fn pack(tiers: impl IntoIterator<Item = SizeTier>, columns: u32, packing: Packing) -> Self {
        let columns = columns.max(1);
        let mut grid = Occupancy::new(columns);
        let mut cursor = (0u32, 0u32);
        let mut placements = Vec::new();

        for tier in tiers {
            let (w, h) = tier.footprint();
            let (w, h) = (w.min(columns), h);

            let (mut row, mut column) = match packing {
                Packing::Sparse => cursor,
                Packing::Dense => (grid.first_open_row(), 0),
            };

            loop {
                if column + w > columns {
                    row += 1;
                    column = 0;
                    continue;
                }
                if grid.is_free(row, column, w, h) {
                    break;
                }
                column += 1;
            }

            let placement = Placement {
                column,
                row,
                width: w,
                height: h,
            };
            grid.fill(&placement);
            placements.push(placement);
            cursor = (row, column + w);
        }

        Self {
            columns,
            rows: grid.rows(),
            placements,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Whether no two tiles share a cell.
    pub fn is_non_overlapping(&self) -> bool {
        self.placements.iter().enumerate().all(|(i, a)| {
            self.placements[i + 1..]
                .iter()
                .all(|b| !a.overlaps(b))
        })
    }
}

/// Row-major cell occupancy, growing downwards on demand.
struct Occupancy {
    columns: u32,
    cells: Vec<Vec<bool>>,
}

impl Occupancy {
    fn new(columns: u32) -> Self {
        Self {
            columns,
            cells: Vec::new(),
        }
    }

    fn rows(&self) -> u32 {
        self.cells.len() as u32
    }

    fn is_taken(&self, row: u32, column: u32) -> bool {
        self.cells
            .get(row as usize)
            .is_some_and(|r| r[column as usize])
    }

    fn is_free(&self, row: u32, column: u32, width: u32, height: u32) -> bool {
        (row..row + height).all(|r| (column..column + width).all(|c| !self.is_taken(r, c)))
    }

    fn fill(&mut self, p: &Placement) {
        let needed = (p.row + p.height) as usize;
        if self.cells.len() < needed {
            self.cells.resize(needed, vec![false; self.columns as usize]);
        }
        for r in p.row..p.row + p.height {
            for c in p.column..p.column + p.width {
                self.cells[r as usize][c as usize] = true;
            }
        }
    }

    /// First row with at least one free cell.
    fn first_open_row(&self) -> u32 {
        self.cells
            .iter()
            .position(|r| r.iter().any(|taken| !taken))
            .unwrap_or(self.cells.len()) as u32
    }
}
