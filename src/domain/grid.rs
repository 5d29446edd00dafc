/// The fixed-size block grid.
///
/// Storage is a `GRID_SIZE x GRID_SIZE` array so the dimensions cannot
/// change after generation. Row index = y, column index = x.
/// Cells are mutated only through `set_kind()`, which rewrites the block
/// type and leaves the stored coordinates alone.

use super::tile::{Block, BlockType};

pub const GRID_SIZE: usize = 12;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: [[Block; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Build a grid by asking `kind_at(x, y)` for every cell.
    pub fn from_fn(mut kind_at: impl FnMut(usize, usize) -> BlockType) -> Self {
        let mut rows = [[Block::new(BlockType::Empty, 0, 0); GRID_SIZE]; GRID_SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = Block::new(kind_at(x, y), x, y);
            }
        }
        Grid { rows }
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE
    }

    #[inline]
    pub fn block(&self, x: usize, y: usize) -> Option<&Block> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    /// Block type at (x, y). Out of bounds reads as `None`.
    #[inline]
    pub fn kind_at(&self, x: usize, y: usize) -> Option<BlockType> {
        self.block(x, y).map(|b| b.kind)
    }

    /// Replace the block type at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_kind(&mut self, x: usize, y: usize, kind: BlockType) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            cell.kind = kind;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Block; GRID_SIZE]> {
        self.rows.iter()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    pub fn count(&self, kind: BlockType) -> usize {
        self.blocks().filter(|b| b.kind == kind).count()
    }
}

// ── Test diagrams ──
//
// Legend:  '.'=Empty  'g'=Grass  'd'=Dirt  's'=Stone
//          'w'=Wood   '*'=Diamond  '~'=Lava
// Missing rows and columns are filled with Empty.

#[cfg(test)]
impl Grid {
    pub fn from_rows(rows: &[&str]) -> Self {
        Grid::from_fn(|x, y| {
            let ch = rows.get(y).and_then(|r| r.chars().nth(x)).unwrap_or('.');
            match ch {
                'g' => BlockType::Grass,
                'd' => BlockType::Dirt,
                's' => BlockType::Stone,
                'w' => BlockType::Wood,
                '*' => BlockType::Diamond,
                '~' => BlockType::Lava,
                _ => BlockType::Empty,
            }
        })
    }
}
