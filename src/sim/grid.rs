//! Uniform spatial grid over the brick field
//!
//! Each brick is registered in the cell holding its top-left corner. Bricks
//! are never wider or taller than a cell, so the 3x3 neighbourhood around a
//! point covers every brick that can contain it.

use glam::Vec2;

use super::brick::BrickField;

/// Lookup structure from grid cell to brick indices
#[derive(Debug, Clone, Default)]
pub struct GridIndex {
    cell_size: f32,
    cols: i32,
    rows: i32,
    /// Column-major cells of indices into the brick field
    cells: Vec<Vec<usize>>,
}

impl GridIndex {
    /// Build an index covering a canvas
    pub fn build(
        field: &BrickField,
        cell_size: f32,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Self {
        let cols = (canvas_width / cell_size).ceil().max(1.0) as i32;
        let rows = (canvas_height / cell_size).ceil().max(1.0) as i32;
        let mut grid = Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); (cols * rows) as usize],
        };

        for (idx, brick) in field.bricks().iter().enumerate() {
            let (cx, cy) = grid.cell_of(Vec2::new(brick.x, brick.y));
            match grid.cell_index(cx, cy) {
                Some(cell) => grid.cells[cell].push(idx),
                None => log::warn!(
                    "Brick {} at ({}, {}) is outside the canvas grid",
                    idx,
                    brick.x,
                    brick.y
                ),
            }
        }
        grid
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    /// Cell coordinates of a point (may be out of range)
    #[inline]
    pub fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    #[inline]
    fn cell_index(&self, cx: i32, cy: i32) -> Option<usize> {
        if cx >= 0 && cx < self.cols && cy >= 0 && cy < self.rows {
            Some((cx * self.rows + cy) as usize)
        } else {
            None
        }
    }

    /// Brick indices registered in one cell
    pub fn cell(&self, cx: i32, cy: i32) -> &[usize] {
        self.cell_index(cx, cy)
            .map(|i| self.cells[i].as_slice())
            .unwrap_or(&[])
    }

    /// Brick indices registered in the 3x3 cells around `p`
    pub fn neighbors(&self, p: Vec2) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.cell_of(p);
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| (cx + dx, cy + dy)))
            .flat_map(move |(x, y)| self.cell(x, y).iter().copied())
    }

    /// Total registrations (equals the brick count when all fit the canvas)
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn setup() -> (BrickField, GridIndex) {
        let config = Config::default();
        let field = BrickField::layout(&config, 600.0, 700.0);
        let grid = GridIndex::build(&field, config.grid_cell_size(), 600.0, 700.0);
        (field, grid)
    }

    #[test]
    fn test_every_brick_registered_once() {
        let (field, grid) = setup();
        assert_eq!(grid.len(), field.len());
        assert_eq!(grid.dimensions(), (22, 25));
    }

    #[test]
    fn test_neighbors_cover_containing_brick() {
        let (field, grid) = setup();
        for (idx, brick) in field.bricks().iter().enumerate() {
            // Probe near the far corner, the worst case for corner registration
            let p = Vec2::new(brick.x + brick.width - 0.5, brick.y + brick.height - 0.5);
            assert!(
                grid.neighbors(p).any(|i| i == idx),
                "brick {} not found around {:?}",
                idx,
                p
            );
        }
    }

    #[test]
    fn test_out_of_range_cells_are_empty() {
        let (_, grid) = setup();
        assert!(grid.cell(-1, 0).is_empty());
        assert!(grid.cell(0, 1000).is_empty());
        assert_eq!(grid.neighbors(Vec2::new(-500.0, -500.0)).count(), 0);
    }

    #[test]
    fn test_far_from_bricks_has_no_neighbors() {
        let (_, grid) = setup();
        assert_eq!(grid.neighbors(Vec2::new(300.0, 650.0)).count(), 0);
    }
}
