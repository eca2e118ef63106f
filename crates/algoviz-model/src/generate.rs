//! Random input generation.
//!
//! All generators take the RNG from the caller so a fixed seed reproduces the
//! same sequence and the same grid.

use rand::Rng;

use crate::coord::Coord;
use crate::error::Result;
use crate::grid::Grid;

/// Smallest generated sequence value.
pub const MIN_VALUE: i64 = 1;

/// Largest generated sequence value.
pub const MAX_VALUE: i64 = 100;

/// A sequence of `size` values in `MIN_VALUE..=MAX_VALUE`.
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<i64> {
    (0..size).map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE)).collect()
}

/// An empty `size x size` grid with random start and end markers.
///
/// The markers are at least `size / 3` cells apart (Manhattan), and never on
/// the same cell. A 1x1 grid only gets a start. Sides above
/// [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE) are rejected.
pub fn random_grid<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Result<Grid> {
    let mut grid = Grid::square(crate::check_grid_size(size)?)?;
    place_random_markers(rng, &mut grid)?;
    Ok(grid)
}

/// Replace the grid's start and end with random positions, keeping walls
/// out of the way.
pub fn place_random_markers<R: Rng + ?Sized>(rng: &mut R, grid: &mut Grid) -> Result<()> {
    grid.clear_markers();

    let (width, height) = (grid.width(), grid.height());
    if grid.len() == 1 {
        return grid.set_start(Coord::ORIGIN);
    }

    let min_distance = (width.min(height) / 3).max(1);
    loop {
        let start = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
        let end = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if start.manhattan(&end) >= min_distance {
            grid.set_start(start)?;
            grid.set_end(end)?;
            return Ok(());
        }
    }
}
