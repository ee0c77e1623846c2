//! Classic seed patterns, stored as offsets around a center cell.

/// Predefined patterns for populating an arena.
pub enum Pattern {
    /// Period-2 oscillator, three cells in a vertical line.
    Blinker,
    /// 2x2 still life.
    Block,
    /// The small diagonal spaceship.
    Glider,
}

impl Pattern {
    /// Cell offsets relative to the pattern's center position.
    pub fn offsets(&self) -> &'static [(i64, i64)] {
        match self {
            Pattern::Blinker => &[(0, -1), (0, 0), (0, 1)],
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    /// Resolve the pattern to cell indices for a square grid of side `size`,
    /// centered at `(cx, cy)`. Cells falling outside the grid are dropped.
    pub fn indices(&self, size: usize, cx: usize, cy: usize) -> Vec<usize> {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| (cx as i64 + dx, cy as i64 + dy))
            .filter(|&(x, y)| x >= 0 && y >= 0 && x < size as i64 && y < size as i64)
            .map(|(x, y)| y as usize * size + x as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinker_resolves_to_a_vertical_line() {
        let indices = Pattern::Blinker.indices(7, 3, 3);
        assert_eq!(indices, vec![2 * 7 + 3, 3 * 7 + 3, 4 * 7 + 3]);
    }

    #[test]
    fn cells_outside_the_grid_are_dropped() {
        // Centered in the top-left corner, the blinker loses its upper cell.
        let indices = Pattern::Blinker.indices(7, 0, 0);
        assert_eq!(indices, vec![0, 7]);
    }
}
