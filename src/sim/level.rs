//! Level catalogue
//!
//! Five fixed layouts. Each row is a string of cells:
//! `N` = normal brick, `S` = strong brick, `.` = empty.

use super::brick::Brick;
use super::vector::Vector2;
use crate::consts::*;
use crate::error::ConfigError;

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Normal,
    Strong,
}

impl Cell {
    fn from_char(c: char) -> Self {
        match c {
            'N' => Cell::Normal,
            'S' => Cell::Strong,
            _ => Cell::Empty,
        }
    }
}

/// An immutable brick layout
#[derive(Debug, Clone, Copy)]
pub struct LevelLayout {
    pub name: &'static str,
    rows: &'static [&'static str],
}

impl LevelLayout {
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Cells in row-major order with their (row, column)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(move |(col, c)| (row, col, Cell::from_char(c)))
        })
    }

    pub fn brick_count(&self) -> usize {
        self.cells().filter(|&(_, _, c)| c != Cell::Empty).count()
    }
}

pub const LEVELS: [LevelLayout; 5] = [
    LevelLayout {
        name: "Frame",
        rows: &[
            "NNNNNNNN",
            "N......N",
            "N.SSSS.N",
            "N......N",
            "NNNNNNNN",
        ],
    },
    LevelLayout {
        name: "Diamonds",
        rows: &[
            "S.NNNN.S",
            ".S.NN.S.",
            "N.S..S.N",
            ".S.NN.S.",
            "S.NNNN.S",
        ],
    },
    LevelLayout {
        name: "Checkerboard",
        rows: &[
            "NSNSNSNS",
            "SNSNSNSN",
            "NSNSNSNS",
            "SNSNSNSN",
            "NSNSNSNS",
        ],
    },
    LevelLayout {
        name: "Fortress",
        rows: &[
            "SSSSSSSS",
            "SNNNNNNS",
            "SNSSSSNS",
            "SNNNNNNS",
            "SSSSSSSS",
        ],
    },
    LevelLayout {
        name: "Core",
        rows: &[
            "..SSSS..",
            ".SSSSSS.",
            "SSSSSSSS",
            ".SSSSSS.",
            "..SSSS..",
        ],
    },
];

pub const LEVEL_COUNT: usize = LEVELS.len();

pub fn layout(index: usize) -> Result<&'static LevelLayout, ConfigError> {
    LEVELS.get(index).ok_or(ConfigError::LevelOutOfRange {
        index,
        count: LEVEL_COUNT,
    })
}

pub fn has_next_level(index: usize) -> bool {
    index + 1 < LEVEL_COUNT
}

/// Strong brick hit points for a level tier
pub fn strong_hit_points(level_index: usize) -> u32 {
    2 + (level_index / 2) as u32
}

/// Instantiate the bricks of a level, centred horizontally below the ceiling.
///
/// `next_id` is called once per brick, in row-major order.
pub fn build_bricks(
    level_index: usize,
    mut next_id: impl FnMut() -> u32,
) -> Result<Vec<Brick>, ConfigError> {
    let layout = layout(level_index)?;
    let cols = layout.columns() as f64;
    let total_width = cols * BRICK_WIDTH + (cols - 1.0).max(0.0) * BRICK_H_GAP;
    let start_x = (SCREEN_WIDTH - total_width) / 2.0;
    let start_y = UPPER_INSET + BRICK_GRID_TOP_OFFSET;
    let strong_hp = strong_hit_points(level_index);

    let bricks: Vec<Brick> = layout
        .cells()
        .filter_map(|(row, col, cell)| {
            let pos = Vector2::new(
                start_x + col as f64 * (BRICK_WIDTH + BRICK_H_GAP),
                start_y + row as f64 * (BRICK_HEIGHT + BRICK_V_GAP),
            );
            match cell {
                Cell::Empty => None,
                Cell::Normal => Some(Brick::normal(next_id(), pos)),
                Cell::Strong => Some(Brick::strong(next_id(), pos, strong_hp)),
            }
        })
        .collect();

    log::info!(
        "Level {} ({}) built with {} bricks",
        level_index + 1,
        layout.name,
        bricks.len()
    );
    Ok(bricks)
}
