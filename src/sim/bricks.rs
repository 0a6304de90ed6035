//! Brick grid for the active level

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::geometry::Rect;
use super::levels::Layout;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// A single brick; bounds are derived from its grid cell once at load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub status: BrickStatus,
    pub color: Color,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }
}

/// Top-left corner of the brick at `(row, col)`
pub fn brick_origin(row: usize, col: usize) -> Vec2 {
    Vec2::new(
        col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
        row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
    )
}

/// Row-major grid of bricks, replaced wholesale on level load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a fresh grid from a layout, giving every live brick a random color
    pub fn from_layout<R: Rng + ?Sized>(layout: Layout, rng: &mut R) -> Self {
        let rows = layout.len();
        let cols = layout.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut bricks = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let alive = layout[row].get(col).is_some_and(|&cell| cell != 0);
                let origin = brick_origin(row, col);
                bricks.push(Brick {
                    row,
                    col,
                    rect: Rect::new(origin.x, origin.y, BRICK_WIDTH, BRICK_HEIGHT),
                    status: if alive {
                        BrickStatus::Alive
                    } else {
                        BrickStatus::Destroyed
                    },
                    color: if alive {
                        Color::random(rng)
                    } else {
                        Color::default()
                    },
                });
            }
        }

        Self { rows, cols, bricks }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row < self.rows && col < self.cols {
            self.bricks.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row < self.rows && col < self.cols {
            self.bricks.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// All bricks in row-major order, destroyed ones included
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Live bricks in row-major order
    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        !self.bricks.iter().any(Brick::is_alive)
    }

    /// Destroy the first live brick (row-major) whose interior contains `point`.
    ///
    /// At most one brick is destroyed per call, even when cells overlap.
    pub fn hit(&mut self, point: Vec2) -> Option<Brick> {
        let brick = self
            .bricks
            .iter_mut()
            .find(|b| b.is_alive() && b.rect.contains_point(point))?;
        brick.status = BrickStatus::Destroyed;
        Some(*brick)
    }
}
