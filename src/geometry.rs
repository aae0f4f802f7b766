//! Plane geometry used by the layout: points and axis-aligned areas.

use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub const ZERO: Point = Point(0.0, 0.0);

    /// Scales the vector so its components' absolute values sum to one.
    /// The zero vector stays zero.
    pub fn normalize(self) -> Self {
        let sum = self.0.abs() + self.1.abs();
        if sum == 0.0 {
            Point::ZERO
        } else {
            Point(self.0 / sum, self.1 / sum)
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        ((self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)).sqrt()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0, self.1 - other.1)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self(self.0 * factor, self.1 * factor)
    }
}

/// An axis-aligned rectangle given by its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Area {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Degenerate area covering a single point.
    pub fn at(point: Point) -> Self {
        Self::new(point.0, point.1, point.0, point.1)
    }

    pub fn width(&self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }

    pub fn center(&self) -> Point {
        Point(
            self.start_x + self.width() / 2.0,
            self.start_y + self.height() / 2.0,
        )
    }

    /// Grows the area just enough to cover a circle.
    pub fn include_circle(&mut self, center: Point, radius: f64) {
        self.start_x = self.start_x.min(center.0 - radius);
        self.start_y = self.start_y.min(center.1 - radius);
        self.end_x = self.end_x.max(center.0 + radius);
        self.end_y = self.end_y.max(center.1 + radius);
    }

    /// Splits the area into a `columns` × `rows` grid, column by column.
    pub fn split_evenly(&self, (columns, rows): (usize, usize)) -> Vec<Self> {
        let step_x = self.width() / columns as f64;
        let step_y = self.height() / rows as f64;
        let mut output = Vec::with_capacity(columns * rows);
        for x in 0..columns {
            for y in 0..rows {
                output.push(Area {
                    start_x: self.start_x + step_x * x as f64,
                    end_x: self.start_x + step_x * (x + 1) as f64,
                    start_y: self.start_y + step_y * y as f64,
                    end_y: self.start_y + step_y * (y + 1) as f64,
                });
            }
        }
        output
    }
}
