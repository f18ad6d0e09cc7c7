use std::ops::{Add, Div, Mul, Sub};

/// 2d vector of f64, used for screen space points (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct F64x2 {
    pub x: f64,
    pub y: f64,
}

impl F64x2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }
}

impl From<F64x2> for [f64; 2] {
    fn from(v: F64x2) -> Self {
        [v.x, v.y]
    }
}

impl From<[f64; 2]> for F64x2 {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl Add for F64x2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for F64x2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for F64x2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for F64x2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}
