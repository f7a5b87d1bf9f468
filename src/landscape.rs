use nalgebra::Vector2;
use ndarray::Array;
use ndarray::Array1;

pub const W_MIN: f64 = -2.0;
pub const W_MAX: f64 = 4.0;
pub const B_MIN: f64 = -2.0;
pub const B_MAX: f64 = 4.0;

pub const LOSS_MIN: f64 = 0.0;
// The mesh corners reach a loss of 26.4, past the top of the drawn axis
// range. Geometry above this value projects outside the axis box.
pub const LOSS_MAX: f64 = 15.0;

pub const MESH_RESOLUTION: usize = 30;

#[derive(Clone, Copy, Debug)]
pub struct QuadraticSurface {
    pub w_coefficient: f64,
    pub b_coefficient: f64,
    pub minimum: Vector2<f64>,
}

impl Default for QuadraticSurface {
    fn default() -> Self {
        QuadraticSurface {
            w_coefficient: 1.2,
            b_coefficient: 0.8,
            minimum: Vector2::new(2.0, 1.0),
        }
    }
}

impl QuadraticSurface {
    pub fn loss(&self, w: f64, b: f64) -> f64 {
        self.w_coefficient * (w - self.minimum.x).powi(2)
            + self.b_coefficient * (b - self.minimum.y).powi(2)
    }

    pub fn gradient(&self, position: &Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            2.0 * self.w_coefficient * (position.x - self.minimum.x),
            2.0 * self.b_coefficient * (position.y - self.minimum.y),
        )
    }
}

pub fn w_samples() -> Array1<f64> {
    Array::linspace(W_MIN, W_MAX, MESH_RESOLUTION + 1)
}

pub fn b_samples() -> Array1<f64> {
    Array::linspace(B_MIN, B_MAX, MESH_RESOLUTION + 1)
}
