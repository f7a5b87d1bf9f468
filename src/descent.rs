use nalgebra::Vector2;

use crate::landscape::QuadraticSurface;

#[derive(Clone, Copy, Debug)]
pub struct DescentConfig {
    pub start: Vector2<f64>,
    pub learning_rate: f64,
    pub steps: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        DescentConfig {
            start: Vector2::new(-1.5, -1.5),
            learning_rate: 0.1,
            steps: 25,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryPoint {
    pub w: f64,
    pub b: f64,
    pub loss: f64,
}

// Each iteration records the current position first, so the trajectory holds
// `steps` points and the update computed at the last one is discarded.
pub fn simulate(surface: &QuadraticSurface, config: &DescentConfig) -> Vec<TrajectoryPoint> {
    let mut position = config.start;
    let mut trajectory = Vec::with_capacity(config.steps);

    for _ in 0..config.steps {
        trajectory.push(TrajectoryPoint {
            w: position.x,
            b: position.y,
            loss: surface.loss(position.x, position.y),
        });

        position -= surface.gradient(&position) * config.learning_rate;
    }

    trajectory
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_trajectory_has_one_point_per_step() {
        let trajectory = simulate(&QuadraticSurface::default(), &DescentConfig::default());

        assert_eq!(trajectory.len(), 25);
    }

    #[test]
    fn test_trajectory_starts_at_configured_point() {
        let surface = QuadraticSurface::default();
        let config = DescentConfig::default();

        let trajectory = simulate(&surface, &config);

        assert_eq!(trajectory[0].w, -1.5);
        assert_eq!(trajectory[0].b, -1.5);
        assert_eq!(trajectory[0].loss, surface.loss(-1.5, -1.5));
    }

    #[test]
    fn test_recorded_losses_match_the_surface() {
        let surface = QuadraticSurface::default();

        let trajectory = simulate(&surface, &DescentConfig::default());

        for point in &trajectory {
            assert_eq!(point.loss, surface.loss(point.w, point.b));
        }
    }

    #[test]
    fn test_coordinates_approach_minimum_monotonically() {
        let surface = QuadraticSurface::default();

        let trajectory = simulate(&surface, &DescentConfig::default());

        for (previous, current) in trajectory.iter().tuple_windows() {
            assert!((current.w - surface.minimum.x).abs() < (previous.w - surface.minimum.x).abs());
            assert!((current.b - surface.minimum.y).abs() < (previous.b - surface.minimum.y).abs());
        }
    }

    #[test]
    fn test_loss_decreases_along_trajectory() {
        let trajectory = simulate(&QuadraticSurface::default(), &DescentConfig::default());

        for (previous, current) in trajectory.iter().tuple_windows() {
            assert!(current.loss < previous.loss);
        }

        assert!(trajectory.iter().all(|point| point.loss >= 0.0));
    }

    #[test]
    fn test_final_point_is_near_minimum() {
        let trajectory = simulate(&QuadraticSurface::default(), &DescentConfig::default());

        let last = trajectory.last().unwrap();

        assert!((last.w - 2.0).abs() < 5e-3);
        assert!((last.b - 1.0).abs() < 4e-2);
        assert!(last.loss < 2e-3);
    }
}
