use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;

use crate::descent::TrajectoryPoint;
use crate::landscape;
use crate::landscape::QuadraticSurface;

const FRAMES_PER_SECOND: f64 = 10.0;
const REVEAL_SECONDS: f64 = 2.0;
const HOLD_SECONDS: f64 = 0.5;
const SEGMENT_SECONDS: f64 = 0.2;
const ORBIT_SECONDS: f64 = 3.0;
const ORBIT_RADIANS_PER_SECOND: f64 = 0.2;

pub const FRAME_DELAY_MS: u32 = (1000.0 / FRAMES_PER_SECOND) as u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pitch: f64,
    pub yaw: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        // 30 degrees above the horizon, looking down the w/b diagonal.
        Camera {
            pitch: std::f64::consts::FRAC_PI_6,
            yaw: -std::f64::consts::FRAC_PI_4,
            scale: 0.7,
        }
    }
}

impl Camera {
    pub fn rotated(self, radians: f64) -> Self {
        Camera {
            yaw: self.yaw + radians,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MarkerState {
    pub position: TrajectoryPoint,
    pub visited: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub camera: Camera,
    pub reveal: f64,
    pub marker: Option<MarkerState>,
}

// Timeline: mesh reveal, short hold, one trajectory segment per
// SEGMENT_SECONDS, then a camera pan around the finished scene.
pub fn frame_schedule(trajectory: &[TrajectoryPoint]) -> Vec<Frame> {
    let camera = Camera::default();
    let mut frames = Vec::new();

    let reveal_frames = (REVEAL_SECONDS * FRAMES_PER_SECOND) as usize;
    for i in 0..reveal_frames {
        frames.push(Frame {
            camera,
            reveal: (i + 1) as f64 / reveal_frames as f64,
            marker: None,
        });
    }

    let hold_frames = (HOLD_SECONDS * FRAMES_PER_SECOND) as usize;
    for i in 0..hold_frames {
        // The marker lands on the start point in the last hold frame.
        let marker = if i + 1 == hold_frames {
            trajectory.first().map(|&position| MarkerState {
                position,
                visited: 0,
            })
        } else {
            None
        };

        frames.push(Frame {
            camera,
            reveal: 1.0,
            marker,
        });
    }

    let segment_frames = (SEGMENT_SECONDS * FRAMES_PER_SECOND) as usize;
    for (segment, pair) in trajectory.windows(2).enumerate() {
        for step in 1..=segment_frames {
            let t = step as f64 / segment_frames as f64;

            frames.push(Frame {
                camera,
                reveal: 1.0,
                marker: Some(MarkerState {
                    position: lerp(&pair[0], &pair[1], t),
                    visited: segment + 1,
                }),
            });
        }
    }

    let orbit_frames = (ORBIT_SECONDS * FRAMES_PER_SECOND) as usize;
    let resting = trajectory.last().map(|&position| MarkerState {
        position,
        visited: trajectory.len().saturating_sub(1),
    });

    for i in 0..orbit_frames {
        let elapsed = (i + 1) as f64 / FRAMES_PER_SECOND;

        frames.push(Frame {
            camera: camera.rotated(ORBIT_RADIANS_PER_SECOND * elapsed),
            reveal: 1.0,
            marker: resting,
        });
    }

    frames
}

// Straight chord between consecutive trajectory points.
fn lerp(from: &TrajectoryPoint, to: &TrajectoryPoint, t: f64) -> TrajectoryPoint {
    TrajectoryPoint {
        w: from.w + (to.w - from.w) * t,
        b: from.b + (to.b - from.b) * t,
        loss: from.loss + (to.loss - from.loss) * t,
    }
}

use plotters::style::full_palette;

pub fn draw_frame<DB>(
    surface: &QuadraticSurface,
    trajectory: &[TrajectoryPoint],
    frame: &Frame,
    annotate: bool,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let mut drawing_area = ChartBuilder::on(&drawing_area);

    drawing_area.margin(20);

    // Text requires a system font lookup the gif backend does not do, so
    // animation frames stay label free and only vector output is annotated.
    if annotate {
        drawing_area.caption(
            "Gradient descent on L(w, b) = 1.2(w - 2)^2 + 0.8(b - 1)^2",
            ("sans-serif", 20),
        );
    }

    let mut chart_context = drawing_area.build_cartesian_3d(
        landscape::W_MIN..landscape::W_MAX,
        landscape::LOSS_MIN..landscape::LOSS_MAX,
        landscape::B_MIN..landscape::B_MAX,
    )?;

    let Frame {
        camera,
        reveal,
        marker,
    } = *frame;

    chart_context.with_projection(|mut projection| {
        projection.pitch = camera.pitch;
        projection.yaw = camera.yaw;
        projection.scale = camera.scale;
        projection.into_matrix()
    });

    if annotate {
        chart_context
            .configure_axes()
            .x_labels(6)
            .y_labels(4)
            .z_labels(6)
            .draw()?;
    } else {
        // The axis grid draws tick labels, so animation frames get a bare
        // frame instead, the floor outline plus one vertical edge.
        let frame_style = BLACK.mix(0.4);

        chart_context.draw_series(LineSeries::new(
            [
                (landscape::W_MIN, landscape::LOSS_MIN, landscape::B_MIN),
                (landscape::W_MAX, landscape::LOSS_MIN, landscape::B_MIN),
                (landscape::W_MAX, landscape::LOSS_MIN, landscape::B_MAX),
                (landscape::W_MIN, landscape::LOSS_MIN, landscape::B_MAX),
                (landscape::W_MIN, landscape::LOSS_MIN, landscape::B_MIN),
            ],
            &frame_style,
        ))?;

        chart_context.draw_series(LineSeries::new(
            [
                (landscape::W_MIN, landscape::LOSS_MIN, landscape::B_MIN),
                (landscape::W_MIN, landscape::LOSS_MAX, landscape::B_MIN),
            ],
            &frame_style,
        ))?;
    }

    let ws = landscape::w_samples();
    let bs = landscape::b_samples();

    let visible = ((ws.len() as f64 * reveal).ceil() as usize).clamp(2, ws.len());

    chart_context.draw_series(
        SurfaceSeries::xoz(
            ws.iter().copied().take(visible),
            bs.iter().copied(),
            |w, b| surface.loss(w, b),
        )
        .style_func(&|&loss| {
            BLUE.mix(0.15 + 0.25 * (1.0 - (loss / landscape::LOSS_MAX).min(1.0)))
                .filled()
        }),
    )?;

    if annotate {
        chart_context.draw_series([
            Text::new(
                "w",
                (landscape::W_MAX - 0.3, 0.8, landscape::B_MIN + 0.3),
                ("sans-serif", 18),
            ),
            Text::new(
                "b",
                (landscape::W_MIN + 0.3, 0.8, landscape::B_MAX - 0.3),
                ("sans-serif", 18),
            ),
            Text::new(
                "Loss",
                (
                    landscape::W_MIN + 0.2,
                    landscape::LOSS_MAX - 0.8,
                    landscape::B_MIN + 0.2,
                ),
                ("sans-serif", 18),
            ),
        ])?;
    }

    if let Some(MarkerState { position, visited }) = marker {
        let trace: Vec<_> = trajectory
            .iter()
            .take(visited)
            .chain(std::iter::once(&position))
            .map(|point| (point.w, point.loss, point.b))
            .collect();

        chart_context.draw_series(LineSeries::new(trace, full_palette::ORANGE.stroke_width(2)))?;

        chart_context.draw_series(std::iter::once(Circle::new(
            (position.w, position.loss, position.b),
            5,
            RED.filled(),
        )))?;
    }

    Ok(())
}

pub fn render_gif(
    path: impl AsRef<std::path::Path>,
    size: (u32, u32),
    surface: &QuadraticSurface,
    trajectory: &[TrajectoryPoint],
) -> Result<usize, Box<dyn std::error::Error>> {
    let frames = frame_schedule(trajectory);

    let drawing_area = BitMapBackend::gif(path, size, FRAME_DELAY_MS)?.into_drawing_area();

    for frame in &frames {
        draw_frame(surface, trajectory, frame, false, &drawing_area)?;
        drawing_area.present()?;
    }

    Ok(frames.len())
}

pub fn render_still(
    path: impl AsRef<std::path::Path>,
    size: (u32, u32),
    surface: &QuadraticSurface,
    trajectory: &[TrajectoryPoint],
) -> Result<(), Box<dyn std::error::Error>> {
    let frames = frame_schedule(trajectory);
    let last = frames.last().ok_or("Frame schedule is empty")?;

    let drawing_area = SVGBackend::new(path.as_ref(), size).into_drawing_area();

    draw_frame(surface, trajectory, last, true, &drawing_area)?;
    drawing_area.present()?;

    Ok(())
}
