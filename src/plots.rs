use plotters::coord::Shift;
use plotters::prelude::*;

use crate::results::ExperimentResults;

pub fn plot_results<DB>(
    results: &ExperimentResults,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    results.validate()?;

    drawing_area.fill(&WHITE)?;

    match drawing_area.split_evenly((1, 2)).as_slice() {
        [loss_area, accuracy_area] => {
            plot_metric_panel(
                &format!("Losses {}", results.title_suffix()),
                "Loss",
                &results.train_losses,
                &results.test_losses,
                loss_area,
            )?;

            plot_metric_panel(
                &format!("Accuracy {}", results.title_suffix()),
                "Accuracy (%)",
                &results.train_accuracies,
                &results.test_accuracies,
                accuracy_area,
            )?;

            Ok(())
        }
        _ => Err("Expected two metric panels".into()),
    }
}

pub fn plot_metric_panel<DB>(
    caption: &str,
    y_desc: &str,
    train: &[f32],
    test: &[f32],
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let mut drawing_area = ChartBuilder::on(&drawing_area);

    let y_range = padded_range(train.iter().chain(test.iter()).copied())
        .ok_or("Cannot scale an empty metric series")?;

    let mut chart_context = drawing_area
        .caption(caption, ("sans-serif", 20))
        .set_all_label_area_size(50)
        .margin(20)
        .build_cartesian_2d(0..train.len(), y_range)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Epoch")
        .y_labels(10)
        .y_desc(y_desc)
        .draw()?;

    chart_context
        .draw_series(LineSeries::new(
            train.iter().enumerate().map(|(epoch, &value)| (epoch, value)),
            &RED,
        ))?
        .label("Train")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart_context
        .draw_series(LineSeries::new(
            test.iter().enumerate().map(|(epoch, &value)| (epoch, value)),
            &BLUE,
        ))?
        .label("Test")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart_context
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

pub fn padded_range(data: impl Iterator<Item = f32>) -> Option<std::ops::Range<f32>> {
    let MinMax { min, max } = find_max_min(data)?;

    let padding = if max > min { (max - min) * 0.05 } else { 1.0 };

    Some((min - padding)..(max + padding))
}

pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

pub fn find_max_min<T: std::cmp::PartialOrd + Copy>(
    mut data: impl Iterator<Item = T>,
) -> Option<MinMax<T>> {
    let init = data.next()?;
    let mut min_max = MinMax {
        min: init,
        max: init,
    };

    for x in data {
        min_max = MinMax {
            min: if x < min_max.min { x } else { min_max.min },
            max: if x > min_max.max { x } else { min_max.max },
        };
    }

    Some(min_max)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::results;

    fn render_to_svg(results: &ExperimentResults) -> Result<String, Box<dyn std::error::Error>> {
        let mut svg = String::new();

        {
            let drawing_area = SVGBackend::with_string(&mut svg, (1300, 400)).into_drawing_area();
            plot_results(results, &drawing_area)?;
            drawing_area.present()?;
        }

        Ok(svg)
    }

    fn polyline_point_counts(svg: &str) -> Vec<usize> {
        svg.match_indices("points=\"")
            .map(|(start, token)| {
                let attribute = &svg[start + token.len()..];
                let end = attribute.find('"').unwrap();

                attribute[..end]
                    .split_whitespace()
                    .filter(|pair| pair.contains(','))
                    .count()
            })
            .collect()
    }

    #[test]
    fn test_panel_titles_follow_shuffle_flag() {
        let shuffled = results::synthetic(10, true, 3).unwrap();
        let svg = render_to_svg(&shuffled).unwrap();

        assert!(svg.contains("Losses (Shuffle=True)"));
        assert!(svg.contains("Accuracy (Shuffle=True)"));

        let sequential = results::synthetic(10, false, 3).unwrap();
        let svg = render_to_svg(&sequential).unwrap();

        assert!(svg.contains("Losses (Shuffle=False)"));
        assert!(svg.contains("Accuracy (Shuffle=False)"));
    }

    #[test]
    fn test_axis_descriptions_are_drawn() {
        let svg = render_to_svg(&results::synthetic(10, true, 3).unwrap()).unwrap();

        assert!(svg.contains("Epoch"));
        assert!(svg.contains("Loss"));
        assert!(svg.contains("Accuracy (%)"));
        assert!(svg.contains("Train"));
        assert!(svg.contains("Test"));
    }

    #[test]
    fn test_each_series_has_one_vertex_per_epoch() {
        let epochs = 6;
        let svg = render_to_svg(&results::synthetic(epochs, true, 3).unwrap()).unwrap();

        let full_length_series = polyline_point_counts(&svg)
            .into_iter()
            .filter(|&count| count == epochs)
            .count();

        assert_eq!(full_length_series, 4);
    }

    #[test]
    fn test_mismatched_series_lengths_are_rejected() {
        let mut results = results::synthetic(10, true, 3).unwrap();
        results.test_losses.pop();

        assert!(render_to_svg(&results).is_err());
    }

    #[test]
    fn test_empty_results_are_rejected() {
        let results = results::synthetic(0, true, 3).unwrap();

        assert!(render_to_svg(&results).is_err());
    }

    #[test]
    fn test_padded_range_pads_both_ends() {
        let range = padded_range([1.0f32, 3.0].into_iter()).unwrap();

        assert!((range.start - 0.9).abs() < 1e-6);
        assert!((range.end - 3.1).abs() < 1e-6);
    }

    #[test]
    fn test_padded_range_widens_constant_series() {
        let range = padded_range(std::iter::repeat(2.0f32).take(5)).unwrap();

        assert_eq!(range.start, 1.0);
        assert_eq!(range.end, 3.0);
    }

    #[test]
    fn test_padded_range_of_nothing() {
        assert!(padded_range(std::iter::empty::<f32>()).is_none());
    }

    #[test]
    fn test_find_max_min() {
        let MinMax { min, max } = find_max_min([3, 1, 4, 1, 5].into_iter()).unwrap();

        assert_eq!(min, 1);
        assert_eq!(max, 5);
    }
}
