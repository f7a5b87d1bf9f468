use clap::Parser;

use plotters::prelude::*;

use descent_viz::output::ensure_parent_dir;
use descent_viz::plots::plot_results;
use descent_viz::results;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    csv: Option<String>,

    #[clap(short, long)]
    shuffled: bool,

    #[clap(short, long, default_value = "plots/experiment_results.svg")]
    output: String,

    #[clap(long, default_value_t = 40)]
    epochs: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args {
        csv,
        shuffled,
        output,
        epochs,
    }: Args = Args::parse();

    let results = match csv {
        Some(path) => {
            println!("loading per epoch metrics from {}..", path);
            results::from_csv_path(&path, shuffled)?
        }
        None => {
            println!("no csv given, synthesizing a {} epoch run..", epochs);
            results::synthetic(epochs, shuffled, 0)?
        }
    };

    ensure_parent_dir(&output)?;

    let drawing_area = SVGBackend::new(&output, (1300, 400)).into_drawing_area();

    plot_results(&results, &drawing_area)?;
    drawing_area.present()?;

    println!("wrote {} epochs of curves to {}", results.epochs(), output);

    Ok(())
}
