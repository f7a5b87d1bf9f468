use clap::Parser;

use descent_viz::descent::{simulate, DescentConfig};
use descent_viz::landscape::QuadraticSurface;
use descent_viz::output::ensure_parent_dir;
use descent_viz::scene;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, default_value = "plots/gradient_descent_3d.gif")]
    output: String,

    #[clap(long, default_value = "plots/gradient_descent_3d.svg")]
    still: String,

    #[clap(long, default_value_t = 800)]
    width: u32,

    #[clap(long, default_value_t = 600)]
    height: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args {
        output,
        still,
        width,
        height,
    }: Args = Args::parse();

    let surface = QuadraticSurface::default();
    let config = DescentConfig::default();

    println!(
        "simulating {} descent steps from ({}, {})..",
        config.steps, config.start.x, config.start.y
    );

    let trajectory = simulate(&surface, &config);

    let final_point = trajectory.last().ok_or("Empty trajectory")?;
    println!(
        "final point: w={:.4}, b={:.4}, loss={:.6}",
        final_point.w, final_point.b, final_point.loss
    );

    ensure_parent_dir(&output)?;
    ensure_parent_dir(&still)?;

    println!("rendering animation to {}..", output);

    let frames = scene::render_gif(&output, (width, height), &surface, &trajectory)?;
    println!("wrote {} frames", frames);

    scene::render_still(&still, (width, height), &surface, &trajectory)?;
    println!("wrote annotated still to {}", still);

    Ok(())
}
