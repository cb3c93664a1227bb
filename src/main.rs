//! Trains the reference circuit against `Z ⊗ I` and plots the loss history.
//!
//! Usage: `simple-vqc [iterations] [plot.png]`

use anyhow::{Context, Result};
use env_logger::Env;
use nalgebra::DVector;
use plotters::prelude::*;
use simple_vqc::{
    ansatz::NUM_OF_PARAMETERS,
    cost::VariationalProblem,
    training::{train, TrainingConfig, DEFAULT_ITERATIONS},
};

fn plot_loss(loss_history: &[f64], file_name: &str) -> Result<()> {
    let root = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();

    let y_min = loss_history.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = loss_history.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..loss_history.len(), y_min..y_max)?;

    chart.configure_mesh().x_desc("step").draw()?;

    chart.draw_series(LineSeries::new(
        loss_history
            .iter()
            .enumerate()
            .map(|(i, &loss)| (i + 1, loss)),
        &RED,
    ))?;

    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let iterations = match args.next() {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("Invalid iteration count '{}'", arg))?,
        None => DEFAULT_ITERATIONS,
    };
    let plot_file = args.next().unwrap_or_else(|| "loss.png".to_string());

    let problem = VariationalProblem::reference()?;
    let config = TrainingConfig::default().with_iterations(iterations);
    let report = train(&problem, DVector::zeros(NUM_OF_PARAMETERS), &config)?;

    println!("Final parameters: {:?}", report.params.as_slice());
    if let Some(cost) = report.final_cost() {
        println!("Final cost: {}", cost);
    }

    if !report.loss_history.is_empty() {
        plot_loss(&report.loss_history, &plot_file)
            .with_context(|| format!("Failed to plot the loss history to '{}'", plot_file))?;
        println!("Loss history saved to '{}'.", plot_file);
    }

    Ok(())
}
