#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

use chainmap::{
    ChainedHashMap,
    bucket::{Bucket, ListBucket, VecBucket},
};
use plotters::prelude::*;
use rand::Rng;
use std::{hash::RandomState, time::Instant};

// Keys inserted for every load factor
const KEY_COUNT: usize = 200_000;
// Every map starts from the default table size
const INITIAL_CAPACITY: usize = 16;
// Max load factors to sweep
const LOAD_FACTORS: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0];

const BUCKET_KINDS: [&str; 2] = ["List buckets", "Vec buckets"];

/// Measurements for one run
#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    resizes: usize,
    final_capacity: usize,
    mean_chain: f64,
    longest_chain: usize,
    nanos_per_insert: f64,
}

fn fill<B: Bucket<u64, u64>>(keys: &[u64], max_load: f64) -> Result<RunStats, chainmap::MapError> {
    let mut map: ChainedHashMap<u64, u64, RandomState, B> =
        ChainedHashMap::with_config_and_hasher(INITIAL_CAPACITY, max_load, RandomState::new())?;

    let mut resizes = 0;
    let start = Instant::now();
    for &key in keys {
        let before = map.capacity();
        map.put(key, key);
        if map.capacity() != before {
            resizes += 1;
        }
    }
    let elapsed = start.elapsed();

    let lengths = map.chain_lengths();
    let used: Vec<usize> = lengths.iter().copied().filter(|&len| len > 0).collect();
    let mean_chain =
        if used.is_empty() { 0.0 } else { used.iter().sum::<usize>() as f64 / used.len() as f64 };

    Ok(RunStats {
        resizes,
        final_capacity: map.capacity(),
        mean_chain,
        longest_chain: lengths.iter().copied().max().unwrap_or(0),
        nanos_per_insert: elapsed.as_nanos() as f64 / keys.len().max(1) as f64,
    })
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[(&str, Vec<f64>)],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|(_, values)| values.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;
    let max_x = LOAD_FACTORS[LOAD_FACTORS.len() - 1];

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..max_x, 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Max Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (idx, (label, values)) in series.iter().enumerate() {
        let color = &colors[idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                LOAD_FACTORS.iter().copied().zip(values.iter().copied()),
                line_style,
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            LOAD_FACTORS
                .iter()
                .copied()
                .zip(values.iter().copied())
                .map(|point| Circle::new(point, 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Same keys for every run to keep the comparison fair
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..KEY_COUNT).map(|_| rng.random()).collect();

    let mut results: Vec<Vec<RunStats>> = vec![Vec::new(); BUCKET_KINDS.len()];

    for &max_load in &LOAD_FACTORS {
        println!("Max load factor {max_load}");

        let runs = [
            fill::<ListBucket<u64, u64>>(&keys, max_load)?,
            fill::<VecBucket<u64, u64>>(&keys, max_load)?,
        ];

        for (kind_idx, stats) in runs.into_iter().enumerate() {
            println!(
                "  {}: resizes = {}, capacity = {}, mean chain = {:.2}, longest = {}, {:.1} ns/insert",
                BUCKET_KINDS[kind_idx],
                stats.resizes,
                stats.final_capacity,
                stats.mean_chain,
                stats.longest_chain,
                stats.nanos_per_insert
            );
            results[kind_idx].push(stats);
        }
    }

    // Chain shape does not depend on the bucket container
    let list_runs = &results[0];
    draw_chart("chain_lengths.png", "Chain Length by Max Load Factor", "Entries per Bucket", &[
        ("Mean non-empty chain", list_runs.iter().map(|s| s.mean_chain).collect()),
        ("Longest chain", list_runs.iter().map(|s| s.longest_chain as f64).collect()),
    ])?;

    draw_chart("table_growth.png", "Table Growth by Max Load Factor", "Resizes", &[(
        "Resizes",
        list_runs.iter().map(|s| s.resizes as f64).collect(),
    )])?;

    let timings: Vec<(&str, Vec<f64>)> = BUCKET_KINDS
        .iter()
        .zip(&results)
        .map(|(&kind, runs)| (kind, runs.iter().map(|s| s.nanos_per_insert).collect()))
        .collect();
    draw_chart("insert_time.png", "Insert Cost by Bucket Container", "Nanoseconds per Insert", &timings)?;

    println!("Generated plot images: chain_lengths.png, table_growth.png, insert_time.png");

    Ok(())
}
