#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

//! Inserts random keys into both hash maps and charts how their occupancy evolves.

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use chainprobe::{
    ChainingMap, HashFn, HashTable, OpenAddressingMap, TableStats, additive_hash, find_mode,
    positional_hash, sip_hash,
};
use clap::{Parser, ValueEnum};
use plotters::prelude::*;
use rand::{Rng, SeedableRng, distr::Alphanumeric, rngs::StdRng};

/// Line color of the open addressing map
const OPEN_COLOR: RGBColor = RGBColor(220, 50, 50);
/// Line color of the chaining map
const CHAINED_COLOR: RGBColor = RGBColor(50, 90, 220);

/// Load factor above which the driver grows the chaining map, which never grows by itself
const CHAINING_GROWTH_LOAD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HashChoice {
    /// Sum of code points
    Additive,
    /// Sum of code points weighted by position
    Positional,
    /// Standard library `SipHash`
    Sip,
}

impl HashChoice {
    fn function(self) -> HashFn {
        match self {
            Self::Additive => additive_hash,
            Self::Positional => positional_hash,
            Self::Sip => sip_hash,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "load_report", about = "Occupancy report for the chainprobe hash maps", version)]
struct Args {
    /// Number of random keys to insert
    #[arg(long, default_value_t = 5_000)]
    keys: usize,
    /// Initial number of buckets requested for both maps
    #[arg(long, default_value_t = 53)]
    capacity: usize,
    /// Hash function used by both maps
    #[arg(long, value_enum, default_value_t = HashChoice::Sip)]
    hash: HashChoice,
    /// Seed of the key generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of samples taken while inserting
    #[arg(long, default_value_t = 20)]
    samples: usize,
    /// Directory the SVG charts are written to
    #[arg(long = "out-dir", default_value = ".")]
    out_dir: PathBuf,
    /// Print the report without drawing charts
    #[arg(long = "no-plot")]
    no_plot: bool,
}

/// Occupancy of one map after a given number of inserts
type Samples = Vec<(usize, TableStats)>;

/// Named, colored series of points for one chart
type Line = (&'static str, RGBColor, Vec<(usize, f64)>);

fn random_keys(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.random_range(4..=12);
            (&mut rng).sample_iter(Alphanumeric).take(len).map(char::from).collect()
        })
        .collect()
}

// Inserts `keys` in order, sampling every `every` inserts. With `grow_at` set, the table is
// doubled whenever its load goes past that value.
fn run<T: HashTable<usize>>(
    table: &mut T,
    keys: &[String],
    every: usize,
    grow_at: Option<f64>,
) -> Samples {
    let mut samples = vec![(0, table.stats())];

    for (index, key) in keys.iter().enumerate() {
        table.put(key, index);

        if grow_at.is_some_and(|limit| table.table_load() > limit) {
            table.resize_table(table.capacity() * 2);
        }

        let inserted = index + 1;
        if inserted.is_multiple_of(every) || inserted == keys.len() {
            samples.push((inserted, table.stats()));
        }
    }

    samples
}

fn print_report(open: &Samples, chained: &Samples) {
    println!(
        "{:>8} | {:>9} {:>6} {:>8} | {:>9} {:>6} {:>8}",
        "keys", "oa cap", "load", "empty", "sc cap", "load", "empty"
    );
    for ((inserted, oa), (_, sc)) in open.iter().zip(chained) {
        println!(
            "{:>8} | {:>9} {:>6.2} {:>8} | {:>9} {:>6.2} {:>8}",
            inserted, oa.capacity, oa.load, oa.empty_buckets, sc.capacity, sc.load, sc.empty_buckets
        );
    }
}

fn plot(
    path: &Path,
    title: &str,
    y_desc: &str,
    series: &[Line],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|&(x, _)| x))
        .max()
        .unwrap_or(1)
        .max(1);
    let max_y = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|&(_, y)| y))
        .fold(0.1, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_x, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Keys inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (name, color, points) in series {
        let line_style = ShapeStyle::from(color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let hash_fn = args.hash.function();
    let keys = random_keys(args.keys, args.seed);
    let every = (args.keys / args.samples.max(1)).max(1);

    let mut open = OpenAddressingMap::with_hasher(args.capacity, hash_fn)?;
    let mut chained = ChainingMap::with_hasher(args.capacity, hash_fn)?;
    let open_samples = run(&mut open, &keys, every, None);
    let chained_samples = run(&mut chained, &keys, every, Some(CHAINING_GROWTH_LOAD));

    println!("{} keys, hash {:?}, seed {}", keys.len(), args.hash, args.seed);
    print_report(&open_samples, &chained_samples);
    println!("longest chain: {}", chained.longest_chain());

    if let Ok((modes, frequency)) = find_mode(&keys) {
        println!("{} distinct keys, most repeated {} time(s)", chained.size(), frequency);
        if frequency > 1 {
            println!("repeated keys: {modes:?}");
        }
    }

    if args.no_plot {
        return Ok(());
    }

    let load_series: Vec<Line> = vec![
        ("Open addressing", OPEN_COLOR, open_samples.iter().map(|(n, s)| (*n, s.load)).collect()),
        ("Separate chaining", CHAINED_COLOR, chained_samples.iter().map(|(n, s)| (*n, s.load)).collect()),
    ];
    let empty_series: Vec<Line> = vec![
        (
            "Open addressing",
            OPEN_COLOR,
            open_samples.iter().map(|(n, s)| (*n, s.empty_ratio())).collect(),
        ),
        (
            "Separate chaining",
            CHAINED_COLOR,
            chained_samples.iter().map(|(n, s)| (*n, s.empty_ratio())).collect(),
        ),
    ];

    let load_path = args.out_dir.join("table_load.svg");
    let empty_path = args.out_dir.join("empty_buckets.svg");
    plot(&load_path, "Load Factor While Inserting", "Entries / buckets", &load_series)?;
    plot(&empty_path, "Empty Buckets While Inserting", "Empty buckets / buckets", &empty_series)?;

    println!("Generated plot images: {}, {}", load_path.display(), empty_path.display());
    Ok(())
}
