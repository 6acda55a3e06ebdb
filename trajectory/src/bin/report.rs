use std::{fs::File, io::Write, path::PathBuf, time::Duration};

use trajectory::{
    Analysis, DriftOptions, MovementOptions, Options, SimplifyOptions, TripOptions, analyze,
    pairing::RawRecord,
};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file with `time,PN,value` records
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("input.csv"), required = false)]
    pub input: PathBuf,
    /// Options json file. Yard reference profile if omitted
    #[arg(short, long, required = false)]
    pub options: Option<PathBuf>,
    /// Output json file. _Note_: will truncate old file if exists
    #[arg(long, default_value_os_t = std::env::current_dir().unwrap_or_default().join("analysis.json"), required = false)]
    pub output: PathBuf,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print result to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args {
        input,
        options,
        output,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    let mut rdr = csv::Reader::from_reader(
        File::open(input).map_err(|e| format!("Failed to read input file. Reason: {e}"))?,
    );

    let records = rdr
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Failed to parse input file. Reason: {e}"))?;

    println!("Total: {} records", records.len());

    let samples = trajectory::pairing::pair_records(records)
        .map_err(|e| format!("Failed to pair records. Reason: {e}"))?;

    let options = match options {
        Some(path) => serde_json::from_reader::<_, Options>(
            File::open(path).map_err(|e| format!("Failed to open options. Reason: {e}"))?,
        )
        .map_err(|e| format!("Failed to parse options. Reason: {e}"))?,
        None => reference_profile(),
    };

    let analysis = analyze(&samples, &options);

    if print {
        let io = std::io::stdout();
        let mut io = io.lock();

        summary(&mut io, samples.len(), &analysis)?;
    }

    if !dry {
        let file =
            File::create(&output).map_err(|e| format!("Failed to create output. Reason: {e}"))?;

        serde_json::to_writer_pretty(file, &analysis)
            .map_err(|e| format!("Failed to write output. Reason: {e}"))?;

        println!("Saved to {}", output.display());
    }

    Ok(())
}

/// Electric carts inside a factory yard reporting every 30 seconds
fn reference_profile() -> Options {
    Options::new(
        DriftOptions::new(40.0, 3.0, 120.0),
        MovementOptions::new(
            3,
            10.0,
            20.0,
            Duration::from_secs(90),
            Duration::from_secs(60),
        ),
        TripOptions::new(Duration::from_secs(60), Duration::from_secs(30)),
        SimplifyOptions::new(5.0),
    )
}

fn summary(io: &mut impl Write, samples: usize, analysis: &Analysis) -> std::io::Result<()> {
    writeln!(io, "Samples: {samples}")?;
    writeln!(io, "Without drift: {}", analysis.filtered.len())?;
    writeln!(io, "Trips: {}", analysis.trips.len())?;

    for trip in &analysis.trips {
        writeln!(io, "  {}..={}", trip.start, trip.end)?;
    }

    writeln!(io, "Selected: {}", analysis.selected.len())?;
    writeln!(io, "Trajectory: {}", analysis.trajectory.len())?;
    writeln!(
        io,
        "Stationary segments: {}",
        analysis.stationary_segments.len()
    )?;

    for segment in &analysis.stationary_segments {
        let current = match analysis.current_stop.as_ref() == Some(segment) {
            true => " (current)",
            false => "",
        };

        writeln!(
            io,
            "  {}..={} {:.1} min at {:.6}, {:.6}{current}",
            segment.start_index,
            segment.end_index,
            segment.duration.as_secs_f64() / 60.0,
            segment.anchor_latitude,
            segment.anchor_longitude
        )?;
    }

    Ok(())
}
