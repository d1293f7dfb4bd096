use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One synthetic measurement, serialized as a CSV row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Sample {
    #[serde(rename = "pH")]
    ph: f64,
    turbidity: f64,
    density: f64,
    sugar_content: f64,
}

/// Mean and spread of each feature for one product family.
struct Profile {
    name: &'static str,
    ph: (f64, f64),
    turbidity: (f64, f64),
    density: (f64, f64),
    sugar: (f64, f64),
}

const PROFILES: [Profile; 3] = [
    Profile {
        name: "milk",
        ph: (6.7, 0.1),
        turbidity: (1.5, 0.4),
        density: (1.030, 0.002),
        sugar: (4.8, 0.3),
    },
    Profile {
        name: "juice",
        ph: (3.6, 0.2),
        turbidity: (4.0, 1.0),
        density: (1.045, 0.004),
        sugar: (10.5, 1.2),
    },
    Profile {
        name: "honey",
        ph: (3.9, 0.3),
        turbidity: (0.8, 0.2),
        density: (1.420, 0.010),
        sugar: (80.0, 2.5),
    },
];

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn draw(rng: &mut StdRng, profile: &Profile) -> Sample {
    // A few samples get watered down: lower density and sugar.
    let dilution = if rng.gen_bool(0.2) { rng.gen_range(0.6..0.9) } else { 1.0 };
    Sample {
        ph: gauss(rng, profile.ph.0, profile.ph.1),
        turbidity: gauss(rng, profile.turbidity.0, profile.turbidity.1).max(0.0),
        density: 1.0 + (gauss(rng, profile.density.0, profile.density.1) - 1.0) * dilution,
        sugar_content: gauss(rng, profile.sugar.0, profile.sugar.1) * dilution,
    }
}

fn write_csv(path: &str, samples: &[Sample]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for s in samples {
        writer.serialize(s).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &str, samples: &[Sample]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("pH", DataType::Float64, false),
        Field::new("Turbidity", DataType::Float64, false),
        Field::new("Density", DataType::Float64, false),
        Field::new("SugarContent", DataType::Float64, false),
    ]));

    let column = |f: fn(&Sample) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(samples.iter().map(f)))
    };
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(|s| s.ph),
            column(|s| s.turbidity),
            column(|s| s.density),
            column(|s| s.sugar_content),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let per_profile = 20;
    let mut samples = Vec::with_capacity(PROFILES.len() * per_profile);
    for profile in &PROFILES {
        for _ in 0..per_profile {
            samples.push(draw(&mut rng, profile));
        }
        println!("Generated {per_profile} {} samples", profile.name);
    }

    write_csv("sample_food.csv", &samples)?;
    write_parquet("sample_food.parquet", &samples)?;

    println!(
        "Wrote {} samples to sample_food.csv and sample_food.parquet",
        samples.len()
    );
    Ok(())
}
