use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use rusty_scribe::data::loader::load_file;
use rusty_scribe::{
    calculate_stats, calculate_stats_across, column_stats, merge_and_calculate_stats, Cell,
    Dataset, TableSpec, Value,
};

/// Minimal deterministic PRNG (splitmix64) so the sample is reproducible.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One dataset of trial results per planner.
fn generate_trials(planner: &str, base_runtime: f64, rng: &mut SampleRng) -> Result<Dataset> {
    const TRIALS: usize = 20;

    let mut trial = Vec::with_capacity(TRIALS);
    let mut runtime = Vec::with_capacity(TRIALS);
    let mut cost = Vec::with_capacity(TRIALS);
    for i in 0..TRIALS {
        trial.push(Value::Integer(i as i64));
        runtime.push(Value::Float(rng.gauss(base_runtime, 0.15 * base_runtime).max(0.01)));
        cost.push(Value::Float(rng.gauss(12.0, 1.5)));
    }

    Dataset::new(
        vec![
            "planner".to_string(),
            "trial".to_string(),
            "runtime_s".to_string(),
            "path_cost".to_string(),
        ],
        vec![
            vec![Value::String(planner.to_string()); TRIALS],
            trial,
            runtime,
            cost,
        ],
    )
    .context("building trial dataset")
}

/// Persist the combined results so the report can be regenerated later.
fn write_parquet(datasets: &[Dataset], path: &Path) -> Result<()> {
    let mut planner = Vec::new();
    let mut trial = Vec::new();
    let mut runtime = Vec::new();
    let mut cost = Vec::new();

    for ds in datasets {
        for row in ds.rows() {
            match row.as_slice() {
                [Value::String(p), Value::Integer(t), Value::Float(r), Value::Float(c)] => {
                    planner.push(p.clone());
                    trial.push(*t);
                    runtime.push(*r);
                    cost.push(*c);
                }
                other => anyhow::bail!("unexpected row shape: {other:?}"),
            }
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("planner", DataType::Utf8, false),
        Field::new("trial", DataType::Int64, false),
        Field::new("runtime_s", DataType::Float64, false),
        Field::new("path_cost", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                planner.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(trial)),
            Arc::new(Float64Array::from(runtime)),
            Arc::new(Float64Array::from(cost)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SampleRng(42);
    let planners = [("rrt", 1.8), ("rrt_star", 2.6), ("prm", 1.1)];

    let datasets = planners
        .iter()
        .map(|&(name, base)| generate_trials(name, base, &mut rng))
        .collect::<Result<Vec<_>>>()?;

    let output_path = Path::new("sample_results.parquet");
    write_parquet(&datasets, output_path)?;

    let combined = load_file(output_path)?;
    log::info!(
        "Wrote and reloaded {} rows from {}",
        combined.n_rows(),
        output_path.display()
    );

    // Pooled statistics over every trial of every planner.
    let pooled = merge_and_calculate_stats(&datasets, &["runtime_s", "path_cost"])?;
    println!("Pooled statistics:");
    println!("{}", serde_json::to_string_pretty(&pooled)?);

    // Spread of the per-planner mean runtimes.
    let across = calculate_stats_across(&datasets, |ds| {
        Ok(column_stats(ds, "runtime_s")?.mean)
    })?;
    println!("\nPer-planner mean runtime spread:");
    println!("{}", serde_json::to_string_pretty(&across)?);

    // Sanity check against the reloaded file.
    let reloaded = calculate_stats(std::slice::from_ref(&combined), &["runtime_s"])?;
    log::debug!("reloaded runtime stats: {:?}", reloaded["runtime_s"]);

    // Per-planner mean ± std table for the paper.
    let rows: Vec<Vec<Cell>> = datasets
        .iter()
        .zip(planners)
        .map(|(ds, (name, _))| {
            let runtime = column_stats(ds, "runtime_s")?;
            let cost = column_stats(ds, "path_cost")?;
            Ok(vec![
                Cell::from(name),
                Cell::from((runtime.mean, runtime.std)),
                Cell::from((cost.mean, cost.std)),
            ])
        })
        .collect::<Result<_>>()?;

    let spec = TableSpec {
        caption: "Planner runtime and path cost (mean $\\pm$ std over 20 trials).".to_string(),
        label: "planner_results".to_string(),
        column_format: "lcc".to_string(),
        ..Default::default()
    };
    let table = rusty_scribe::render_table_from_rows(
        &rows,
        &["Planner", "Runtime (s)", "Path cost"],
        &spec,
    )?;

    println!("\n{table}");
    Ok(())
}
