use csv::ReaderBuilder;
use log::{info, warn};
use rusty_hoeffding::data::{FeatureValue, Features, Target};
use rusty_hoeffding::trees::{HoeffdingTree, TreeParams};
use std::env;
use std::error::Error;

const REPORT_EVERY: usize = 1000;

fn usage() -> String {
    "usage: hoeffding-stream <csv> [label-column]".to_string()
}

/// Test-then-train evaluation of a classifier over the rows of a CSV file.
fn run(file_path: &str, label_column: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(file_path)?;
    let headers = reader.headers()?.clone();

    let label_index = match label_column {
        Some(name) => headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| format!("Unknown label column: {}", name))?,
        None => headers.len().checked_sub(1).ok_or("Empty header row")?,
    };
    info!(
        "Streaming {} with label column {}",
        file_path, &headers[label_index]
    );

    let mut tree = HoeffdingTree::<String>::classifier(TreeParams::new())?;
    let mut correct = 0;
    let mut seen = 0;

    for result in reader.records() {
        let record = result?;
        let Some(label) = record.get(label_index) else {
            warn!("Skipping a row without a label: {:?}", record);
            continue;
        };

        let features = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(index, _)| *index != label_index)
            .map(|(_, (name, cell))| (name.to_string(), FeatureValue::parse(cell)))
            .collect::<Features>();

        if tree.predict_class(&features).as_deref() == Some(label) {
            correct += 1;
        }
        tree.learn_one(&features, &Target::Class(label.to_string()))?;
        seen += 1;

        if seen % REPORT_EVERY == 0 {
            info!(
                "{} rows, accuracy {:.4}, {} leaves",
                seen,
                correct as f64 / seen as f64,
                tree.size()
            );
        }
    }

    if seen == 0 {
        return Err("No rows to learn from".into());
    }
    info!(
        "Done: {} rows, accuracy {:.4}, {} leaves, depth {}",
        seen,
        correct as f64 / seen as f64,
        tree.size(),
        tree.depth()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = env::args().collect::<Vec<_>>();
    let file_path = args.get(1).ok_or_else(usage)?;
    run(file_path, args.get(2).map(String::as_str))
}
