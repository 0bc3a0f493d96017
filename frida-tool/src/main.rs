use anyhow::{Context, Result};
use clap::Parser;
use frida_dataset::{
    dataset::{PersonId, SummaryRow},
    DatasetConfig, FridaDataset,
};
use indexmap::IndexSet;
use prettytable::{cell, row, Table};
use std::{env, path::PathBuf};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
/// Inspect the tracklet index of a FRIDA dataset copy
enum Opts {
    /// Print dataset statistics
    Info {
        /// configuration file
        config_file: PathBuf,
        /// override the seed of the identity split
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Print the train and test identities
    Split {
        /// configuration file
        config_file: PathBuf,
        /// override the seed of the identity split
        #[clap(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    match Opts::parse() {
        Opts::Info { config_file, seed } => {
            let dataset = load(config_file, seed)?;
            info(&dataset);
        }
        Opts::Split { config_file, seed } => {
            let dataset = load(config_file, seed)?;
            split(&dataset);
        }
    }

    Ok(())
}

fn load(config_file: PathBuf, seed: Option<u64>) -> Result<FridaDataset> {
    let mut config = DatasetConfig::open(&config_file)
        .with_context(|| format!("failed to load config file '{}'", config_file.display()))?;
    if seed.is_some() {
        config.seed = seed;
    }
    if config.seed.is_none() {
        tracing::warn!("no seed is given, the identity split is not reproducible");
    }

    let dataset = FridaDataset::load(&config).with_context(|| {
        format!(
            "failed to load dataset at '{}'",
            config.data_root.display()
        )
    })?;
    Ok(dataset)
}

fn info(dataset: &FridaDataset) {
    println!("=> FRIDA loaded from '{}'", dataset.root().display());

    // print subset statistics
    {
        let mut table = Table::new();
        table.add_row(row![
            "subset",
            "# ids",
            "# tracklets",
            "min len",
            "max len",
            "avg len"
        ]);

        dataset.summary().iter().for_each(|row| {
            let SummaryRow {
                name,
                num_ids,
                num_tracklets,
                stats,
            } = *row;
            let (min_len, max_len, mean_len) = match stats {
                Some(stats) => (
                    stats.min_len.to_string(),
                    stats.max_len.to_string(),
                    format!("{:.1}", stats.mean_len.raw()),
                ),
                None => ("-".into(), "-".into(), "-".into()),
            };
            table.add_row(row![name, num_ids, num_tracklets, min_len, max_len, mean_len]);
        });

        table.printstd();
    }

    println!("  # cameras: {}", dataset.num_cameras());
    println!("  # segments: {}", dataset.segments().len());
    println!("  # skipped records: {}", dataset.issues().len());
}

fn split(dataset: &FridaDataset) {
    let partition = dataset.partition();
    let mut table = Table::new();
    table.add_row(row!["subset", "# ids", "ids"]);
    table.add_row(row![
        "train",
        partition.train_ids().len(),
        join_ids(partition.train_ids())
    ]);
    table.add_row(row![
        "test",
        partition.test_ids().len(),
        join_ids(partition.test_ids())
    ]);
    table.printstd();
}

fn join_ids(ids: &IndexSet<PersonId>) -> String {
    ids.iter().map(PersonId::as_str).collect::<Vec<_>>().join(" ")
}
