use {
  crate::{
    arguments::Arguments,
    config::*,
    diagnosis::{DemoSource, DiagnosisPolicy, DiagnosisResult, Strategy},
    error::Error,
    math::*,
    model::ModelResource,
    network::Network,
    pipeline::{Classification, Pipeline},
    preprocess::{normalize, NormalizedTensor},
    printed::{PrintedParameters, Transcript, SIGNAL_FIDELITY_NOTICE},
    probability::{Label, ProbabilityVector, LABELS},
    subcommand::Subcommand,
    upload::RawImage,
  },
  anyhow::Context,
  clap::{Parser, ValueEnum},
  image::{imageops::FilterType, DynamicImage, ImageFormat},
  indicatif::{ProgressBar, ProgressStyle},
  ndarray::{Array2, Array4, ArrayView2},
  rand::{rngs::StdRng, Rng, SeedableRng},
  rayon::prelude::*,
  regex::Regex,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{self, Display, Formatter},
    fs::{read, read_to_string, File},
    path::{Path, PathBuf},
    process,
    sync::{
      atomic::{AtomicUsize, Ordering},
      Arc, OnceLock,
    },
  },
};

#[cfg(test)]
use {
  crate::{
    diagnosis::{Finding, SeverityTier},
    model::ModelHandle,
    preprocess::INPUT_LEN,
  },
  approx::assert_relative_eq,
  image::{Rgb, RgbImage},
  ndarray::array,
  ndarray_rand::{rand_distr::Uniform, RandomExt},
  std::io::Cursor,
  tempdir::TempDir,
};

mod arguments;
mod config;
mod diagnosis;
mod error;
mod math;
mod model;
mod network;
mod pipeline;
mod preprocess;
mod printed;
mod probability;
mod subcommand;
mod upload;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn main() {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();

  if let Err(error) = Arguments::parse().run() {
    eprintln!("error: {error:#}");
    process::exit(1);
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use super::*;

  pub(crate) fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
  }

  pub(crate) fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
      Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
  }

  pub(crate) fn network(hidden: usize) -> Network {
    Network::new(NetworkConfig {
      weight_input_hidden: Array2::random(
        (hidden, INPUT_LEN),
        Uniform::new(-0.01, 0.01),
      ),
      weight_hidden_output: Array2::random(
        (LABELS.len(), hidden),
        Uniform::new(-1.0, 1.0),
      ),
    })
  }

  pub(crate) fn write_network(dir: &TempDir, network: &Network) -> PathBuf {
    let path = dir.path().join("ecg_brain.json");
    network.save_weights(&path).unwrap();
    path
  }
}
