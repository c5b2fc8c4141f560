use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Parser)]
#[clap(version, about = "Classify ECG images into diagnostic categories")]
pub(crate) struct Arguments {
  #[clap(
    long,
    env = "CARDIOVISION_MODEL",
    default_value = "ecg_brain.json",
    global = true,
    help = "Path to the classifier weights"
  )]
  model: PathBuf,
  #[clap(
    long,
    env = "CARDIOVISION_STRATEGY",
    value_enum,
    default_value_t = Strategy::Argmax,
    global = true,
    help = "How probabilities map to a finding"
  )]
  strategy: Strategy,
  #[clap(
    long,
    env = "CARDIOVISION_DEMO_SEED",
    global = true,
    help = "Draw demo-mode probabilities from a seeded generator"
  )]
  demo_seed: Option<u64>,
  #[clap(long, value_enum, default_value_t = Format::Text, global = true)]
  format: Format,
  #[clap(subcommand)]
  subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn run(self) -> Result {
    let demo = match self.demo_seed {
      Some(seed) => DemoSource::Seeded(seed),
      None => DemoSource::Fixed,
    };

    let pipeline = Pipeline::new(
      ModelResource::new(self.model),
      DiagnosisPolicy::new(self.strategy, demo),
    );

    log::debug!(
      "Using model {} with {:?} strategy",
      pipeline.resource().path().display(),
      pipeline.policy().strategy()
    );

    self.subcommand.run(&pipeline, self.format)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let arguments =
      Arguments::try_parse_from(["cardiovision", "predict", "--image", "a.png"])
        .unwrap();

    assert_eq!(arguments.strategy, Strategy::Argmax);
    assert_eq!(arguments.format, Format::Text);
    assert_eq!(arguments.demo_seed, None);
  }

  #[test]
  fn global_options_after_subcommand() {
    let arguments = Arguments::try_parse_from([
      "cardiovision",
      "batch",
      "a.png",
      "b.jpg",
      "--strategy",
      "banding",
      "--format",
      "json",
      "--demo-seed",
      "9",
    ])
    .unwrap();

    assert_eq!(arguments.strategy, Strategy::Banding);
    assert_eq!(arguments.format, Format::Json);
    assert_eq!(arguments.demo_seed, Some(9));
  }

  #[test]
  fn rejects_unknown_strategy() {
    assert!(Arguments::try_parse_from([
      "cardiovision",
      "--strategy",
      "vote",
      "predict",
      "--image",
      "a.png",
    ])
    .is_err());
  }
}
