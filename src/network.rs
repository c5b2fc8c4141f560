use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Network {
  config: NetworkConfig,
}

impl Network {
  pub(crate) fn new(config: NetworkConfig) -> Self {
    Self { config }
  }

  pub(crate) fn input_len(&self) -> usize {
    self.config.weight_input_hidden.ncols()
  }

  pub(crate) fn hidden_len(&self) -> usize {
    self.config.weight_input_hidden.nrows()
  }

  pub(crate) fn output_len(&self) -> usize {
    self.config.weight_hidden_output.nrows()
  }

  /// Class probabilities for a single input row.
  pub(crate) fn forward(
    &self,
    input: ArrayView2<f64>,
  ) -> Result<Vec<f64>, Error> {
    if input.nrows() != 1 {
      return Err(Error::inference(format!(
        "expected a batch of one, got {}",
        input.nrows()
      )));
    }

    if input.ncols() != self.input_len() {
      return Err(Error::inference(format!(
        "model expects {} inputs, tensor has {}",
        self.input_len(),
        input.ncols()
      )));
    }

    let hidden = self.config.weight_input_hidden.dot(&input.t()).mapv(relu);
    let logits = self.config.weight_hidden_output.dot(&hidden);

    let logits = logits.iter().copied().collect::<Vec<f64>>();

    if logits.iter().any(|logit| !logit.is_finite()) {
      return Err(Error::inference("model produced non-finite scores"));
    }

    Ok(softmax(&logits))
  }

  #[cfg(test)]
  pub(crate) fn save_weights(&self, path: &Path) -> Result {
    let serializable_config: SerializableNetworkConfig =
      self.config.clone().into();

    let file = File::create(path).context("failed to create weights file")?;

    serde_json::to_writer(file, &serializable_config)
      .context("failed to serialize network weights")?;

    Ok(())
  }

  pub(crate) fn load_weights(path: &Path) -> Result<Self> {
    let file = File::open(path).context("failed to open weights file")?;

    let serializable_config: SerializableNetworkConfig =
      serde_json::from_reader(std::io::BufReader::new(file))
        .context("failed to deserialize network weights")?;

    let config = NetworkConfig::try_from(serializable_config)?;

    Ok(Self::new(config))
  }
}
