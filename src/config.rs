use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableNetworkConfig {
  weight_input_hidden: Vec<f64>,
  weight_hidden_output: Vec<f64>,
  input_hidden_shape: (usize, usize),
  hidden_output_shape: (usize, usize),
}

#[derive(Clone, Debug)]
pub(crate) struct NetworkConfig {
  pub(crate) weight_input_hidden: Array2<f64>,
  pub(crate) weight_hidden_output: Array2<f64>,
}

impl From<NetworkConfig> for SerializableNetworkConfig {
  fn from(config: NetworkConfig) -> Self {
    let input_hidden_shape = config.weight_input_hidden.dim();
    let hidden_output_shape = config.weight_hidden_output.dim();

    Self {
      weight_input_hidden: config.weight_input_hidden.iter().copied().collect(),
      weight_hidden_output: config
        .weight_hidden_output
        .iter()
        .copied()
        .collect(),
      input_hidden_shape,
      hidden_output_shape,
    }
  }
}

impl TryFrom<SerializableNetworkConfig> for NetworkConfig {
  type Error = anyhow::Error;

  fn try_from(config: SerializableNetworkConfig) -> Result<Self> {
    let weight_input_hidden = Array2::from_shape_vec(
      config.input_hidden_shape,
      config.weight_input_hidden,
    )
    .context("input-hidden weights do not match their declared shape")?;

    let weight_hidden_output = Array2::from_shape_vec(
      config.hidden_output_shape,
      config.weight_hidden_output,
    )
    .context("hidden-output weights do not match their declared shape")?;

    if weight_input_hidden.nrows() != weight_hidden_output.ncols() {
      anyhow::bail!(
        "hidden layer width mismatch: {} vs {}",
        weight_input_hidden.nrows(),
        weight_hidden_output.ncols()
      );
    }

    Ok(Self {
      weight_input_hidden,
      weight_hidden_output,
    })
  }
}
