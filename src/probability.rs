use super::*;

const SUM_TOLERANCE: f64 = 1e-4;

/// Classes the model scores, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) enum Label {
  Normal,
  MyocardialInfarction,
  PostMi,
}

pub(crate) const LABELS: [Label; 3] =
  [Label::Normal, Label::MyocardialInfarction, Label::PostMi];

impl Label {
  pub(crate) fn index(self) -> usize {
    match self {
      Self::Normal => 0,
      Self::MyocardialInfarction => 1,
      Self::PostMi => 2,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct ProbabilityVector([f64; 3]);

impl ProbabilityVector {
  pub(crate) fn new(values: &[f64]) -> Result<Self, Error> {
    let values: [f64; 3] = values.try_into().map_err(|_| {
      Error::probabilities(format!(
        "expected {} scores, got {}",
        LABELS.len(),
        values.len()
      ))
    })?;

    if let Some(value) =
      values.iter().find(|value| !value.is_finite() || **value < 0.0)
    {
      return Err(Error::probabilities(format!("score {value} out of range")));
    }

    let sum = values.iter().sum::<f64>();

    if (sum - 1.0).abs() > SUM_TOLERANCE {
      return Err(Error::probabilities(format!("scores sum to {sum}")));
    }

    Ok(Self(values))
  }

  pub(crate) fn get(&self, label: Label) -> f64 {
    self.0[label.index()]
  }

  pub(crate) fn values(&self) -> &[f64] {
    &self.0
  }
}
