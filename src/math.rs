use super::*;

/// Index of the largest value. Ties resolve to the earliest index.
pub(crate) fn argmax(values: &[f64]) -> usize {
  values
    .iter()
    .enumerate()
    .fold(0, |best, (index, &value)| {
      if value > values[best] {
        index
      } else {
        best
      }
    })
}

pub(crate) fn relu(x: f64) -> f64 {
  x.max(0.0)
}

pub(crate) fn softmax(logits: &[f64]) -> Vec<f64> {
  let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);

  let exps = logits
    .iter()
    .map(|logit| (logit - max).exp())
    .collect::<Vec<f64>>();

  let sum = exps.iter().sum::<f64>();

  exps.into_iter().map(|value| value / sum).collect()
}
