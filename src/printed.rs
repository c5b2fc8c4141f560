//! Values printed on the ECG image itself.
//!
//! A scanned tracing does not carry the raw signal, so nothing here measures
//! intervals. When the caller supplies text already recognized from the image,
//! labelled values such as `HR: 72` are picked out of it and reported as
//! printed values only.

use super::*;

pub(crate) const SIGNAL_FIDELITY_NOTICE: &str =
  "Scanned ECG images lack the raw signal fidelity needed to measure HR, PR, \
   QRS, QT or QTc. No interval values are derived from the image.";

const LABEL: &str = "QTc|QRS|QT|PR|HR";

const VALUE: &str = r"\d{1,4}(?:\.\d+)?";

static SINGLE: OnceLock<Regex> = OnceLock::new();

static PAIR: OnceLock<Regex> = OnceLock::new();

/// `HR: 72`, `PR interval 160`, `QRS duration = 94`.
fn single_pattern() -> &'static Regex {
  SINGLE.get_or_init(|| {
    let pattern = [
      r"(?i)\b(",
      LABEL,
      r")\b\s*(?:interval|rate|duration)?\s*[:=]?\s*(",
      VALUE,
      r")",
    ]
    .concat();

    Regex::new(&pattern).expect("single parameter pattern is valid")
  })
}

/// `QT/QTc: 380/420`, where the values follow the labels in order.
fn pair_pattern() -> &'static Regex {
  PAIR.get_or_init(|| {
    let pattern = [
      r"(?i)\b(",
      LABEL,
      r")\s*/\s*(",
      LABEL,
      r")\b\s*[:=]?\s*(",
      VALUE,
      r")(?:\s*/\s*(",
      VALUE,
      r"))?",
    ]
    .concat();

    Regex::new(&pattern).expect("paired parameter pattern is valid")
  })
}

/// Text recognized from the image by an external reader, if one ran.
#[derive(Debug)]
pub(crate) enum Transcript {
  Available(String),
  Unavailable,
}

impl Transcript {
  pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => {
        let text = read_to_string(path).with_context(|| {
          format!("failed to read transcript {}", path.display())
        })?;
        Ok(Self::Available(text))
      }
      None => Ok(Self::Unavailable),
    }
  }

  pub(crate) fn is_available(&self) -> bool {
    matches!(self, Self::Available(_))
  }

  pub(crate) fn printed_parameters(&self) -> Option<PrintedParameters> {
    match self {
      Self::Available(text) => Some(PrintedParameters::parse(text)),
      Self::Unavailable => None,
    }
  }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct PrintedParameters {
  pub(crate) heart_rate: Option<f64>,
  pub(crate) pr: Option<f64>,
  pub(crate) qrs: Option<f64>,
  pub(crate) qt: Option<f64>,
  pub(crate) qtc: Option<f64>,
}

impl PrintedParameters {
  /// First value found for each label wins. Slash-joined labels take their
  /// values in order, so a label never picks up its neighbour's value.
  pub(crate) fn parse(text: &str) -> Self {
    let mut parameters = Self::default();

    let mut paired = Vec::new();

    for captures in pair_pattern().captures_iter(text) {
      if let Some(span) = captures.get(0) {
        paired.push(span.range());
      }

      for (label, value) in [(1, 3), (2, 4)] {
        let Some(value) = captures.get(value) else {
          continue;
        };

        parameters.record(&captures[label], value.as_str());
      }
    }

    for captures in single_pattern().captures_iter(text) {
      let start = captures.get(1).map_or(0, |label| label.start());

      if paired.iter().any(|span| span.contains(&start)) {
        continue;
      }

      parameters.record(&captures[1], &captures[2]);
    }

    parameters
  }

  fn record(&mut self, label: &str, value: &str) {
    let Ok(value) = value.parse::<f64>() else {
      return;
    };

    let slot = match label.to_ascii_uppercase().as_str() {
      "HR" => &mut self.heart_rate,
      "PR" => &mut self.pr,
      "QRS" => &mut self.qrs,
      "QT" => &mut self.qt,
      "QTC" => &mut self.qtc,
      _ => return,
    };

    slot.get_or_insert(value);
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.entries().iter().all(|(_, value)| value.is_none())
  }

  pub(crate) fn entries(&self) -> [(&'static str, Option<f64>); 5] {
    [
      ("HR", self.heart_rate),
      ("PR", self.pr),
      ("QRS", self.qrs),
      ("QT", self.qt),
      ("QTc", self.qtc),
    ]
  }
}
