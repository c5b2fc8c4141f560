//! Mapping class probabilities to a user-facing finding.
//!
//! Two strategies are supported and never mixed: [`Strategy::Argmax`] reports
//! the most likely class, and [`Strategy::Banding`] reads only the myocardial
//! infarction score and places it into fixed bands. Small changes near a band
//! edge flip the finding; that sensitivity is intended.

use super::*;

/// Probabilities used when no classifier is available.
pub(crate) const DEMO_PROBABILITIES: [f64; 3] = [0.15, 0.62, 0.23];

/// Lower edges of the banding strategy, checked from the top down.
const BANDS: [(f64, Finding); 4] = [
  (0.80, Finding::AcuteMyocardialInfarction),
  (0.55, Finding::PostMyocardialInfarction),
  (0.30, Finding::AbnormalEcg),
  (0.00, Finding::NormalEcg),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) enum SeverityTier {
  Success,
  Warning,
  Critical,
}

impl Display for SeverityTier {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Success => write!(f, "success"),
      Self::Warning => write!(f, "warning"),
      Self::Critical => write!(f, "critical"),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Finding {
  Normal,
  MyocardialInfarction,
  PostMi,
  NormalEcg,
  AbnormalEcg,
  PostMyocardialInfarction,
  AcuteMyocardialInfarction,
}

impl Finding {
  pub(crate) fn name(self) -> &'static str {
    match self {
      Self::Normal => "Normal",
      Self::MyocardialInfarction => "Myocardial Infarction",
      Self::PostMi => "Post-MI",
      Self::NormalEcg => "Normal ECG",
      Self::AbnormalEcg => "Abnormal ECG",
      Self::PostMyocardialInfarction => "Post-Myocardial Infarction",
      Self::AcuteMyocardialInfarction => "Acute Myocardial Infarction",
    }
  }

  pub(crate) fn tier(self) -> SeverityTier {
    match self {
      Self::Normal | Self::NormalEcg => SeverityTier::Success,
      Self::AbnormalEcg | Self::PostMyocardialInfarction => {
        SeverityTier::Warning
      }
      Self::MyocardialInfarction
      | Self::PostMi
      | Self::AcuteMyocardialInfarction => SeverityTier::Critical,
    }
  }

  pub(crate) fn explanation(self) -> &'static str {
    match self {
      Self::Normal | Self::NormalEcg => {
        "Normal sinus rhythm. No pathological ST-segment changes. \
         No abnormal Q-waves detected."
      }
      Self::MyocardialInfarction => {
        "ST-segment elevation or depression patterns detected. \
         Possible pathological Q-waves. \
         Suggestive of myocardial tissue injury."
      }
      Self::PostMi | Self::PostMyocardialInfarction => {
        "Residual ECG abnormalities. Scar-related electrical changes. \
         Seen after previous myocardial infarction."
      }
      Self::AbnormalEcg => {
        "Non-specific abnormalities in the tracing. \
         Findings fall short of an infarction pattern. \
         Clinical correlation and a repeat ECG are advised."
      }
      Self::AcuteMyocardialInfarction => {
        "Strong ST-segment elevation pattern consistent with acute injury. \
         Possible pathological Q-waves. \
         Seek emergency medical care immediately."
      }
    }
  }

  /// Finding reported by the argmax strategy for a class.
  fn of_label(label: Label) -> Self {
    match label {
      Label::Normal => Self::Normal,
      Label::MyocardialInfarction => Self::MyocardialInfarction,
      Label::PostMi => Self::PostMi,
    }
  }
}

impl Serialize for Finding {
  fn serialize<S: serde::Serializer>(
    &self,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl Display for Finding {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Strategy {
  #[default]
  Argmax,
  Banding,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct DiagnosisResult {
  pub(crate) label: Finding,
  pub(crate) severity_tier: SeverityTier,
  pub(crate) confidence_percent: f64,
  pub(crate) explanation: &'static str,
}

impl DiagnosisResult {
  fn new(label: Finding, probability: f64) -> Self {
    Self {
      label,
      severity_tier: label.tier(),
      confidence_percent: (probability * 100.0).clamp(0.0, 100.0),
      explanation: label.explanation(),
    }
  }
}

/// Where demo-mode probabilities come from.
///
/// A seeded source derives each draw from the seed and the request index, so
/// results do not depend on the order requests arrive in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DemoSource {
  #[default]
  Fixed,
  Seeded(u64),
}

impl DemoSource {
  fn sample(self, request: u64) -> Result<ProbabilityVector, Error> {
    let values = match self {
      Self::Fixed => DEMO_PROBABILITIES,
      Self::Seeded(seed) => {
        let infarction =
          StdRng::seed_from_u64(seed ^ request).gen_range(0.0..1.0);

        let rest = 1.0 - infarction;

        [rest * 0.75, infarction, rest * 0.25]
      }
    };

    ProbabilityVector::new(&values)
  }
}

#[derive(Debug, Default)]
pub(crate) struct DiagnosisPolicy {
  strategy: Strategy,
  demo: DemoSource,
}

impl DiagnosisPolicy {
  pub(crate) fn new(strategy: Strategy, demo: DemoSource) -> Self {
    Self { strategy, demo }
  }

  pub(crate) fn strategy(&self) -> Strategy {
    self.strategy
  }

  pub(crate) fn classify(
    &self,
    probabilities: &ProbabilityVector,
  ) -> DiagnosisResult {
    match self.strategy {
      Strategy::Argmax => {
        let index = argmax(probabilities.values());
        let label = LABELS[index];

        DiagnosisResult::new(
          Finding::of_label(label),
          probabilities.get(label),
        )
      }
      Strategy::Banding => {
        let infarction = probabilities.get(Label::MyocardialInfarction);

        DiagnosisResult::new(band(infarction), infarction)
      }
    }
  }

  /// Synthetic stand-in for the model output of one request, used in demo
  /// mode.
  pub(crate) fn demo_sample(
    &self,
    request: u64,
  ) -> Result<ProbabilityVector, Error> {
    self.demo.sample(request)
  }
}

/// Band for a myocardial infarction probability. Lower edges are inclusive.
pub(crate) fn band(infarction: f64) -> Finding {
  BANDS
    .iter()
    .find(|(lower, _)| infarction >= *lower)
    .map_or(Finding::NormalEcg, |(_, finding)| *finding)
}
