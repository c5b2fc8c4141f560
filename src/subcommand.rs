use {
  super::*, crate::arguments::Format, batch::Batch, predict::Predict,
};

mod batch;
mod predict;

const DISCLAIMER: &str =
  "Educational use only. Not a substitute for clinical diagnosis.";

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[clap(name = "batch", about = "Classify several ECG images in parallel")]
  Batch(Batch),
  #[clap(name = "predict", about = "Classify a single ECG image")]
  Predict(Predict),
}

impl Subcommand {
  pub(crate) fn run(self, pipeline: &Pipeline, format: Format) -> Result {
    match self {
      Self::Batch(batch) => batch.run(pipeline, format),
      Self::Predict(predict) => predict.run(pipeline, format),
    }
  }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
  image: &'a Path,
  #[serde(flatten)]
  classification: &'a Classification,
  #[serde(skip_serializing_if = "Option::is_none")]
  printed_parameters: Option<PrintedParameters>,
  notice: &'static str,
}

impl<'a> Report<'a> {
  fn new(
    image: &'a Path,
    classification: &'a Classification,
    transcript: &Transcript,
  ) -> Self {
    Self {
      image,
      classification,
      printed_parameters: transcript.printed_parameters(),
      notice: SIGNAL_FIDELITY_NOTICE,
    }
  }

  fn render(&self, format: Format) -> Result<String> {
    match format {
      Format::Json => serde_json::to_string(self)
        .context("failed to serialize classification"),
      Format::Text => Ok(self.to_string()),
    }
  }
}

impl Display for Report<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let result = &self.classification.result;

    writeln!(f, "Image: {}", self.image.display())?;

    if self.classification.is_demo {
      writeln!(
        f,
        "Demo mode: no classifier loaded, this result is illustrative only"
      )?;
    }

    writeln!(f, "Diagnosis: {} [{}]", result.label, result.severity_tier)?;
    writeln!(f, "Confidence: {:.2}%", result.confidence_percent)?;
    writeln!(f, "Interpretation: {}", result.explanation)?;

    if let Some(printed) = &self.printed_parameters {
      if printed.is_empty() {
        writeln!(f, "Printed values: none found in transcript")?;
      } else {
        writeln!(f, "Printed values (as printed on the image, not measured):")?;

        for (name, value) in printed.entries() {
          if let Some(value) = value {
            writeln!(f, "  {name}: {value}")?;
          }
        }
      }
    }

    writeln!(f, "Note: {}", self.notice)?;
    write!(f, "{DISCLAIMER}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn classification(is_demo: bool) -> Classification {
    let probabilities = ProbabilityVector::new(&[0.1, 0.85, 0.05]).unwrap();

    Classification {
      result: DiagnosisPolicy::new(Strategy::Banding, DemoSource::Fixed)
        .classify(&probabilities),
      is_demo,
    }
  }

  #[test]
  fn text_report_marks_demo() {
    let classification = classification(true);

    let text = Report::new(
      Path::new("scan.png"),
      &classification,
      &Transcript::Unavailable,
    )
    .render(Format::Text)
    .unwrap();

    assert!(text.contains("Demo mode"));
    assert!(text.contains("Acute Myocardial Infarction [critical]"));
    assert!(text.contains("Confidence: 85.00%"));
    assert!(text.contains(SIGNAL_FIDELITY_NOTICE));
    assert!(!text.contains("Printed values"));
  }

  #[test]
  fn text_report_lists_printed_values() {
    let classification = classification(false);

    let text = Report::new(
      Path::new("scan.png"),
      &classification,
      &Transcript::Available("HR: 64 QTc: 440".into()),
    )
    .render(Format::Text)
    .unwrap();

    assert!(!text.contains("Demo mode"));
    assert!(text.contains("not measured"));
    assert!(text.contains("  HR: 64"));
    assert!(text.contains("  QTc: 440"));
  }

  #[test]
  fn json_report_is_flat() {
    let classification = classification(true);

    let json = Report::new(
      Path::new("scan.png"),
      &classification,
      &Transcript::Unavailable,
    )
    .render(Format::Json)
    .unwrap();

    let value = serde_json::from_str::<serde_json::Value>(&json).unwrap();

    assert_eq!(value["image"], "scan.png");
    assert_eq!(value["label"], "Acute Myocardial Infarction");
    assert_eq!(value["severity_tier"], "Critical");
    assert_eq!(value["is_demo"], true);
    assert_eq!(value["notice"], SIGNAL_FIDELITY_NOTICE);
    assert!(value.get("printed_parameters").is_none());
  }
}
