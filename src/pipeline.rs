use super::*;

/// Outcome of one request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Classification {
  #[serde(flatten)]
  pub(crate) result: DiagnosisResult,
  pub(crate) is_demo: bool,
}

#[derive(Debug)]
pub(crate) struct Pipeline {
  resource: ModelResource,
  policy: DiagnosisPolicy,
}

impl Pipeline {
  pub(crate) fn new(resource: ModelResource, policy: DiagnosisPolicy) -> Self {
    Self { resource, policy }
  }

  pub(crate) fn resource(&self) -> &ModelResource {
    &self.resource
  }

  pub(crate) fn policy(&self) -> &DiagnosisPolicy {
    &self.policy
  }

  /// Classifies one decoded upload. Falls back to demo probabilities when no
  /// model is available; `request` keys the demo draw.
  pub(crate) fn classify(
    &self,
    image: &RawImage,
    request: u64,
  ) -> Result<Classification, Error> {
    let tensor = normalize(image);

    let (probabilities, is_demo) = match self.resource.acquire() {
      Some(handle) => (handle.infer(&tensor)?, false),
      None => (self.policy.demo_sample(request)?, true),
    };

    log::debug!(
      "Scores {:?} (demo: {is_demo})",
      probabilities.values()
    );

    Ok(Classification {
      result: self.policy.classify(&probabilities),
      is_demo,
    })
  }

  /// Decodes raw upload bytes, then classifies them as the first request.
  #[cfg(test)]
  pub(crate) fn classify_bytes(
    &self,
    bytes: &[u8],
  ) -> Result<Classification, Error> {
    self.classify(&RawImage::decode(bytes)?, 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn png() -> Vec<u8> {
    fixtures::encode(&fixtures::gradient(320, 240), ImageFormat::Png)
  }

  #[test]
  fn missing_model_falls_back_to_demo() {
    let dir = TempDir::new("pipeline").unwrap();

    let pipeline = Pipeline::new(
      ModelResource::new(dir.path().join("ecg_brain.json")),
      DiagnosisPolicy::new(Strategy::Argmax, DemoSource::Fixed),
    );

    let first = pipeline.classify_bytes(&png()).unwrap();
    let second = pipeline.classify_bytes(&png()).unwrap();

    assert!(first.is_demo);
    assert_eq!(first, second);
    assert_eq!(first.result.label, Finding::MyocardialInfarction);
    assert_eq!(first.result.severity_tier, SeverityTier::Critical);
    assert_relative_eq!(
      first.result.confidence_percent,
      62.0,
      epsilon = 1e-9
    );
    assert_eq!(pipeline.resource().load_attempts(), 1);
  }

  #[test]
  fn demo_uses_configured_strategy() {
    let dir = TempDir::new("pipeline").unwrap();

    let pipeline = Pipeline::new(
      ModelResource::new(dir.path().join("ecg_brain.json")),
      DiagnosisPolicy::new(Strategy::Banding, DemoSource::Fixed),
    );

    let classification = pipeline.classify_bytes(&png()).unwrap();

    assert!(classification.is_demo);
    assert_eq!(
      classification.result.label,
      Finding::PostMyocardialInfarction
    );
    assert_eq!(classification.result.severity_tier, SeverityTier::Warning);
  }

  #[test]
  fn seeded_demo_is_keyed_by_request() {
    let dir = TempDir::new("pipeline").unwrap();

    let pipeline = Pipeline::new(
      ModelResource::new(dir.path().join("ecg_brain.json")),
      DiagnosisPolicy::new(Strategy::Banding, DemoSource::Seeded(3)),
    );

    let image = RawImage::decode(&png()).unwrap();

    let later = pipeline.classify(&image, 4).unwrap();
    let earlier = pipeline.classify(&image, 1).unwrap();

    assert!(later.is_demo);
    assert_eq!(pipeline.classify(&image, 4).unwrap(), later);
    assert_eq!(pipeline.classify(&image, 1).unwrap(), earlier);
  }

  #[test]
  fn loaded_model_is_not_demo() {
    let dir = TempDir::new("pipeline").unwrap();

    let path = fixtures::write_network(&dir, &fixtures::network(2));

    let pipeline = Pipeline::new(
      ModelResource::new(&path),
      DiagnosisPolicy::default(),
    );

    let first = pipeline.classify_bytes(&png()).unwrap();
    let second = pipeline.classify_bytes(&png()).unwrap();

    assert!(!first.is_demo);
    assert_eq!(first, second);
    assert!((0.0..=100.0).contains(&first.result.confidence_percent));
    assert_eq!(pipeline.policy().strategy(), Strategy::Argmax);
  }

  #[test]
  fn unsupported_upload_is_rejected_before_inference() {
    let dir = TempDir::new("pipeline").unwrap();

    let pipeline = Pipeline::new(
      ModelResource::new(dir.path().join("ecg_brain.json")),
      DiagnosisPolicy::default(),
    );

    assert!(matches!(
      pipeline.classify_bytes(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;"),
      Err(Error::UnsupportedInputFormat { .. })
    ));

    assert_eq!(pipeline.resource().load_attempts(), 0);
  }

  #[test]
  fn inference_failure_is_per_request() {
    let dir = TempDir::new("pipeline").unwrap();

    let network = Network::new(NetworkConfig {
      weight_input_hidden: Array2::zeros((1, 3)),
      weight_hidden_output: Array2::zeros((3, 1)),
    });

    let path = fixtures::write_network(&dir, &network);

    let pipeline =
      Pipeline::new(ModelResource::new(&path), DiagnosisPolicy::default());

    for _ in 0..3 {
      assert!(matches!(
        pipeline.classify_bytes(&png()),
        Err(Error::InferenceFailure { .. })
      ));
    }

    assert_eq!(pipeline.resource().load_attempts(), 1);
  }

  #[test]
  fn classification_serializes_flat() {
    let dir = TempDir::new("pipeline").unwrap();

    let pipeline = Pipeline::new(
      ModelResource::new(dir.path().join("ecg_brain.json")),
      DiagnosisPolicy::default(),
    );

    let json =
      serde_json::to_value(pipeline.classify_bytes(&png()).unwrap()).unwrap();

    assert_eq!(json["label"], "Myocardial Infarction");
    assert_eq!(json["is_demo"], true);
  }
}
