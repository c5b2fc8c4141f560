//! Process-wide classifier lifecycle.
//!
//! The classifier artifact is loaded at most once. The outcome, a ready
//! handle or permanent unavailability, is memoized for the lifetime of the
//! [`ModelResource`] and never refreshed.

use super::*;

/// Shared, read-only reference to a loaded classifier.
#[derive(Clone, Debug)]
pub(crate) struct ModelHandle(Arc<Network>);

impl ModelHandle {
  pub(crate) fn new(network: Network) -> Self {
    Self(Arc::new(network))
  }

  pub(crate) fn infer(
    &self,
    tensor: &NormalizedTensor,
  ) -> Result<ProbabilityVector, Error> {
    let input = tensor
      .as_array()
      .to_shape((1, tensor.as_array().len()))
      .map_err(Error::inference)?;

    let scores = self.0.forward(input.view())?;

    ProbabilityVector::new(&scores).map_err(Error::inference)
  }

  #[cfg(test)]
  pub(crate) fn same_as(&self, other: &ModelHandle) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

#[derive(Debug)]
pub(crate) struct ModelResource {
  path: PathBuf,
  state: OnceLock<Option<ModelHandle>>,
  load_attempts: AtomicUsize,
}

impl ModelResource {
  pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      state: OnceLock::new(),
      load_attempts: AtomicUsize::new(0),
    }
  }

  pub(crate) fn path(&self) -> &Path {
    &self.path
  }

  /// The loaded classifier, or `None` when the artifact is missing or
  /// unreadable. Concurrent first callers block on a single load.
  pub(crate) fn acquire(&self) -> Option<ModelHandle> {
    self.state.get_or_init(|| self.load()).clone()
  }

  pub(crate) fn load_attempts(&self) -> usize {
    self.load_attempts.load(Ordering::SeqCst)
  }

  fn load(&self) -> Option<ModelHandle> {
    self.load_attempts.fetch_add(1, Ordering::SeqCst);

    if !self.path.exists() {
      log::warn!(
        "Model not found at {}; running in demo mode",
        self.path.display()
      );
      return None;
    }

    match Network::load_weights(&self.path) {
      Ok(network) => {
        log::info!(
          "Loaded model {} ({} inputs, {} hidden, {} outputs)",
          self.path.display(),
          network.input_len(),
          network.hidden_len(),
          network.output_len()
        );
        Some(ModelHandle::new(network))
      }
      Err(error) => {
        log::warn!(
          "Failed to load model {}; running in demo mode: {error:#}",
          self.path.display()
        );
        None
      }
    }
  }
}
