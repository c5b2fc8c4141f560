use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Batch {
  #[clap(required = true)]
  images: Vec<PathBuf>,
}

impl Batch {
  pub(crate) fn run(self, pipeline: &Pipeline, format: Format) -> Result {
    let progress_bar = ProgressBar::new(self.images.len() as u64);

    progress_bar.set_style(
      ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} Images")?
        .progress_chars("=>-"),
    );

    let outcomes = Self::classify_all(&self.images, pipeline, &progress_bar);

    progress_bar.finish_and_clear();

    let mut failed = 0;

    for (path, outcome) in &outcomes {
      match outcome {
        Ok(classification) => println!(
          "{}",
          Report::new(path, classification, &Transcript::Unavailable)
            .render(format)?
        ),
        Err(error) => {
          failed += 1;
          eprintln!("error: {error:#}");
        }
      }
    }

    log::info!(
      "Classified {} of {} images",
      outcomes.len() - failed,
      outcomes.len()
    );

    if failed > 0 {
      anyhow::bail!("{failed} of {} images failed", outcomes.len());
    }

    Ok(())
  }

  /// Classifies every image in parallel. Outcomes keep input order and each
  /// image's position is its request index.
  fn classify_all(
    images: &[PathBuf],
    pipeline: &Pipeline,
    progress_bar: &ProgressBar,
  ) -> Vec<(PathBuf, Result<Classification>)> {
    images
      .par_iter()
      .enumerate()
      .map(|(index, path)| {
        let outcome = RawImage::load(path).and_then(|image| {
          pipeline
            .classify(&image, index as u64)
            .with_context(|| format!("failed to classify {}", path.display()))
        });

        progress_bar.inc(1);

        (path.clone(), outcome)
      })
      .collect()
  }
}
