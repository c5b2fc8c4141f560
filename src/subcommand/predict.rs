use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Predict {
  #[clap(short, long)]
  image: PathBuf,
  #[clap(
    short,
    long,
    help = "Text already recognized from the image, used to report \
            printed values"
  )]
  transcript: Option<PathBuf>,
}

impl Predict {
  pub(crate) fn run(self, pipeline: &Pipeline, format: Format) -> Result {
    let transcript = Transcript::load(self.transcript.as_deref())?;

    if transcript.is_available() {
      log::info!("Reading printed values from transcript");
    }

    let image = RawImage::load(&self.image)?;

    let classification = pipeline
      .classify(&image, 0)
      .with_context(|| format!("failed to classify {}", self.image.display()))?;

    println!(
      "{}",
      Report::new(&self.image, &classification, &transcript).render(format)?
    );

    Ok(())
  }
}
