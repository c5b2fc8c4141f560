use super::*;

/// A decoded upload. Only PNG and JPEG bytes make it this far.
#[derive(Debug)]
pub(crate) struct RawImage(DynamicImage);

impl RawImage {
  pub(crate) fn decode(bytes: &[u8]) -> Result<Self, Error> {
    let format = image::guess_format(bytes).map_err(Error::unsupported)?;

    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
      return Err(Error::unsupported(format!(
        "{format:?} images are not accepted, upload PNG or JPEG"
      )));
    }

    let image = image::load_from_memory_with_format(bytes, format)
      .map_err(Error::unsupported)?;

    if image.width() == 0 || image.height() == 0 {
      return Err(Error::unsupported("image has no pixels"));
    }

    Ok(Self(image))
  }

  pub(crate) fn load(path: &Path) -> Result<Self> {
    let bytes = read(path)
      .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(Self::decode(&bytes)?)
  }

  pub(crate) fn as_dynamic(&self) -> &DynamicImage {
    &self.0
  }
}
