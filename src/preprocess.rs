//! Image to tensor normalization.
//!
//! Every image the classifier sees goes through [`normalize`], which must stay
//! bit-for-bit reproducible: the same decoded image always yields the same
//! tensor.

use super::*;

/// Side length of the square model input.
pub(crate) const INPUT_SIZE: u32 = 224;

const CHANNELS: usize = 3;

/// Number of scalars in one flattened input image.
pub(crate) const INPUT_LEN: usize =
  INPUT_SIZE as usize * INPUT_SIZE as usize * CHANNELS;

/// A `(1, 224, 224, 3)` tensor with values in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NormalizedTensor(Array4<f64>);

impl NormalizedTensor {
  #[cfg(test)]
  pub(crate) fn shape(&self) -> &[usize] {
    self.0.shape()
  }

  pub(crate) fn as_array(&self) -> &Array4<f64> {
    &self.0
  }

  #[cfg(test)]
  pub(crate) fn values(&self) -> impl Iterator<Item = &f64> {
    self.0.iter()
  }
}

/// Forces RGB, center-crops to a square, resizes to `INPUT_SIZE` and scales
/// channel values into `[0, 1]`.
pub(crate) fn normalize(image: &RawImage) -> NormalizedTensor {
  let rgb = image.as_dynamic().to_rgb8();

  let (width, height) = rgb.dimensions();
  let side = width.min(height);

  let cropped = image::imageops::crop_imm(
    &rgb,
    (width - side) / 2,
    (height - side) / 2,
    side,
    side,
  )
  .to_image();

  let resized = image::imageops::resize(
    &cropped,
    INPUT_SIZE,
    INPUT_SIZE,
    FilterType::Triangle,
  );

  let size = INPUT_SIZE as usize;

  NormalizedTensor(Array4::from_shape_fn(
    (1, size, size, CHANNELS),
    |(_, y, x, channel)| {
      f64::from(resized.get_pixel(x as u32, y as u32)[channel]) / 255.0
    },
  ))
}
