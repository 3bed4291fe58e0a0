use crate::error::PatchMatchError;

/// A basic representation of an image with interleaved `u8` samples.
/// Each pixel occupies `channels` consecutive bytes (1 for grayscale, 3 for RGB, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Pixel data stored row by row in a 1D `Vec<u8>`, `channels` bytes per pixel.
    pub img_data: Vec<u8>,
    /// The width (in pixels) of the image.
    pub width: usize,
    /// The height (in pixels) of the image.
    pub height: usize,
    /// The number of samples per pixel.
    pub channels: usize,
}

impl Default for Photo {
    /// Creates an empty single-channel `Photo` with zero width and height.
    fn default() -> Photo {
        Photo {
            img_data: Vec::new(),
            width: 0,
            height: 0,
            channels: 1,
        }
    }
}

impl Photo {
    /// Wraps raw interleaved sample data.
    ///
    /// # Errors
    /// Returns [`PatchMatchError::InvalidPhoto`] if `img_data` does not hold exactly
    /// `width * height * channels` samples, or if `channels` is zero.
    ///
    /// # Examples
    /// ```
    /// use patchmatch::photo::Photo;
    /// let photo = Photo::new(vec![0u8; 2 * 3 * 3], 2, 3, 3).unwrap();
    /// assert_eq!(photo.get_pixel(1, 2), &[0, 0, 0]);
    /// assert!(Photo::new(vec![0u8; 5], 2, 3, 1).is_err());
    /// ```
    pub fn new(
        img_data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Photo, PatchMatchError> {
        let expected = width * height * channels;
        if channels == 0 || img_data.len() != expected {
            return Err(PatchMatchError::InvalidPhoto {
                expected,
                actual: img_data.len(),
            });
        }
        Ok(Photo {
            img_data,
            width,
            height,
            channels,
        })
    }

    /// Creates a photo with every sample set to `value`.
    pub fn new_filled(width: usize, height: usize, channels: usize, value: u8) -> Photo {
        Photo {
            img_data: vec![value; width * height * channels],
            width,
            height,
            channels,
        }
    }

    /// Returns the samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is out of bounds.
    pub fn get_pixel(&self, x: usize, y: usize) -> &[u8] {
        let index = (y * self.width + x) * self.channels;
        &self.img_data[index..index + self.channels]
    }

    /// Mutable access to the samples of the pixel at `(x, y)`.
    pub fn get_pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let index = (y * self.width + x) * self.channels;
        &mut self.img_data[index..index + self.channels]
    }

    /// Whether `(x, y)` (possibly negative) addresses a pixel of this photo.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Produces a new `Photo` scaled proportionally to `new_width`.
    ///
    /// This method preserves the aspect ratio by computing a scale factor and rounding
    /// the new height accordingly. The samples in the resulting image are computed
    /// by averaging all corresponding pixels from the original image that fall into
    /// the region mapped by the new pixel, channel by channel.
    ///
    /// # Panics
    /// Panics if `new_width` is zero, since that would lead to a division by zero.
    pub fn get_scaled_proportional(&self, new_width: usize) -> Photo {
        if new_width == 0 {
            panic!("The new width must be greater than 0");
        }

        let scale_factor = new_width as f32 / self.width as f32;
        let new_height = ((self.height as f32 * scale_factor).round() as usize).max(1);
        let channels = self.channels;

        let mut new_img_data = vec![0u8; new_width * new_height * channels];
        let mut totals = vec![0u32; channels];

        for new_y in 0..new_height {
            for new_x in 0..new_width {
                // Block of original pixels covered by this new pixel
                let orig_x_start = ((new_x as f32) / scale_factor).round() as usize;
                let orig_y_start = ((new_y as f32) / scale_factor).round() as usize;
                let orig_x_end = (((new_x + 1) as f32) / scale_factor).round() as usize;
                let orig_y_end = (((new_y + 1) as f32) / scale_factor).round() as usize;

                let orig_x_end = orig_x_end.min(self.width - 1);
                let orig_y_end = orig_y_end.min(self.height - 1);
                let orig_x_start = orig_x_start.min(orig_x_end);
                let orig_y_start = orig_y_start.min(orig_y_end);

                totals.iter_mut().for_each(|t| *t = 0);
                let mut pixel_count: u32 = 0;

                for orig_y in orig_y_start..=orig_y_end {
                    for orig_x in orig_x_start..=orig_x_end {
                        for (total, &sample) in totals.iter_mut().zip(self.get_pixel(orig_x, orig_y)) {
                            *total += sample as u32;
                        }
                        pixel_count += 1;
                    }
                }

                let new_index = (new_y * new_width + new_x) * channels;
                for (c, total) in totals.iter().enumerate() {
                    new_img_data[new_index + c] = (total / pixel_count) as u8;
                }
            }
        }

        Photo {
            img_data: new_img_data,
            width: new_width,
            height: new_height,
            channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length_and_zero_channels() {
        assert_eq!(
            Photo::new(vec![0; 11], 2, 2, 3),
            Err(PatchMatchError::InvalidPhoto { expected: 12, actual: 11 })
        );
        assert!(Photo::new(vec![], 2, 2, 0).is_err());
    }

    #[test]
    fn pixel_access_is_interleaved() {
        let photo = Photo::new((0u8..12).collect(), 2, 2, 3).unwrap();
        assert_eq!(photo.get_pixel(0, 0), &[0, 1, 2]);
        assert_eq!(photo.get_pixel(1, 0), &[3, 4, 5]);
        assert_eq!(photo.get_pixel(0, 1), &[6, 7, 8]);
        assert!(photo.contains(1, 1));
        assert!(!photo.contains(-1, 0));
        assert!(!photo.contains(2, 0));
    }

    #[test]
    fn halving_averages_blocks_per_channel() {
        let mut photo = Photo::new_filled(4, 4, 2, 0);
        photo.get_pixel_mut(0, 0).copy_from_slice(&[100, 40]);
        photo.get_pixel_mut(1, 0).copy_from_slice(&[100, 40]);

        let scaled = photo.get_scaled_proportional(2);
        assert_eq!((scaled.width, scaled.height, scaled.channels), (2, 2, 2));
        // Block ends are inclusive: the first output pixel averages the 3x3
        // block at the origin, two of whose pixels are set.
        assert_eq!(scaled.get_pixel(0, 0), &[22, 8]);
        assert_eq!(scaled.get_pixel(1, 1), &[0, 0]);
    }
}
