use crate::patch_distance::patch_distance;
use crate::photo::Photo;
use rand::Rng;

/// A [Photo] surrounded by a `pad`-pixel border of uniform random noise.
///
/// With `pad = patch_size / 2`, the patch centered at unpadded `(x, y)` is the
/// patch anchored (top-left) at padded `(x, y)`, so callers keep working in the
/// unpadded coordinate space. Random border samples keep patches near the image
/// edge from matching constant or clamped regions.
#[derive(Debug, Clone)]
pub struct PaddedPhoto {
    photo: Photo,
    pad: usize,
    patch_size: usize,
}

impl PaddedPhoto {
    /// Builds the padded copy of `photo` for patches of side `patch_size` (odd).
    pub fn new<R: Rng>(photo: &Photo, patch_size: usize, rng: &mut R) -> Self {
        let pad = patch_size / 2;
        let width = photo.width + 2 * pad;
        let height = photo.height + 2 * pad;
        let channels = photo.channels;

        let img_data: Vec<u8> = (0..width * height * channels).map(|_| rng.random()).collect();
        let mut padded = Photo {
            img_data,
            width,
            height,
            channels,
        };

        let row_len = photo.width * channels;
        for y in 0..photo.height {
            let src = y * row_len;
            let dst = ((y + pad) * width + pad) * channels;
            padded.img_data[dst..dst + row_len].copy_from_slice(&photo.img_data[src..src + row_len]);
        }

        PaddedPhoto {
            photo: padded,
            pad,
            patch_size,
        }
    }

    /// Width of the unpadded photo.
    pub fn inner_width(&self) -> usize {
        self.photo.width - 2 * self.pad
    }

    /// Height of the unpadded photo.
    pub fn inner_height(&self) -> usize {
        self.photo.height - 2 * self.pad
    }

    pub fn pad(&self) -> usize {
        self.pad
    }

    /// The padded photo itself.
    pub fn photo(&self) -> &Photo {
        &self.photo
    }

    /// SSD between the patch centered at unpadded `(x0, y0)` here and the patch
    /// centered at unpadded `(x1, y1)` in `other`.
    pub fn distance_to(&self, other: &PaddedPhoto, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
        patch_distance(&self.photo, &other.photo, x0, y0, x1, y1, self.patch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn interior_matches_source_and_border_is_filled() {
        let photo = Photo::new((0u8..24).collect(), 4, 3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let padded = PaddedPhoto::new(&photo, 5, &mut rng);

        assert_eq!(padded.pad(), 2);
        assert_eq!((padded.photo().width, padded.photo().height), (8, 7));
        assert_eq!((padded.inner_width(), padded.inner_height()), (4, 3));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(padded.photo().get_pixel(x + 2, y + 2), photo.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn border_is_noise_not_constant() {
        let photo = Photo::new_filled(8, 8, 1, 0);
        let mut rng = StdRng::seed_from_u64(3);
        let padded = PaddedPhoto::new(&photo, 7, &mut rng);

        let border: Vec<u8> = (0..padded.photo().width)
            .map(|x| padded.photo().get_pixel(x, 0)[0])
            .collect();
        assert!(border.iter().any(|&v| v != border[0]));
    }

    #[test]
    fn centered_distance_uses_unpadded_coordinates() {
        let mut photo = Photo::new_filled(6, 6, 1, 0);
        photo.get_pixel_mut(3, 3)[0] = 10;
        let mut rng = StdRng::seed_from_u64(11);
        let padded = PaddedPhoto::new(&photo, 3, &mut rng);

        // Patches centered on (3, 3) and (2, 2) differ only where the bright pixel sits.
        assert_eq!(padded.distance_to(&padded, 3, 3, 3, 3), 0);
        assert_eq!(padded.distance_to(&padded, 3, 3, 2, 2), 200);
    }
}
