use crate::photo::Photo;

/// Sum of squared per-sample differences between two `patch_size` × `patch_size`
/// patches, anchored at their top-left corners `(x0, y0)` in `photo1` and
/// `(x1, y1)` in `photo2`, over all channels.
///
/// Both patches must lie fully inside their photos and the photos must have the
/// same channel count; the engine guarantees this by only reading padded photos.
///
/// # Examples
/// ```
/// use patchmatch::patch_distance::patch_distance;
/// use patchmatch::photo::Photo;
/// let a = Photo::new_filled(4, 4, 1, 10);
/// let b = Photo::new_filled(4, 4, 1, 13);
/// assert_eq!(patch_distance(&a, &a, 0, 0, 1, 1, 3), 0);
/// assert_eq!(patch_distance(&a, &b, 0, 0, 1, 1, 3), 9 * 9);
/// ```
pub fn patch_distance(
    photo1: &Photo,
    photo2: &Photo,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    patch_size: usize,
) -> u64 {
    debug_assert_eq!(photo1.channels, photo2.channels);
    debug_assert!(x0 + patch_size <= photo1.width && y0 + patch_size <= photo1.height);
    debug_assert!(x1 + patch_size <= photo2.width && y1 + patch_size <= photo2.height);

    let channels = photo1.channels;
    let row_len = patch_size * channels;
    let mut sum_sq = 0u64;

    for dy in 0..patch_size {
        // Interleaved samples make each patch row one contiguous run.
        let start1 = ((y0 + dy) * photo1.width + x0) * channels;
        let start2 = ((y1 + dy) * photo2.width + x1) * channels;
        let row1 = &photo1.img_data[start1..start1 + row_len];
        let row2 = &photo2.img_data[start2..start2 + row_len];

        for (&a, &b) in row1.iter().zip(row2) {
            let diff = a as i64 - b as i64;
            sum_sq += (diff * diff) as u64;
        }
    }
    sum_sq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_over_every_channel() {
        let a = Photo::new(vec![0, 0, 0, 0, 0, 0, 0, 0], 2, 2, 2).unwrap();
        let b = Photo::new(vec![1, 2, 0, 0, 0, 0, 3, 0], 2, 2, 2).unwrap();
        assert_eq!(patch_distance(&a, &b, 0, 0, 0, 0, 2), 1 + 4 + 9);
    }

    #[test]
    fn reads_the_anchored_window_only() {
        let mut a = Photo::new_filled(5, 5, 1, 0);
        a.get_pixel_mut(4, 4)[0] = 255;
        let zeros = Photo::new_filled(5, 5, 1, 0);

        // The 3x3 window at (0, 0) does not touch (4, 4); the one at (2, 2) does.
        assert_eq!(patch_distance(&a, &zeros, 0, 0, 0, 0, 3), 0);
        assert_eq!(patch_distance(&a, &zeros, 2, 2, 0, 0, 3), 255 * 255);
    }

    #[test]
    fn is_symmetric() {
        let a = Photo::new((0u8..16).collect(), 4, 4, 1).unwrap();
        let b = Photo::new((0u8..16).rev().collect(), 4, 4, 1).unwrap();
        assert_eq!(
            patch_distance(&a, &b, 1, 0, 0, 1, 3),
            patch_distance(&b, &a, 0, 1, 1, 0, 3)
        );
    }
}
