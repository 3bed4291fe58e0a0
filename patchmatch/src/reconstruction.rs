use crate::error::PatchMatchError;
use crate::offset_field::OffsetField;
use crate::photo::Photo;

/// Resamples `query` through `offsets`.
///
/// `image` is the photo the offset field was computed for: the result has its
/// dimensions and channel count, and pixel `(x, y)` of the result is the pixel of
/// `query` at `(x + dx, y + dy)`. Feeding the target photo of a matching run as
/// `query` rebuilds the source photo out of target patches.
///
/// # Errors
/// - [PatchMatchError::ChannelMismatch] if `image` and `query` have different channel counts.
/// - [PatchMatchError::DimensionMismatch] if the field is not the size of `image`.
/// - [PatchMatchError::OffsetOutOfBounds] if an offset points outside `query`.
///
/// # Examples
/// ```
/// use patchmatch::offset_field::OffsetField;
/// use patchmatch::photo::Photo;
/// use patchmatch::reconstruction::reconstruct;
///
/// let image = Photo::new(vec![1, 2, 3, 4], 2, 2, 1).unwrap();
/// let mut offsets = OffsetField::zeros(2, 2);
/// offsets.set(0, 0, 1, 1);
/// let rebuilt = reconstruct(&image, &image, &offsets).unwrap();
/// assert_eq!(rebuilt.img_data, vec![4, 2, 3, 4]);
/// ```
pub fn reconstruct(
    image: &Photo,
    query: &Photo,
    offsets: &OffsetField,
) -> Result<Photo, PatchMatchError> {
    if image.channels != query.channels {
        return Err(PatchMatchError::ChannelMismatch {
            expected: image.channels,
            actual: query.channels,
        });
    }
    if image.width != offsets.width() || image.height != offsets.height() {
        return Err(PatchMatchError::DimensionMismatch {
            expected: (image.width, image.height),
            actual: (offsets.width(), offsets.height()),
        });
    }

    let mut result = Photo::new_filled(image.width, image.height, image.channels, 0);
    for (x, y, _) in offsets.iter() {
        let (qx, qy) = offsets.target_of(x, y);
        if !query.contains(qx, qy) {
            return Err(PatchMatchError::OffsetOutOfBounds { x, y });
        }
        result
            .get_pixel_mut(x, y)
            .copy_from_slice(query.get_pixel(qx as usize, qy as usize));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offsets_copy_the_query() {
        let query = Photo::new((0u8..30).collect(), 5, 2, 3).unwrap();
        let rebuilt = reconstruct(&query, &query, &OffsetField::zeros(5, 2)).unwrap();
        assert_eq!(rebuilt, query);
    }

    #[test]
    fn output_takes_the_image_size_not_the_query_size() {
        let image = Photo::new_filled(2, 1, 1, 0);
        let query = Photo::new((10u8..19).collect(), 3, 3, 1).unwrap();
        let mut offsets = OffsetField::zeros(2, 1);
        offsets.set(0, 0, 2, 2);
        offsets.set(1, 0, -1, 1);

        let rebuilt = reconstruct(&image, &query, &offsets).unwrap();
        assert_eq!((rebuilt.width, rebuilt.height), (2, 1));
        assert_eq!(rebuilt.img_data, vec![18, 13]);
    }

    #[test]
    fn channel_mismatch_is_checked_first() {
        let image = Photo::new_filled(4, 4, 1, 0);
        let query = Photo::new_filled(4, 4, 3, 0);
        assert_eq!(
            reconstruct(&image, &query, &OffsetField::zeros(1, 1)),
            Err(PatchMatchError::ChannelMismatch { expected: 1, actual: 3 })
        );
    }

    #[test]
    fn mismatched_field_height_is_rejected() {
        let image = Photo::new_filled(4, 4, 1, 0);
        assert_eq!(
            reconstruct(&image, &image, &OffsetField::zeros(4, 3)),
            Err(PatchMatchError::DimensionMismatch {
                expected: (4, 4),
                actual: (4, 3)
            })
        );
    }

    #[test]
    fn offsets_outside_the_query_are_reported() {
        let image = Photo::new_filled(3, 3, 1, 0);
        let mut offsets = OffsetField::zeros(3, 3);
        offsets.set(1, 2, 0, 1);
        assert_eq!(
            reconstruct(&image, &image, &offsets),
            Err(PatchMatchError::OffsetOutOfBounds { x: 1, y: 2 })
        );
    }
}
