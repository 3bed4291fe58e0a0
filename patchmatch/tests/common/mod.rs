#![allow(dead_code)]

use patchmatch::photo::Photo;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Single-channel photo with `value` inside the square
/// `[x0, x0 + size) x [y0, y0 + size)` and 0 elsewhere.
pub fn block_photo(width: usize, height: usize, x0: usize, y0: usize, size: usize, value: u8) -> Photo {
    let mut photo = Photo::new_filled(width, height, 1, 0);
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            photo.get_pixel_mut(x, y)[0] = value;
        }
    }
    photo
}

/// Deterministic textured photo: no two nearby patches are alike.
pub fn textured_photo(width: usize, height: usize, channels: usize, seed: u64) -> Photo {
    let mut photo = Photo::new_filled(width, height, channels, 0);
    let mut rng = StdRng::seed_from_u64(seed);
    rng.fill(&mut photo.img_data[..]);
    photo
}

/// Crops `photo` to the `width` x `height` window whose top-left corner is `(x0, y0)`.
pub fn crop(photo: &Photo, x0: usize, y0: usize, width: usize, height: usize) -> Photo {
    let mut out = Photo::new_filled(width, height, photo.channels, 0);
    for y in 0..height {
        for x in 0..width {
            out.get_pixel_mut(x, y)
                .copy_from_slice(photo.get_pixel(x0 + x, y0 + y));
        }
    }
    out
}
