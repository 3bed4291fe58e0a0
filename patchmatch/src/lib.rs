//! # PatchMatch Library
//!
//! The `patchmatch` library computes approximate dense correspondences between two
//! images. For every pixel of a source image it finds an integer offset into a target
//! image such that the square patch around the source pixel resembles the patch around
//! the offset location, measured by sum of squared differences over all channels.
//!
//! ## Overview of Modules
//!
//! - **`photo`**: Defines the `Photo` struct storing interleaved `u8` samples with an
//!   arbitrary channel count, along with pixel access and proportional downscaling.
//!
//! - **`patch_distance`**: The SSD between two equally sized square patches.
//!
//! - **`padded_photo`**: Surrounds a `Photo` with a half-patch border of random noise so
//!   that every patch centered inside the image can be read, and border patches do not
//!   spuriously match constant regions.
//!
//! - **`offset_field`**: The `OffsetField` grid of `(dx, dy)` displacements returned by
//!   the engine.
//!
//! - **`patch_match`**: The matching engine. `patch_match` runs a whole refinement;
//!   `PatchMatcher` exposes the run sweep by sweep, with optional cancellation.
//!
//! - **`reconstruction`**: Rebuilds an image by copying query pixels through an
//!   offset field.
//!
//! - **`error`**: The `PatchMatchError` type shared by the modules above.
//!
//! ## Example
//! ```
//! use patchmatch::patch_match::{patch_match, PatchMatchParams};
//! use patchmatch::photo::Photo;
//! use patchmatch::reconstruction::reconstruct;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let source = Photo::new_filled(20, 20, 1, 40);
//! let target = Photo::new_filled(24, 16, 1, 40);
//! let params = PatchMatchParams { patch_size: 7, iterations: 3 };
//!
//! let offsets = patch_match(&source, &target, &params, &mut StdRng::seed_from_u64(0))?;
//! let rebuilt = reconstruct(&source, &target, &offsets)?;
//! assert_eq!(rebuilt, source);
//! # Ok::<(), patchmatch::PatchMatchError>(())
//! ```

pub mod error;
pub mod offset_field;
pub mod padded_photo;
pub mod patch_distance;
pub mod patch_match;
pub mod photo;
pub mod reconstruction;

pub use error::PatchMatchError;
pub use offset_field::OffsetField;
pub use patch_match::{patch_match, PatchMatchParams, PatchMatcher};
pub use photo::Photo;
pub use reconstruction::reconstruct;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
