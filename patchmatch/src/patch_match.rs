use crate::error::PatchMatchError;
use crate::offset_field::{DistanceField, OffsetField};
use crate::padded_photo::PaddedPhoto;
use crate::photo::Photo;
use log::{debug, info, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Parameters of a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchMatchParams {
    /// Side of the square patches, in pixels. Must be odd; even values are bumped by one.
    pub patch_size: usize,
    /// Number of propagation/random-search sweeps over the field.
    pub iterations: usize,
}

impl Default for PatchMatchParams {
    fn default() -> Self {
        Self {
            patch_size: 15,
            iterations: 5,
        }
    }
}

impl PatchMatchParams {
    /// Returns the parameters with an odd patch size.
    ///
    /// An even patch size is not an error: it is incremented by one and a warning is logged.
    ///
    /// # Examples
    /// ```
    /// use patchmatch::patch_match::PatchMatchParams;
    /// let params = PatchMatchParams { patch_size: 8, iterations: 3 }.normalized();
    /// assert_eq!(params.patch_size, 9);
    /// ```
    pub fn normalized(self) -> Self {
        if self.patch_size % 2 == 0 {
            warn!("Input patch size {} is even, adding 1.", self.patch_size);
            return Self {
                patch_size: self.patch_size + 1,
                ..self
            };
        }
        self
    }
}

/// Computes an approximate nearest-neighbour offset field from `source` to `target`.
///
/// Runs [PatchMatcher] to completion: random initialization followed by
/// `params.iterations` serpentine sweeps of propagation and randomized search.
///
/// # Errors
/// Returns [PatchMatchError::ChannelMismatch] if the photos have different channel
/// counts, and [PatchMatchError::EmptyTarget] if `target` has no pixels. Nothing is
/// computed in either case.
///
/// # Examples
/// ```
/// use patchmatch::patch_match::{patch_match, PatchMatchParams};
/// use patchmatch::photo::Photo;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let source = Photo::new_filled(16, 12, 3, 90);
/// let target = Photo::new_filled(20, 20, 3, 90);
/// let params = PatchMatchParams { patch_size: 5, iterations: 2 };
/// let field = patch_match(&source, &target, &params, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!((field.width(), field.height()), (16, 12));
/// ```
pub fn patch_match<R: Rng>(
    source: &Photo,
    target: &Photo,
    params: &PatchMatchParams,
    rng: &mut R,
) -> Result<OffsetField, PatchMatchError> {
    let matcher = PatchMatcher::new(source, target, params, rng)?;
    Ok(matcher.run())
}

/// Half-extents of the successive randomized-search windows for a target of the
/// given size.
///
/// The full extents start at `width - 1` and `height - 1` and are halved (integer
/// division) after every sample. At least one window is always produced, and
/// production stops once either full extent drops below 1, so a full extent of
/// exactly 1 still yields a final window of half-extent 0.
#[derive(Debug, Clone)]
struct SearchWindows {
    extent_x: isize,
    extent_y: isize,
    started: bool,
}

impl SearchWindows {
    fn new(width: usize, height: usize) -> Self {
        SearchWindows {
            extent_x: width as isize - 1,
            extent_y: height as isize - 1,
            started: false,
        }
    }
}

impl Iterator for SearchWindows {
    type Item = (isize, isize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.started && !(self.extent_x >= 1 && self.extent_y >= 1) {
            return None;
        }
        self.started = true;
        let half = (self.extent_x / 2, self.extent_y / 2);
        self.extent_x /= 2;
        self.extent_y /= 2;
        Some(half)
    }
}

/// Owns the state of one PatchMatch run: the padded photos, the offset field
/// being refined and the best distance of every cell.
///
/// # How It Works
/// 1. **Initialization**: both photos are padded with random noise, and every
///    source pixel gets a uniformly random target pixel.
/// 2. **Sweeps**: even sweeps scan rows top to bottom and columns left to right,
///    odd sweeps scan in reverse. Each visited pixel tries the offsets of its two
///    scan predecessors, then samples shrinking random windows around its best
///    target. A candidate replaces the current offset only if it is strictly better.
/// 3. **Result**: [PatchMatcher::into_offset_field] hands the field to the caller.
///
/// Between sweeps the field can be inspected with [PatchMatcher::offset_field];
/// `sweep` takes `&mut self`, so nothing can observe a half-finished sweep.
pub struct PatchMatcher<R: Rng> {
    source: PaddedPhoto,
    target: PaddedPhoto,
    offsets: OffsetField,
    distances: DistanceField,
    iterations: usize,
    completed: usize,
    rng: R,
}

impl<R: Rng> PatchMatcher<R> {
    /// Validates the inputs, pads both photos and randomly initializes the field.
    ///
    /// # Errors
    /// Same as [patch_match].
    pub fn new(
        source: &Photo,
        target: &Photo,
        params: &PatchMatchParams,
        mut rng: R,
    ) -> Result<Self, PatchMatchError> {
        if source.channels != target.channels {
            return Err(PatchMatchError::ChannelMismatch {
                expected: source.channels,
                actual: target.channels,
            });
        }
        if target.width == 0 || target.height == 0 {
            return Err(PatchMatchError::EmptyTarget);
        }

        let params = params.normalized();
        info!(
            "PatchMatch {}x{} -> {}x{}, patch size {}, {} iterations",
            source.width, source.height, target.width, target.height, params.patch_size, params.iterations
        );

        let padded_source = PaddedPhoto::new(source, params.patch_size, &mut rng);
        let padded_target = PaddedPhoto::new(target, params.patch_size, &mut rng);

        let mut matcher = PatchMatcher {
            source: padded_source,
            target: padded_target,
            offsets: OffsetField::zeros(source.width, source.height),
            distances: DistanceField::new(source.width, source.height),
            iterations: params.iterations,
            completed: 0,
            rng,
        };
        matcher.init_random();
        Ok(matcher)
    }

    /// Assigns every source pixel a uniformly random target pixel.
    fn init_random(&mut self) {
        let target_width = self.target.inner_width();
        let target_height = self.target.inner_height();

        for y0 in 0..self.offsets.height() {
            for x0 in 0..self.offsets.width() {
                let x1 = self.rng.random_range(0..target_width);
                let y1 = self.rng.random_range(0..target_height);
                self.offsets
                    .set(x0, y0, x1 as i32 - x0 as i32, y1 as i32 - y0 as i32);
                let distance = self.source.distance_to(&self.target, x0, y0, x1, y1);
                self.distances.set(x0, y0, distance);
            }
        }
    }

    /// Runs all remaining sweeps and returns the field.
    pub fn run(mut self) -> OffsetField {
        while self.completed < self.iterations {
            self.sweep();
        }
        self.into_offset_field()
    }

    /// Like [PatchMatcher::run], but checks `cancel` before every scanned pixel.
    ///
    /// When the flag is set the run stops and the partially refined field is
    /// returned. It is still consistent: every cell holds an in-bounds offset.
    pub fn run_cancellable(mut self, cancel: &AtomicBool) -> OffsetField {
        while self.completed < self.iterations {
            if !self.sweep_until(Some(cancel)) {
                info!("PatchMatch cancelled during iteration {}", self.completed + 1);
                break;
            }
        }
        self.into_offset_field()
    }

    /// Performs the next sweep. Returns `false` once all iterations are done.
    pub fn sweep(&mut self) -> bool {
        if self.completed >= self.iterations {
            return false;
        }
        self.sweep_until(None)
    }

    /// Scans the field once in the direction of the current iteration.
    /// Returns `false` if `cancel` interrupted the scan.
    fn sweep_until(&mut self, cancel: Option<&AtomicBool>) -> bool {
        let width = self.offsets.width();
        let height = self.offsets.height();
        let forward = self.completed % 2 == 0;

        // Forward sweeps skip the first row and column, backward sweeps the last
        // ones, so the scan predecessor at `- inc` always exists.
        let scan = |len: usize, i: usize| if forward { i + 1 } else { len - 2 - i };

        for j in 0..height.saturating_sub(1) {
            let y = scan(height, j);
            for i in 0..width.saturating_sub(1) {
                let x = scan(width, i);
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    return false;
                }
                let (prev_x, prev_y) = if forward { (x - 1, y - 1) } else { (x + 1, y + 1) };
                self.propagate(x, y, prev_x, y);
                self.propagate(x, y, x, prev_y);
                self.random_search(x, y);
            }
        }

        self.completed += 1;
        debug!(
            "Iteration {} done, mean patch distance {:.1}",
            self.completed,
            self.distances.mean()
        );
        true
    }

    /// Tries the offset of the neighbour `(nx, ny)` for the pixel `(x, y)`.
    fn propagate(&mut self, x: usize, y: usize, nx: usize, ny: usize) {
        let (dx, dy) = self.offsets.get(nx, ny);
        self.try_candidate(x, y, x as isize + dx as isize, y as isize + dy as isize);
    }

    /// Samples shrinking windows centered on the target held at entry.
    fn random_search(&mut self, x: usize, y: usize) {
        let target_width = self.target.inner_width() as isize;
        let target_height = self.target.inner_height() as isize;
        let (center_x, center_y) = self.offsets.target_of(x, y);

        for (half_x, half_y) in SearchWindows::new(self.target.inner_width(), self.target.inner_height()) {
            let min_x = (center_x - half_x).max(0);
            let max_x = (center_x + half_x).min(target_width - 1);
            let min_y = (center_y - half_y).max(0);
            let max_y = (center_y + half_y).min(target_height - 1);

            // Clamped bounds are non-negative.
            let x1 = self.rng.random_range(min_x as usize..=max_x as usize);
            let y1 = self.rng.random_range(min_y as usize..=max_y as usize);
            self.try_candidate(x, y, x1 as isize, y1 as isize);
        }
    }

    /// Accepts the target `(x1, y1)` for pixel `(x, y)` if it lies in the target
    /// photo and strictly improves the current distance.
    fn try_candidate(&mut self, x: usize, y: usize, x1: isize, y1: isize) -> bool {
        if x1 < 0
            || y1 < 0
            || x1 as usize >= self.target.inner_width()
            || y1 as usize >= self.target.inner_height()
        {
            return false;
        }
        let distance = self
            .source
            .distance_to(&self.target, x, y, x1 as usize, y1 as usize);
        if distance < self.distances.get(x, y) {
            self.distances.set(x, y, distance);
            self.offsets
                .set(x, y, (x1 - x as isize) as i32, (y1 - y as isize) as i32);
            return true;
        }
        false
    }

    /// The field as of the last completed sweep.
    pub fn offset_field(&self) -> &OffsetField {
        &self.offsets
    }

    /// Number of sweeps performed so far.
    pub fn completed_iterations(&self) -> usize {
        self.completed
    }

    /// Mean best patch distance over the whole field.
    pub fn mean_distance(&self) -> f64 {
        self.distances.mean()
    }

    pub fn into_offset_field(self) -> OffsetField {
        self.offsets
    }
}
