/// A 2D field of integer displacements `(dx, dy)`, indexed by source pixel `(x, y)`.
///
/// Cell `(x, y)` says that the best-known match for the source patch centered at
/// `(x, y)` is the target patch centered at `(x + dx, y + dy)`. Storage is row-major
/// in a single vector, like the other grids in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetField {
    offsets: Vec<(i32, i32)>,
    width: usize,
    height: usize,
}

impl OffsetField {
    /// Creates a field of the given size with every offset set to `(0, 0)`.
    ///
    /// # Examples
    /// ```
    /// use patchmatch::offset_field::OffsetField;
    /// let field = OffsetField::zeros(10, 5);
    /// assert_eq!(field.width(), 10);
    /// assert_eq!(field.height(), 5);
    /// assert_eq!(field.get(9, 4), (0, 0));
    /// ```
    pub fn zeros(width: usize, height: usize) -> OffsetField {
        OffsetField {
            offsets: vec![(0, 0); width * height],
            width,
            height,
        }
    }

    /// Returns the offset stored at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> (i32, i32) {
        self.offsets[x + y * self.width]
    }

    /// Overwrites the offset stored at `(x, y)`.
    ///
    /// # Examples
    /// ```
    /// use patchmatch::offset_field::OffsetField;
    /// let mut field = OffsetField::zeros(4, 4);
    /// field.set(1, 2, 3, -2);
    /// assert_eq!(field.get(1, 2), (3, -2));
    /// assert_eq!(field.target_of(1, 2), (4, 0));
    /// ```
    pub fn set(&mut self, x: usize, y: usize, dx: i32, dy: i32) {
        self.offsets[x + y * self.width] = (dx, dy);
    }

    /// The coordinate `(x + dx, y + dy)` the cell at `(x, y)` points to.
    pub fn target_of(&self, x: usize, y: usize) -> (isize, isize) {
        let (dx, dy) = self.get(x, y);
        (x as isize + dx as isize, y as isize + dy as isize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Iterates over `(x, y, (dx, dy))` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, (i32, i32))> + '_ {
        let width = self.width;
        self.offsets
            .iter()
            .enumerate()
            .map(move |(i, &off)| (i % width, i / width, off))
    }
}

/// Best patch distance found so far for every cell of an [OffsetField].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DistanceField {
    distances: Vec<u64>,
    width: usize,
}

impl DistanceField {
    pub(crate) fn new(width: usize, height: usize) -> DistanceField {
        DistanceField {
            distances: vec![u64::MAX; width * height],
            width,
        }
    }

    pub(crate) fn get(&self, x: usize, y: usize) -> u64 {
        self.distances[x + y * self.width]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, distance: u64) {
        self.distances[x + y * self.width] = distance;
    }

    pub(crate) fn mean(&self) -> f64 {
        if self.distances.is_empty() {
            return 0.0;
        }
        let total: f64 = self.distances.iter().map(|&d| d as f64).sum();
        total / self.distances.len() as f64
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[u64] {
        &self.distances
    }
}
