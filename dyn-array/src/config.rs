//! Array construction parameters.

use crate::alloc::Global;

/// Slot count of a freshly constructed array when none is given.
pub const DEFAULT_CAPACITY: usize = 8;

/// Multiplier applied to the capacity on every growth step.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// Configuration for [`DynArray::new_in`](crate::DynArray::new_in).
///
/// Validated once at construction; the resulting array copies out what it
/// needs and keeps no reference to the config.
#[derive(Clone, Debug)]
pub struct ArrayConfig<A = Global> {
    /// Number of slots allocated up front. Must be at least 1.
    ///
    /// Default: 8.
    pub initial_capacity: usize,

    /// Capacity multiplier used when an insertion finds the array full.
    ///
    /// Default: 2.0. Values `<= 1` (and NaN) are replaced with the default.
    pub growth_factor: f64,

    /// Upper bound on the number of slots.
    ///
    /// Default: `usize::MAX`, which the array lowers to the largest slot
    /// count its element type can address.
    pub max_elements: usize,

    /// Allocator providing every buffer the array owns.
    pub allocator: A,
}

impl<A> ArrayConfig<A> {
    /// Create a config with default sizing around `allocator`.
    pub fn new(allocator: A) -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_elements: usize::MAX,
            allocator,
        }
    }

    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// The growth factor the array will actually use.
    pub fn effective_growth_factor(&self) -> f64 {
        // Written so that NaN also falls back to the default.
        if self.growth_factor > 1.0 {
            self.growth_factor
        } else {
            DEFAULT_GROWTH_FACTOR
        }
    }
}

impl Default for ArrayConfig<Global> {
    fn default() -> Self {
        Self::new(Global)
    }
}
