//! Main Jet Size Tables
//!
//! Main jets are drilled to fixed manufactured sizes, so a computed jet must
//! land on an available size. A table is described by its smallest size,
//! largest size and the increment between stocked sizes.
//!
//! ## Snapping
//!
//! - Nearest available size wins.
//! - An exact tie between two sizes goes to the **larger** jet: a slightly
//!   rich mixture costs a little power, a lean one can seize the engine.
//! - A raw size strictly outside the table clamps to the boundary size and
//!   reports which side it was clamped on.

use serde::{Deserialize, Serialize};

/// Ordered set of stocked main jet sizes: `smallest, smallest + increment, ..., largest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JetSizeTable {
    /// Smallest stocked jet
    pub smallest: u32,
    /// Largest stocked jet (must be reachable from `smallest` in whole increments)
    pub largest: u32,
    /// Step between stocked sizes
    pub increment: u32,
}

/// Which boundary a raw jet size was clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampSide {
    /// Raw size was below the smallest stocked jet
    Below,
    /// Raw size was above the largest stocked jet
    Above,
}

/// Outcome of snapping a continuous jet size onto the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnappedJet {
    /// Stocked jet size
    pub size: u32,
    /// Set when the raw value fell outside the table
    pub clamped: Option<ClampSide>,
}

impl JetSizeTable {
    pub const fn new(smallest: u32, largest: u32, increment: u32) -> Self {
        JetSizeTable {
            smallest,
            largest,
            increment,
        }
    }

    /// All stocked sizes in ascending order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jet_core::engines::JetSizeTable;
    ///
    /// let table = JetSizeTable::new(124, 132, 2);
    /// assert_eq!(table.sizes(), vec![124, 126, 128, 130, 132]);
    /// ```
    pub fn sizes(&self) -> Vec<u32> {
        (self.smallest..=self.largest)
            .step_by(self.increment.max(1) as usize)
            .collect()
    }

    /// Number of stocked sizes
    pub fn len(&self) -> usize {
        ((self.largest - self.smallest) / self.increment.max(1) + 1) as usize
    }

    /// Tables always hold at least one size
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check whether `size` is a stocked jet
    pub fn contains(&self, size: u32) -> bool {
        size >= self.smallest
            && size <= self.largest
            && (size - self.smallest) % self.increment.max(1) == 0
    }

    /// Snap a continuous jet size onto the table.
    ///
    /// `raw` must be finite; callers check this before snapping.
    pub fn snap(&self, raw: f64) -> SnappedJet {
        let smallest = self.smallest as f64;
        let largest = self.largest as f64;

        if raw < smallest {
            return SnappedJet {
                size: self.smallest,
                clamped: Some(ClampSide::Below),
            };
        }
        if raw > largest {
            return SnappedJet {
                size: self.largest,
                clamped: Some(ClampSide::Above),
            };
        }

        let step = self.increment.max(1) as f64;
        let steps_below = ((raw - smallest) / step).floor();
        let lower = smallest + steps_below * step;
        let upper = (lower + step).min(largest);

        // Ties go to the larger (richer) jet
        let size = if raw - lower >= upper - raw { upper } else { lower };

        SnappedJet {
            size: size as u32,
            clamped: None,
        }
    }
}
