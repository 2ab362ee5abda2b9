//! Shared primitive types used across the entire simulation.

/// A simulation clock value. Minutes since local midnight.
pub type Minute = u32;

/// Customer identifier, assigned sequentially in arrival order starting at 1.
pub type CustomerId = u32;
