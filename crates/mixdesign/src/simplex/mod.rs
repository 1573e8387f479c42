//! Three-component composition space (the 2-simplex).
//!
//! Purpose
//! - Hold the `Composition` type used by interpolators and point tables.
//! - Map compositions to a planar equilateral triangle and back.
//!
//! Conventions
//! - Compositions are fractions summing to 1; percentages only appear at the
//!   I/O boundary (`to_percent`/`from_percent`).
//! - The planar triangle has vertices A=(0,0), B=(1,0), C=(1/2, √3/2).
//!
//! Code cross-refs: `interp::rbf`, `interp::piecewise`, `surface`.

mod transform;
mod types;

pub use transform::{to_barycentric, to_planar, to_planar_all};
pub use types::{
    from_percent, is_on_simplex, mixture_to_composition, to_percent, Composition, SimplexCfg,
};

#[cfg(test)]
mod tests;
