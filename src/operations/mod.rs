//! Blend operations for combining SDFs
//!
//! Shapes inside a group combine with either [`sdf_union`] or
//! [`sdf_smooth_union`]; groups always combine with the smooth union.
//!
//! # Optimizations
//! - **Forced Inlining**: All functions use `#[inline(always)]`.
//! - **Branchless Smooth**: No safety checks for `k <= 0`.

mod smooth;
mod union;

pub use smooth::{sdf_smooth_union, sdf_smooth_union_x4};
pub use union::{sdf_union, sdf_union_x4};
