//! Compile-time tile addressing primitives.
//!
//! Fused kernels (tiled GEMM, multi-GEMM, attention) move operands between
//! global memory, shared memory and registers through strided rectangular
//! views. This crate provides the static shape/stride algebra those kernels
//! are built from: every extent, stride and loop bound is a const generic
//! parameter, so sub-tile addresses fold to constants and the hot path
//! carries no runtime indexing state beyond one base pointer per view.
//!
//! The building blocks, leaves first:
//! - [`TileShape`] and the layouts in [`layout`] describe extents and the
//!   2D-to-linear offset mapping.
//! - [`Tile`] pairs a borrowed base pointer with a static layout. It never
//!   owns memory; sub-tiles alias their parent by design.
//! - [`TileIterator`] partitions a tile into a stripe grid of equally shaped
//!   chunks and hands out either concrete sub-tiles or narrower iterators
//!   (wildcard slicing), enabling recursive decomposition down to per-thread
//!   register fragments.
//!
//! Synchronization between the execution units that share a tile's contents
//! is the caller's responsibility; the address computations here are pure and
//! safe to run concurrently from any number of units.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use half;

mod dispatch;
pub use dispatch::*;
mod element;
pub use element::*;
mod iter;
pub use iter::*;
mod print;
pub use print::*;
mod reg;
pub use reg::*;
mod shape;
pub use shape::*;
mod tile;
pub use tile::*;

pub mod layout;
