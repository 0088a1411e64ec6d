//! Pure data structures shared by the basket, catalog and checkout layers.
//!
//! Everything here is plain data: cloneable, comparable and serde-friendly. Invariants that
//! span several values (unique ids in a basket, totals) live in the components that own them.

pub mod basket;
pub mod order;
pub mod product;

pub use basket::*;
pub use order::*;
pub use product::*;
