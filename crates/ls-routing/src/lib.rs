//! `ls-routing` — the collaborators the batch engine drives.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`engine`]  | `RouteEngine` trait, `DijkstraEngine`                       |
//! | [`links`]   | `LinkLookup` trait, `Traversal`, `LinkTable`                |
//! | [`network`] | `Network` (CSR), `NetworkBuilder`                           |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                          |
//!
//! The batch engine only ever talks to the two traits.  `Network`,
//! `DijkstraEngine` and `LinkTable` are a complete in-process implementation
//! of them; applications with their own graph (contraction hierarchies,
//! an external service, …) implement the traits instead.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Traversal`.            |

pub mod engine;
pub mod error;
pub mod links;
pub mod network;

#[cfg(test)]
mod tests;

pub use engine::{DijkstraEngine, RouteEngine};
pub use error::{RoutingError, RoutingResult};
pub use links::{LinkLookup, LinkTable, Traversal};
pub use network::{Network, NetworkBuilder};
