//! `mp-entity` — the entity registry for the moving-platform framework.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`entity`]    | `Entity`, `EntityKind`, `EntityFlags`, `Attachment`           |
//! | [`store`]     | `EntityStore` — arena indexed by `EntityId`                   |
//! | [`builder`]   | `EntitySpawn` — fluent spawn description                      |
//! | [`events`]    | `EventQueue`, `Task` — per-entity deferred FIFO               |
//! | [`effects`]   | `RideEffect`, `RideEffects` — applied "ride this carrier" effects |
//! | [`error`]     | `EntityError`, `EntityResult<T>`                              |
//!
//! # Ownership
//!
//! There is no global accessor: every component that needs to resolve an
//! `EntityId` receives `&EntityStore` / `&mut EntityStore` explicitly.  Ids
//! are never reused, so a destroyed entity's id keeps resolving to `None`.

pub mod builder;
pub mod effects;
pub mod entity;
pub mod error;
pub mod events;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::EntitySpawn;
pub use effects::{RideEffect, RideEffects};
pub use entity::{Attachment, Entity, EntityFlags, EntityKind};
pub use error::{EntityError, EntityResult};
pub use events::{EventQueue, Task};
pub use store::EntityStore;
