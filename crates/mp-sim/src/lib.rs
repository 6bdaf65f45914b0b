//! `mp-sim` — the world tick loop for the moving-platform framework.
//!
//! # Five-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Motion   — each platform's timeline steps by tick_ms (parallel with
//!                the `parallel` feature); steps apply in CarrierId order:
//!                  events → pose → passengers repositioned → mounts relay
//!                  cross-map step → statics destroyed, handoff queued
//!   ② Regions  — RegionManager::refresh; platforms whose activity flipped
//!                load or unload their static passengers.
//!   ③ Tasks    — per-entity task queues drain in EntityId order; boarding
//!                requests execute unless already aborted.
//!   ④ Handoff  — queued teleports: players through the region manager,
//!                creatures and objects migrate, transients destroyed.
//!   ⑤ Sweep    — requests whose candidate stopped ticking are aborted;
//!                finished requests retired; debug consistency assert.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Samples platform timelines on Rayon's thread pool.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mp_behavior::{AlwaysActive, NoopBehavior, NoopMovement};
//! use mp_core::WorldConfig;
//! use mp_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(config, NoopBehavior, AlwaysActive, NoopMovement)
//!     .platform(template, statics)
//!     .build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use observer::{NoopObserver, TickSummary, WorldObserver};
pub use world::World;
