//! `mp-path` — keyframed paths that scripted platforms follow.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`node`]      | `PathNode`, `PathTemplate` — authored input               |
//! | [`profile`]   | `MotionProfile` — accel / cruise / decel timing           |
//! | [`spline`]    | `SplineSegment` — Catmull-Rom evaluation and arc length   |
//! | [`keyframe`]  | `Keyframe` — precomputed per-node timing and distances    |
//! | [`timeline`]  | `PathTimeline` — build and sample                         |
//! | [`cursor`]    | `PathCursor`, `PathStep`, `PathEvent`, `MotionState`      |
//! | [`loader`]    | `load_paths_csv`, `load_paths_reader`                     |
//! | [`error`]     | `PathError`, `PathResult<T>`                              |
//!
//! # Motion model (summary)
//!
//! ```text
//! timer         = progress_ms − lap_start_ms
//! current frame = the keyframe whose [arrive_ms, next_arrive_ms) holds timer
//! docked        = arrive_ms ≤ timer < depart_ms
//! in transit    = depart_ms ≤ timer < next_arrive_ms
//! ```
//!
//! A built `PathTimeline` is immutable and can be shared; each platform owns
//! a `PathCursor` and advances it with [`PathTimeline::step`].

pub mod cursor;
pub mod error;
pub mod keyframe;
pub mod loader;
pub mod node;
pub mod profile;
pub mod spline;
pub mod timeline;


pub use cursor::{MotionState, PathCursor, PathEvent, PathStep};
pub use error::{PathError, PathResult};
pub use keyframe::Keyframe;
pub use loader::{load_paths_csv, load_paths_reader};
pub use node::{PathNode, PathTemplate};
pub use profile::MotionProfile;
pub use spline::SplineSegment;
pub use timeline::PathTimeline;
