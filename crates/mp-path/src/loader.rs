//! CSV path-template loader.
//!
//! # CSV format
//!
//! One row per node.  Rows are grouped by `path_id` and ordered by `seq`
//! within a path.  All rows of the same path must share `speed` and `accel`;
//! the values on the first row are used.
//!
//! ```csv
//! path_id,seq,map,x,y,z,stop,delay_ms,teleport,arrival_event,departure_event,speed,accel
//! 1,0,1,0,0,0,true,5000,false,10,11,20,20
//! 1,1,1,60,0,0,false,0,true,,,20,20
//! 1,2,2,100,100,0,true,5000,false,20,,20,20
//! 1,3,2,160,100,0,false,0,true,,,20,20
//! ```
//!
//! `arrival_event` / `departure_event` may be left empty.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use mp_core::{MapId, Position};

use crate::{MotionProfile, PathError, PathNode, PathResult, PathTemplate};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PathRecord {
    path_id:         u32,
    seq:             u32,
    map:             u32,
    x:               f32,
    y:               f32,
    z:               f32,
    stop:            bool,
    delay_ms:        u32,
    teleport:        bool,
    arrival_event:   Option<u32>,
    departure_event: Option<u32>,
    speed:           f32,
    accel:           f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every path template in a CSV file, keyed by `path_id`.
///
/// Templates are returned unbuilt; pass each to
/// [`PathTimeline::build`][crate::PathTimeline::build].
pub fn load_paths_csv(path: &Path) -> PathResult<BTreeMap<u32, PathTemplate>> {
    let file = std::fs::File::open(path).map_err(PathError::Io)?;
    load_paths_reader(file)
}

/// Like [`load_paths_csv`] but accepts any `Read` source.
pub fn load_paths_reader<R: Read>(reader: R) -> PathResult<BTreeMap<u32, PathTemplate>> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_path: BTreeMap<u32, Vec<PathRecord>> = BTreeMap::new();

    for result in csv_reader.deserialize::<PathRecord>() {
        let row = result.map_err(|e| PathError::Parse(e.to_string()))?;
        by_path.entry(row.path_id).or_default().push(row);
    }

    // ── Build one template per path ───────────────────────────────────────
    let mut templates = BTreeMap::new();
    for (id, mut rows) in by_path {
        rows.sort_by_key(|r| r.seq);
        if let Some(dup) = rows.windows(2).find(|w| w[0].seq == w[1].seq) {
            return Err(PathError::Parse(format!(
                "path {id}: duplicate seq {}",
                dup[0].seq
            )));
        }
        let profile = MotionProfile::new(rows[0].speed, rows[0].accel);
        let nodes = rows
            .into_iter()
            .map(|r| PathNode {
                map:             MapId(r.map),
                position:        Position::new(r.x, r.y, r.z),
                stop:            r.stop,
                delay_ms:        r.delay_ms,
                teleport:        r.teleport,
                arrival_event:   r.arrival_event,
                departure_event: r.departure_event,
            })
            .collect();
        templates.insert(id, PathTemplate::new(id, nodes, profile));
    }

    Ok(templates)
}
