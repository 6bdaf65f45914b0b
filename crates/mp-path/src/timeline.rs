//! `PathTimeline` — an immutable, built path.
//!
//! # Lap model
//!
//! A lap starts at keyframe 0 (`arrive_ms = 0`) and ends when the last
//! keyframe departs; that departure time is the period.  The step from the
//! last keyframe back to keyframe 0 takes no time, so authored paths either
//! end on a teleport frame or repeat their first position.
//!
//! For the keyframe currently selected by a cursor and the lap-relative
//! `timer`:
//!
//! ```text
//! arrive_ms ≤ timer < depart_ms        docked at the keyframe
//! depart_ms ≤ timer < next_arrive_ms   in transit along the outgoing segment
//! ```
//!
//! In transit, the time since the run started and the time until it ends
//! are both known; the smaller one picks the profile side that is evaluated,
//! so acceleration and deceleration stay exactly symmetric.

use mp_core::{MapId, Pose};

use crate::{Keyframe, MotionProfile, PathError, PathResult, PathTemplate, SplineSegment};

#[derive(Clone, Debug)]
pub struct PathTimeline {
    id:        u32,
    frames:    Vec<Keyframe>,
    /// Outgoing spline segment per keyframe; `None` where it has no length.
    segments:  Vec<Option<SplineSegment>>,
    profile:   MotionProfile,
    period_ms: u32,
}

impl PathTimeline {
    /// Precompute timing, distances and splines for `template`.
    pub fn build(template: &PathTemplate) -> PathResult<Self> {
        let path = template.id;
        let nodes = &template.nodes;
        let n = nodes.len();
        if n < 2 {
            return Err(PathError::TooFewNodes { path, count: n });
        }
        template
            .profile
            .validate()
            .map_err(|reason| PathError::InvalidProfile { path, reason })?;
        if !(nodes[0].stop || nodes[n - 1].teleport) {
            return Err(PathError::FirstNodeNotStop { path });
        }
        let profile = template.profile;

        // ── Splines: one chain per stretch between teleport frames ────────
        let mut segments: Vec<Option<SplineSegment>> = vec![None; n];
        let mut chain_start = 0;
        for i in 0..n {
            if nodes[i].teleport || i == n - 1 {
                let points: Vec<_> = nodes[chain_start..=i].iter().map(|node| node.position).collect();
                for j in 0..points.len() - 1 {
                    segments[chain_start + j] = Some(SplineSegment::from_chain(&points, j));
                }
                chain_start = i + 1;
            }
        }
        let seg_len: Vec<f32> =
            segments.iter().map(|s| s.as_ref().map_or(0.0, SplineSegment::length)).collect();

        // ── Runs: timing and distances ────────────────────────────────────
        let run_end = |j: usize| nodes[j].stop || nodes[j].teleport || j == n - 1;

        let mut frames: Vec<Keyframe> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| Keyframe {
                index:           i,
                map:             node.map,
                position:        node.position,
                heading:         node_heading(&segments, i),
                stop:            node.stop,
                teleport:        node.teleport,
                arrive_ms:       0,
                depart_ms:       0,
                next_arrive_ms:  0,
                dist_since_stop: 0.0,
                dist_until_stop: 0.0,
                dist_to_next:    seg_len[i],
                time_from_stop:  0.0,
                time_to_stop:    0.0,
                arrival_event:   node.arrival_event,
                departure_event: node.departure_event,
            })
            .collect();

        let mut i = 0;
        while i < n {
            frames[i].depart_ms = frames[i].arrive_ms + nodes[i].dwell_ms();

            if segments[i].is_none() {
                frames[i].next_arrive_ms = frames[i].depart_ms;
                if i + 1 < n {
                    frames[i + 1].arrive_ms = frames[i].depart_ms;
                }
                i += 1;
                continue;
            }

            // Cumulative distance from the run start at `i` to each node.
            let mut cum = vec![0.0_f32];
            let mut e = i;
            loop {
                cum.push(cum[e - i] + seg_len[e]);
                e += 1;
                if run_end(e) {
                    break;
                }
            }
            let len = cum[e - i];
            let run_time = profile.run_time(len);
            let run_depart = frames[i].depart_ms;

            for k in i..e {
                let s = cum[k - i];
                let t = profile.time_at(s, len);
                let frame = &mut frames[k];
                if k > i {
                    frame.arrive_ms = run_depart + secs_to_ms(t);
                    frame.depart_ms = frame.arrive_ms;
                }
                frame.dist_since_stop = s;
                frame.dist_until_stop = len - s;
                frame.time_from_stop = t;
                frame.time_to_stop = run_time - t;
                frame.next_arrive_ms = run_depart + secs_to_ms(profile.time_at(cum[k - i + 1], len));
            }
            frames[e].arrive_ms = frames[e - 1].next_arrive_ms;
            i = e;
        }

        let period_ms = frames[n - 1].depart_ms;
        if period_ms == 0 {
            return Err(PathError::ZeroPeriod { path });
        }

        Ok(Self { id: path, frames, segments, profile, period_ms })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    #[inline]
    pub fn frame(&self, i: usize) -> &Keyframe {
        &self.frames[i]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: building rejects paths with fewer than two nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[inline]
    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Map of keyframe 0, where every platform starts.
    #[inline]
    pub fn start_map(&self) -> MapId {
        self.frames[0].map
    }

    #[inline]
    pub fn start_pose(&self) -> Pose {
        self.frames[0].pose()
    }

    /// Index of the keyframe after `i`, wrapping to 0.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        (i + 1) % self.frames.len()
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// World pose with keyframe `frame` current and `timer` ms into the lap.
    pub fn pose_at(&self, frame: usize, timer: u64) -> Pose {
        let k = &self.frames[frame];
        let Some(seg) = &self.segments[frame] else {
            return k.pose();
        };
        if timer <= k.depart_ms as u64 {
            return k.pose();
        }
        let elapsed = (timer - k.depart_ms as u64) as f32 / 1000.0;
        let u = self.segment_param(k, elapsed);
        let heading = seg.heading(u).unwrap_or(k.heading);
        seg.position(u).with_heading(heading)
    }

    /// Spline parameter on `k`'s outgoing segment, `elapsed` seconds after
    /// departing it.
    pub(crate) fn segment_param(&self, k: &Keyframe, elapsed: f32) -> f32 {
        if k.dist_to_next <= f32::EPSILON {
            return 0.0;
        }
        let since = k.time_from_stop + elapsed;
        let until = k.time_to_stop - elapsed;
        let seg_pos = if since < until {
            self.profile.dist_at(since) - k.dist_since_stop
        } else {
            k.dist_until_stop - self.profile.dist_at(until)
        };
        (seg_pos / k.dist_to_next).clamp(0.0, 1.0)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn secs_to_ms(t: f32) -> u32 {
    (t * 1000.0).round() as u32
}

/// Outgoing tangent, else incoming tangent, else due east.
fn node_heading(segments: &[Option<SplineSegment>], i: usize) -> f32 {
    segments[i]
        .as_ref()
        .and_then(|s| s.heading(0.0))
        .or_else(|| {
            i.checked_sub(1)
                .and_then(|p| segments[p].as_ref())
                .and_then(|s| s.heading(1.0))
        })
        .unwrap_or(0.0)
}
