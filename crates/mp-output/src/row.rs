//! Plain data row types written by output backends.

/// World pose of one carrier at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierPoseRow {
    pub tick:       u64,
    pub carrier_id: u32,
    /// `"platform"` or `"mount"`.
    pub kind:       &'static str,
    pub map:        u32,
    pub x:          f32,
    pub y:          f32,
    pub z:          f32,
    pub heading:    f32,
    pub passengers: u32,
}

/// World pose and attachment of one passenger at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerPoseRow {
    pub tick:       u64,
    pub entity_id:  u32,
    pub kind:       &'static str,
    pub carrier_id: u32,
    /// `None` for platform passengers.
    pub seat:       Option<u8>,
    pub map:        u32,
    pub x:          f32,
    pub y:          f32,
    pub z:          f32,
    pub heading:    f32,
    /// Offset in the carrier frame.
    pub local_x:    f32,
    pub local_y:    f32,
    pub local_z:    f32,
}

/// One row per tick, copied from the world's `TickSummary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub elapsed_ms:      u64,
    pub platforms_moved: u32,
    pub teleports:       u32,
    pub region_flips:    u32,
    pub boarded:         u32,
    pub swept:           u32,
}
