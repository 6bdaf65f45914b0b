//! The `Carrier` trait and the `CarrierStore` arena.
//!
//! Platforms and mounts share only the transform contract and their
//! passenger registry.  Both live in one arena indexed by `CarrierId`;
//! code that needs kind-specific state asks for it by capability with
//! [`CarrierStore::as_platform`] / [`CarrierStore::as_mount`].

use mp_core::{CarrierId, CoordinateTransform, MapId, Pose};

use crate::{CarrierError, CarrierResult, Mount, PassengerRegistry, Platform};

/// Anything that carries passengers.
pub trait Carrier: CoordinateTransform {
    fn id(&self) -> CarrierId;
    fn map(&self) -> MapId;
    fn registry(&self) -> &PassengerRegistry;
    fn registry_mut(&mut self) -> &mut PassengerRegistry;
}

impl Carrier for Platform {
    fn id(&self) -> CarrierId {
        self.id
    }
    fn map(&self) -> MapId {
        self.map
    }
    fn registry(&self) -> &PassengerRegistry {
        &self.registry
    }
    fn registry_mut(&mut self) -> &mut PassengerRegistry {
        &mut self.registry
    }
}

impl Carrier for Mount {
    fn id(&self) -> CarrierId {
        self.id
    }
    fn map(&self) -> MapId {
        self.map
    }
    fn registry(&self) -> &PassengerRegistry {
        &self.registry
    }
    fn registry_mut(&mut self) -> &mut PassengerRegistry {
        &mut self.registry
    }
}

/// One arena slot.
#[derive(Debug)]
pub enum CarrierSlot {
    Platform(Platform),
    Mount(Mount),
}

impl CarrierSlot {
    #[inline]
    pub fn as_carrier(&self) -> &dyn Carrier {
        match self {
            CarrierSlot::Platform(p) => p,
            CarrierSlot::Mount(m) => m,
        }
    }

    #[inline]
    pub fn as_carrier_mut(&mut self) -> &mut dyn Carrier {
        match self {
            CarrierSlot::Platform(p) => p,
            CarrierSlot::Mount(m) => m,
        }
    }

    #[inline]
    pub fn is_platform(&self) -> bool {
        matches!(self, CarrierSlot::Platform(_))
    }
}

/// Every carrier in the world.  Ids are never reused.
#[derive(Debug, Default)]
pub struct CarrierStore {
    slots: Vec<Option<CarrierSlot>>,
}

impl CarrierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next inserted carrier will get.
    #[inline]
    pub fn next_id(&self) -> CarrierId {
        CarrierId(self.slots.len() as u32)
    }

    /// Insert a platform built by `make`, which receives the new id.
    pub fn insert_platform(&mut self, make: impl FnOnce(CarrierId) -> Platform) -> CarrierId {
        let id = self.next_id();
        self.slots.push(Some(CarrierSlot::Platform(make(id))));
        id
    }

    /// Insert a mount built by `make`, which receives the new id.
    pub fn insert_mount(&mut self, make: impl FnOnce(CarrierId) -> Mount) -> CarrierId {
        let id = self.next_id();
        self.slots.push(Some(CarrierSlot::Mount(make(id))));
        id
    }

    pub fn remove(&mut self, id: CarrierId) -> Option<CarrierSlot> {
        self.slots.get_mut(id.index())?.take()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: CarrierId) -> Option<&dyn Carrier> {
        self.slot(id).map(CarrierSlot::as_carrier)
    }

    #[inline]
    pub fn get_mut(&mut self, id: CarrierId) -> Option<&mut dyn Carrier> {
        self.slot_mut(id).map(CarrierSlot::as_carrier_mut)
    }

    #[inline]
    pub fn slot(&self, id: CarrierId) -> Option<&CarrierSlot> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn slot_mut(&mut self, id: CarrierId) -> Option<&mut CarrierSlot> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, id: CarrierId) -> bool {
        self.slot(id).is_some()
    }

    pub fn as_platform(&self, id: CarrierId) -> Option<&Platform> {
        match self.slot(id)? {
            CarrierSlot::Platform(p) => Some(p),
            CarrierSlot::Mount(_) => None,
        }
    }

    pub fn as_platform_mut(&mut self, id: CarrierId) -> Option<&mut Platform> {
        match self.slot_mut(id)? {
            CarrierSlot::Platform(p) => Some(p),
            CarrierSlot::Mount(_) => None,
        }
    }

    pub fn as_mount(&self, id: CarrierId) -> Option<&Mount> {
        match self.slot(id)? {
            CarrierSlot::Mount(m) => Some(m),
            CarrierSlot::Platform(_) => None,
        }
    }

    pub fn as_mount_mut(&mut self, id: CarrierId) -> Option<&mut Mount> {
        match self.slot_mut(id)? {
            CarrierSlot::Mount(m) => Some(m),
            CarrierSlot::Platform(_) => None,
        }
    }

    /// Like [`as_platform`](Self::as_platform) with a descriptive error.
    pub fn platform(&self, id: CarrierId) -> CarrierResult<&Platform> {
        match self.slot(id) {
            None => Err(CarrierError::NotFound(id)),
            Some(CarrierSlot::Platform(p)) => Ok(p),
            Some(CarrierSlot::Mount(_)) => Err(CarrierError::NotAPlatform(id)),
        }
    }

    /// Like [`as_mount`](Self::as_mount) with a descriptive error.
    pub fn mount(&self, id: CarrierId) -> CarrierResult<&Mount> {
        match self.slot(id) {
            None => Err(CarrierError::NotFound(id)),
            Some(CarrierSlot::Mount(m)) => Ok(m),
            Some(CarrierSlot::Platform(_)) => Err(CarrierError::NotAMount(id)),
        }
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    /// Every carrier, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Carrier> + '_ {
        self.slots.iter().filter_map(|s| s.as_ref().map(CarrierSlot::as_carrier))
    }

    pub fn platforms(&self) -> impl Iterator<Item = &Platform> + '_ {
        self.slots.iter().filter_map(|s| match s {
            Some(CarrierSlot::Platform(p)) => Some(p),
            _ => None,
        })
    }

    pub fn mounts(&self) -> impl Iterator<Item = &Mount> + '_ {
        self.slots.iter().filter_map(|s| match s {
            Some(CarrierSlot::Mount(m)) => Some(m),
            _ => None,
        })
    }

    pub fn platform_ids(&self) -> Vec<CarrierId> {
        self.platforms().map(|p| p.id).collect()
    }

    /// Current world frame of a carrier.
    pub fn frame_of(&self, id: CarrierId) -> Option<(Pose, MapId)> {
        self.get(id).map(|c| (c.frame(), c.map()))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
