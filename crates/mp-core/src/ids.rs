//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Entity and carrier ids index
//! directly into their arenas via `.index()`; ids are never reused, so a
//! stale id resolves to an empty slot rather than to a different object.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Slot of an entity (player, creature, object) in the `EntityStore` arena.
    pub struct EntityId(u32);
}

typed_id! {
    /// Slot of a carrier (platform or mount) in the `CarrierStore` arena.
    pub struct CarrierId(u32);
}

typed_id! {
    /// A simulated region.  Carriers and entities live on exactly one map.
    pub struct MapId(u32);
}

typed_id! {
    /// Index of a seat within one carrier's seat table.
    pub struct SeatIndex(u8);
}

typed_id! {
    /// A deferred boarding request in the boarding ledger.
    pub struct RequestId(u32);
}

typed_id! {
    /// One application of a ride effect on a carrier host.
    pub struct EffectId(u32);
}
