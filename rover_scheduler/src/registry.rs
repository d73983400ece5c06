//! Fixed registry of mode instances.
//!
//! Built once at startup with exactly one instance per registrable `ModeId`.
//! The scheduler refers to modes by [`ModeSlot`] instead of holding
//! references, so "is this the same mode" is a plain integer comparison.

use std::fmt;

use rover_common::consts::MODE_COUNT;
use rover_common::mode::ModeId;

use crate::error::RegistryError;
use crate::mode::Mode;

/// Index of a mode within its [`ModeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeSlot(u8);

impl ModeSlot {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every mode instance for the process lifetime.
pub struct ModeRegistry {
    modes: heapless::Vec<Box<dyn Mode>, MODE_COUNT>,
}

impl ModeRegistry {
    /// Validate and store `modes`.
    ///
    /// # Errors
    /// - `UnknownMode` if an instance reports `ModeId::Unknown`
    /// - `DuplicateMode` if two instances share an id
    /// - `MissingMode` if a registrable id has no instance
    pub fn new<I>(modes: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Box<dyn Mode>>,
    {
        let mut stored: heapless::Vec<Box<dyn Mode>, MODE_COUNT> = heapless::Vec::new();

        for mode in modes {
            let id = mode.id();
            if !id.is_known() {
                return Err(RegistryError::UnknownMode(mode.name()));
            }
            if stored.iter().any(|m| m.id() == id) {
                return Err(RegistryError::DuplicateMode(id));
            }
            if stored.push(mode).is_err() {
                return Err(RegistryError::Capacity(MODE_COUNT));
            }
        }

        if let Some(missing) = ModeId::ALL
            .iter()
            .find(|id| !stored.iter().any(|m| m.id() == **id))
        {
            return Err(RegistryError::MissingMode(*missing));
        }

        Ok(Self { modes: stored })
    }

    /// Slot of the instance with `id`. `ModeId::Unknown` never resolves.
    pub fn slot_of(&self, id: ModeId) -> Option<ModeSlot> {
        if !id.is_known() {
            return None;
        }
        self.modes
            .iter()
            .position(|m| m.id() == id)
            .map(|i| ModeSlot(i as u8))
    }

    /// Id of the mode in `slot`.
    ///
    /// # Panics
    /// If `slot` did not come from this registry.
    #[inline]
    pub fn id_of(&self, slot: ModeSlot) -> ModeId {
        self.modes[slot.index()].id()
    }

    /// Mutable access to the mode in `slot`.
    ///
    /// # Panics
    /// If `slot` did not come from this registry.
    #[inline]
    pub fn get_mut(&mut self, slot: ModeSlot) -> &mut dyn Mode {
        self.modes[slot.index()].as_mut()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Registered ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = ModeId> + '_ {
        self.modes.iter().map(|m| m.id())
    }
}

impl fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
