//! Push constant ranges of a pipeline layout.
//!
//! Pipeline layouts are compatible for push constants only if they were created with identical
//! push constant ranges, in the same order. [`PushConstantRanges`] captures that list so that it
//! can be compared, hashed, and canonicalized with a [`PushConstantRangesDict`].

use crate::{
    dictionary::Dictionary,
    hash::{eq_ordered, hash_ordered},
};
use ash::vk;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::{
    hash::{Hash, Hasher},
    ops::Deref,
    sync::Arc,
};

/// Description of a range of the push constants of a pipeline layout.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PushConstantRange {
    /// The stages which can access this range.
    #[cfg_attr(feature = "serde", serde(with = "crate::macros::shader_stage_flags"))]
    pub stages: vk::ShaderStageFlags,

    /// Offset in bytes from the start of the push constants to this range.
    pub offset: u32,

    /// Size in bytes of the range.
    pub size: u32,
}

impl PartialEq for PushConstantRange {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.stages == other.stages && self.offset == other.offset && self.size == other.size
    }
}

impl Eq for PushConstantRange {}

impl Hash for PushConstantRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.stages.hash(state);
        self.offset.hash(state);
        self.size.hash(state);
    }
}

impl From<vk::PushConstantRange> for PushConstantRange {
    #[inline]
    fn from(val: vk::PushConstantRange) -> Self {
        Self {
            stages: val.stage_flags,
            offset: val.offset,
            size: val.size,
        }
    }
}

impl From<PushConstantRange> for vk::PushConstantRange {
    #[inline]
    fn from(val: PushConstantRange) -> Self {
        Self {
            stage_flags: val.stages,
            offset: val.offset,
            size: val.size,
        }
    }
}

/// An ordered list of push constant ranges.
///
/// Two lists are equal only if they have the same length and equal ranges at each position. The
/// same ranges in a different order make a different list.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PushConstantRanges(SmallVec<[PushConstantRange; 4]>);

impl PushConstantRanges {
    /// Returns an empty list.
    #[inline]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Appends a range to the end of the list.
    #[inline]
    pub fn push(&mut self, range: PushConstantRange) {
        self.0.push(range);
    }

    /// Returns the ranges in their raw form.
    pub fn to_vk(&self) -> SmallVec<[vk::PushConstantRange; 4]> {
        self.0.iter().copied().map(Into::into).collect()
    }
}

impl Deref for PushConstantRanges {
    type Target = [PushConstantRange];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for PushConstantRanges {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        eq_ordered(&self.0, &other.0)
    }
}

impl Eq for PushConstantRanges {}

impl Hash for PushConstantRanges {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hash_ordered(&self.0));
    }
}

impl FromIterator<PushConstantRange> for PushConstantRanges {
    fn from_iter<T: IntoIterator<Item = PushConstantRange>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<vk::PushConstantRange> for PushConstantRanges {
    fn from_iter<T: IntoIterator<Item = vk::PushConstantRange>>(iter: T) -> Self {
        Self(iter.into_iter().map(PushConstantRange::from).collect())
    }
}

impl From<Vec<PushConstantRange>> for PushConstantRanges {
    #[inline]
    fn from(val: Vec<PushConstantRange>) -> Self {
        Self(SmallVec::from_vec(val))
    }
}

impl<const N: usize> From<[PushConstantRange; N]> for PushConstantRanges {
    #[inline]
    fn from(val: [PushConstantRange; N]) -> Self {
        val.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a PushConstantRanges {
    type Item = &'a PushConstantRange;
    type IntoIter = std::slice::Iter<'a, PushConstantRange>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Canonicalizes push constant range lists of pipeline layouts.
pub type PushConstantRangesDict = Dictionary<PushConstantRanges>;

/// The canonical instance of a push constant range list, as returned by a
/// [`PushConstantRangesDict`]. Two ids from the same dictionary describe equal lists exactly when
/// [`Arc::ptr_eq`] is true.
pub type PushConstantRangesId = Arc<PushConstantRanges>;
