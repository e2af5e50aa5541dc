//! Subresource ranges of images.

use ash::vk;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Selects a range of mip levels and array layers of an image, for one or more aspects.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageSubresourceRange {
    /// The aspects that are included.
    #[cfg_attr(feature = "serde", serde(with = "crate::macros::image_aspect_flags"))]
    pub aspects: vk::ImageAspectFlags,

    /// The first mip level that is included.
    pub base_mip_level: u32,

    /// The number of mip levels, starting at `base_mip_level`.
    pub level_count: u32,

    /// The first array layer that is included.
    pub base_array_layer: u32,

    /// The number of array layers, starting at `base_array_layer`.
    pub layer_count: u32,
}

impl ImageSubresourceRange {
    /// Returns a range covering the first `mip_levels` mip levels and the first `array_layers`
    /// array layers of `aspects`.
    #[inline]
    pub fn whole(aspects: vk::ImageAspectFlags, mip_levels: u32, array_layers: u32) -> Self {
        Self {
            aspects,
            base_mip_level: 0,
            level_count: mip_levels,
            base_array_layer: 0,
            layer_count: array_layers,
        }
    }
}

impl PartialEq for ImageSubresourceRange {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.aspects == other.aspects
            && self.base_mip_level == other.base_mip_level
            && self.level_count == other.level_count
            && self.base_array_layer == other.base_array_layer
            && self.layer_count == other.layer_count
    }
}

impl Eq for ImageSubresourceRange {}

impl Hash for ImageSubresourceRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.aspects.hash(state);
        self.base_mip_level.hash(state);
        self.level_count.hash(state);
        self.base_array_layer.hash(state);
        self.layer_count.hash(state);
    }
}

impl From<vk::ImageSubresourceRange> for ImageSubresourceRange {
    #[inline]
    fn from(val: vk::ImageSubresourceRange) -> Self {
        Self {
            aspects: val.aspect_mask,
            base_mip_level: val.base_mip_level,
            level_count: val.level_count,
            base_array_layer: val.base_array_layer,
            layer_count: val.layer_count,
        }
    }
}

impl From<ImageSubresourceRange> for vk::ImageSubresourceRange {
    #[inline]
    fn from(val: ImageSubresourceRange) -> Self {
        Self {
            aspect_mask: val.aspects,
            base_mip_level: val.base_mip_level,
            level_count: val.level_count,
            base_array_layer: val.base_array_layer,
            layer_count: val.layer_count,
        }
    }
}
