//! Descriptor set layout bindings as keys.
//!
//! Two descriptor set layouts that were created from equal bindings are interchangeable, so
//! layers commonly deduplicate them by their bindings. [`DescriptorSetLayoutBinding`] is an owned
//! copy of `VkDescriptorSetLayoutBinding` that takes the immutable samplers into account when
//! comparing and hashing.

use crate::{hash::similar_for_nullity, ValidationError};
use ash::vk;
use smallvec::SmallVec;
use std::{
    hash::{Hash, Hasher},
    slice,
};

/// A binding in a descriptor set layout.
#[derive(Clone, Debug)]
pub struct DescriptorSetLayoutBinding {
    /// The binding number of this entry.
    pub binding: u32,

    /// The type of the descriptors in the binding.
    pub descriptor_type: vk::DescriptorType,

    /// How many descriptors (array elements) this binding is made of.
    pub descriptor_count: u32,

    /// Which shader stages can access the descriptors in this binding.
    pub stages: vk::ShaderStageFlags,

    /// Samplers that are a fixed part of the layout, if any.
    ///
    /// When present, the first `descriptor_count` samplers are significant. Samplers past
    /// `descriptor_count` are ignored.
    pub immutable_samplers: Option<SmallVec<[vk::Sampler; 4]>>,
}

impl DescriptorSetLayoutBinding {
    /// Returns a `DescriptorSetLayoutBinding` with the given type, binding number 0, one
    /// descriptor, no stages and no immutable samplers.
    #[inline]
    pub fn descriptor_type(descriptor_type: vk::DescriptorType) -> Self {
        Self {
            binding: 0,
            descriptor_type,
            descriptor_count: 1,
            stages: vk::ShaderStageFlags::empty(),
            immutable_samplers: None,
        }
    }

    /// Copies a raw binding, including the samplers that `p_immutable_samplers` points to.
    ///
    /// The sampler pointer is only read when the descriptor type is `SAMPLER` or
    /// `COMBINED_IMAGE_SAMPLER` and `descriptor_count` is not 0. Otherwise the copy has no
    /// immutable samplers.
    ///
    /// # Safety
    ///
    /// - If it is read, `raw.p_immutable_samplers` must be null or point to `descriptor_count`
    ///   valid `vk::Sampler` values.
    pub unsafe fn from_vk(raw: &vk::DescriptorSetLayoutBinding<'_>) -> Self {
        let is_sampler_type = matches!(
            raw.descriptor_type,
            vk::DescriptorType::SAMPLER | vk::DescriptorType::COMBINED_IMAGE_SAMPLER
        );

        let immutable_samplers = (is_sampler_type
            && raw.descriptor_count != 0
            && !raw.p_immutable_samplers.is_null())
        .then(|| {
            // SAFETY: The caller must ensure that the pointer points to `descriptor_count`
            // samplers.
            let samplers = unsafe {
                slice::from_raw_parts(raw.p_immutable_samplers, raw.descriptor_count as usize)
            };

            samplers.iter().copied().collect()
        });

        Self {
            binding: raw.binding,
            descriptor_type: raw.descriptor_type,
            descriptor_count: raw.descriptor_count,
            stages: raw.stage_flags,
            immutable_samplers,
        }
    }

    /// Returns the raw form of the binding. Its sampler pointer borrows from `self`.
    pub fn to_vk(&self) -> vk::DescriptorSetLayoutBinding<'_> {
        let mut raw = vk::DescriptorSetLayoutBinding::default()
            .binding(self.binding)
            .descriptor_type(self.descriptor_type)
            .descriptor_count(self.descriptor_count)
            .stage_flags(self.stages);

        if let Some(samplers) = &self.immutable_samplers {
            raw.p_immutable_samplers = samplers.as_ptr();
        }

        raw
    }

    /// Returns the significant immutable samplers: at most `descriptor_count` of them.
    #[inline]
    pub fn significant_samplers(&self) -> Option<&[vk::Sampler]> {
        self.immutable_samplers.as_ref().map(|samplers| {
            let count = samplers.len().min(self.descriptor_count as usize);
            &samplers[..count]
        })
    }

    /// Checks that the immutable samplers, if present, cover every descriptor of the binding.
    ///
    /// Equality and hashing don't require this: a short sampler list simply compares unequal to
    /// a complete one.
    pub fn validate(&self) -> Result<(), Box<ValidationError>> {
        if let Some(samplers) = &self.immutable_samplers {
            if samplers.len() < self.descriptor_count as usize {
                return Err(Box::new(ValidationError {
                    context: "immutable_samplers".into(),
                    problem: format!(
                        "contains {} samplers, but `descriptor_count` is {}",
                        samplers.len(),
                        self.descriptor_count,
                    )
                    .into(),
                    vuids: &["VUID-VkDescriptorSetLayoutBinding-descriptorType-00282"],
                }));
            }
        }

        Ok(())
    }
}

impl PartialEq for DescriptorSetLayoutBinding {
    fn eq(&self, other: &Self) -> bool {
        if self.binding != other.binding
            || self.descriptor_type != other.descriptor_type
            || self.descriptor_count != other.descriptor_count
            || self.stages != other.stages
            || !similar_for_nullity(
                self.immutable_samplers.as_ref(),
                other.immutable_samplers.as_ref(),
            )
        {
            return false;
        }

        self.significant_samplers() == other.significant_samplers()
    }
}

impl Eq for DescriptorSetLayoutBinding {}

impl Hash for DescriptorSetLayoutBinding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.binding.hash(state);
        self.descriptor_type.hash(state);
        self.descriptor_count.hash(state);
        self.stages.hash(state);

        if let Some(samplers) = self.significant_samplers() {
            for sampler in samplers {
                sampler.hash(state);
            }
        }
    }
}
