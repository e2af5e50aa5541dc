//! Structural equality and hashing for Vulkan value types.
//!
//! Validation and caching layers often need to deduplicate state that the application describes
//! with plain Vulkan structs: the bindings of a descriptor set layout, the push constant ranges of
//! a pipeline layout, the subresources of an image view, the identifier of a shader module. The
//! raw `ash::vk` structs are not usable as keys of a `HashMap`, since they implement neither
//! `PartialEq` nor `Hash`, and some of them refer to their contents through raw pointers.
//!
//! This crate provides owned snapshots of those structs that compare and hash *structurally*:
//!
//! - [`DescriptorSetLayoutBinding`](crate::descriptor_set::DescriptorSetLayoutBinding), including
//!   its immutable samplers.
//! - [`PushConstantRange`](crate::pipeline::PushConstantRange) and ordered lists of them,
//!   [`PushConstantRanges`](crate::pipeline::PushConstantRanges).
//! - [`ImageSubresourceRange`](crate::image::ImageSubresourceRange).
//! - [`ShaderModuleIdentifier`](crate::shader::ShaderModuleIdentifier), where only the bytes up to
//!   the declared size are significant.
//!
//! Equality is exposed through `PartialEq`/`Eq` and hashing through [`Hash`](std::hash::Hash), so
//! the types work with any hasher. The [`hash`] module contains
//! [`HashCombiner`](crate::hash::HashCombiner), an order-sensitive, deterministic hasher that
//! gives every value a fixed-width hash with [`hash_value`](crate::hash::hash_value), and the
//! generic helpers for ordered containers.
//!
//! Values that are looked up often can be canonicalized with a
//! [`Dictionary`](crate::dictionary::Dictionary), which hands out one shared `Arc` per distinct
//! value so that later comparisons reduce to a pointer comparison.
//!
//! # Cargo features
//!
//! | Feature | Description                                                               |
//! |---------|---------------------------------------------------------------------------|
//! | `serde` | Enables (de)serialization of the plain value types with [`serde`].        |
//!
//! [`serde`]: https://crates.io/crates/serde

use std::{
    borrow::Cow,
    error::Error,
    fmt::{Debug, Display, Error as FmtError, Formatter},
};

mod macros;

pub mod descriptor_set;
pub mod dictionary;
pub mod hash;
pub mod image;
pub mod pipeline;
pub mod shader;

pub use ash::vk::Handle;

/// A value was found to be malformed by one of the opt-in `validate` methods.
///
/// Equality and hashing never produce this error: they are total over every value, including
/// malformed ones.
#[derive(Clone, Default)]
pub struct ValidationError {
    /// The context in which the problem exists, usually the name of the offending field.
    pub context: Cow<'static, str>,

    /// A description of the problem.
    pub problem: Cow<'static, str>,

    /// Valid Usage IDs (VUIDs) in the Vulkan specification that relate to the problem.
    pub vuids: &'static [&'static str],
}

impl ValidationError {
    /// Prepends `context` to the current context, separated by a period.
    pub fn add_context(mut self: Box<Self>, context: impl Into<Cow<'static, str>>) -> Box<Self> {
        if self.context.is_empty() {
            self.context = context.into();
        } else {
            self.context = format!("{}.{}", context.into(), self.context).into();
        }

        self
    }
}

impl Debug for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if self.context.is_empty() {
            write!(f, "{}", self.problem)?;
        } else {
            write!(f, "{}: {}", self.context, self.problem)?;
        }

        if !self.vuids.is_empty() {
            write!(f, "\n\nVulkan VUIDs:")?;

            for vuid in self.vuids {
                write!(f, "\n    {}", vuid)?;
            }
        }

        Ok(())
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if self.context.is_empty() {
            write!(f, "{}", self.problem)
        } else {
            write!(f, "{}: {}", self.context, self.problem)
        }
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod validation_error_tests {
    use super::ValidationError;

    #[test]
    fn display_with_context() {
        let err = Box::new(ValidationError {
            context: "identifier_size".into(),
            problem: "is greater than the maximum".into(),
            ..Default::default()
        })
        .add_context("stage");

        assert_eq!(err.context, "stage.identifier_size");
        assert_eq!(
            err.to_string(),
            "stage.identifier_size: is greater than the maximum",
        );
    }

    #[test]
    fn debug_lists_vuids() {
        let err = ValidationError {
            problem: "is broken".into(),
            vuids: &["VUID-a", "VUID-b"],
            ..Default::default()
        };

        assert_eq!(
            format!("{:?}", err),
            "is broken\n\nVulkan VUIDs:\n    VUID-a\n    VUID-b",
        );
    }
}
