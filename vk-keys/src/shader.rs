//! Shader module identifiers.
//!
//! With `VK_EXT_shader_module_identifier`, the implementation can return an opaque identifier for
//! a shader module, which can later be used in place of the SPIR-V code when creating a pipeline.
//! The identifier is stored in a fixed-capacity buffer alongside its actual size, and only the
//! bytes up to that size carry meaning.

use crate::ValidationError;
use ash::vk;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The capacity of the identifier buffer of a [`ShaderModuleIdentifier`].
pub const MAX_SHADER_MODULE_IDENTIFIER_SIZE: usize = vk::MAX_SHADER_MODULE_IDENTIFIER_SIZE_EXT;

/// An opaque identifier of a shader module, as returned by the implementation.
///
/// Two identifiers are equal if their declared sizes are equal, and the significant bytes
/// (see [`data`](Self::data)) are equal. Bytes past the declared size are ignored.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShaderModuleIdentifier {
    /// The size of the identifier in bytes, as declared by the implementation.
    pub identifier_size: u32,

    /// Storage for the identifier.
    pub identifier: [u8; MAX_SHADER_MODULE_IDENTIFIER_SIZE],
}

impl Default for ShaderModuleIdentifier {
    #[inline]
    fn default() -> Self {
        Self {
            identifier_size: 0,
            identifier: [0; MAX_SHADER_MODULE_IDENTIFIER_SIZE],
        }
    }
}

impl ShaderModuleIdentifier {
    /// Returns an identifier containing a copy of `data`.
    ///
    /// Returns an error if `data` is longer than [`MAX_SHADER_MODULE_IDENTIFIER_SIZE`].
    pub fn new(data: &[u8]) -> Result<Self, Box<ValidationError>> {
        if data.len() > MAX_SHADER_MODULE_IDENTIFIER_SIZE {
            return Err(Box::new(ValidationError {
                context: "data".into(),
                problem: format!(
                    "is {} bytes long, which is more than \
                    `MAX_SHADER_MODULE_IDENTIFIER_SIZE` ({})",
                    data.len(),
                    MAX_SHADER_MODULE_IDENTIFIER_SIZE,
                )
                .into(),
                ..Default::default()
            }));
        }

        let mut identifier = [0; MAX_SHADER_MODULE_IDENTIFIER_SIZE];
        identifier[..data.len()].copy_from_slice(data);

        Ok(Self {
            identifier_size: data.len() as u32,
            identifier,
        })
    }

    /// Returns the significant bytes of the identifier.
    ///
    /// This is the first `identifier_size` bytes, clamped to the capacity of the buffer if the
    /// declared size is too large.
    #[inline]
    pub fn data(&self) -> &[u8] {
        let len = (self.identifier_size as usize).min(MAX_SHADER_MODULE_IDENTIFIER_SIZE);
        &self.identifier[..len]
    }

    /// Checks that the declared size fits in the identifier buffer.
    ///
    /// Equality and hashing don't require this: an oversized identifier is compared and hashed
    /// up to the capacity of the buffer.
    pub fn validate(&self) -> Result<(), Box<ValidationError>> {
        if self.identifier_size as usize > MAX_SHADER_MODULE_IDENTIFIER_SIZE {
            return Err(Box::new(ValidationError {
                context: "identifier_size".into(),
                problem: format!(
                    "is {}, which is greater than `MAX_SHADER_MODULE_IDENTIFIER_SIZE` ({})",
                    self.identifier_size, MAX_SHADER_MODULE_IDENTIFIER_SIZE,
                )
                .into(),
                vuids: &["VUID-VkPipelineShaderStageModuleIdentifierCreateInfoEXT-identifierSize-06719"],
            }));
        }

        Ok(())
    }

    /// Returns the raw form of the identifier.
    pub fn to_vk(&self) -> vk::ShaderModuleIdentifierEXT<'static> {
        let mut raw = vk::ShaderModuleIdentifierEXT::default();
        raw.identifier_size = self.identifier_size;
        raw.identifier = self.identifier;
        raw
    }
}

impl From<&vk::ShaderModuleIdentifierEXT<'_>> for ShaderModuleIdentifier {
    fn from(val: &vk::ShaderModuleIdentifierEXT<'_>) -> Self {
        if val.identifier_size as usize > MAX_SHADER_MODULE_IDENTIFIER_SIZE {
            debug!(
                "shader module identifier declares {} bytes, only the first {} are significant",
                val.identifier_size, MAX_SHADER_MODULE_IDENTIFIER_SIZE,
            );
        }

        Self {
            identifier_size: val.identifier_size,
            identifier: val.identifier,
        }
    }
}

impl PartialEq for ShaderModuleIdentifier {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.identifier_size == other.identifier_size && self.data() == other.data()
    }
}

impl Eq for ShaderModuleIdentifier {}

impl Hash for ShaderModuleIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &byte in self.data() {
            state.write_u8(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ShaderModuleIdentifier, MAX_SHADER_MODULE_IDENTIFIER_SIZE};
    use crate::hash::{hash_value, HashCombiner};
    use ash::vk;
    use std::collections::HashMap;

    fn identifier(size: u32, fill: impl Fn(usize) -> u8) -> ShaderModuleIdentifier {
        let mut identifier = [0; MAX_SHADER_MODULE_IDENTIFIER_SIZE];

        for (index, byte) in identifier.iter_mut().enumerate() {
            *byte = fill(index);
        }

        ShaderModuleIdentifier {
            identifier_size: size,
            identifier,
        }
    }

    #[test]
    fn reflexive() {
        let a = identifier(16, |i| i as u8);
        assert_same_key!(a, a);
        assert_same_key!(
            ShaderModuleIdentifier::default(),
            ShaderModuleIdentifier::new(&[]).unwrap(),
        );
    }

    #[test]
    fn trailing_bytes_ignored() {
        let a = identifier(5, |i| i as u8);
        let b = identifier(5, |i| if i < 5 { i as u8 } else { 0xff });

        assert_same_key!(a, b);
        assert_eq!(a.data(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn leading_bytes_significant() {
        let a = identifier(5, |i| i as u8);

        for index in 0..5 {
            let b = identifier(5, |i| if i == index { 0xff } else { i as u8 });
            assert_distinct_keys!(a, b);
        }
    }

    #[test]
    fn sizes_must_match() {
        let zeros_4 = identifier(4, |_| 0);
        let zeros_5 = identifier(5, |_| 0);
        assert_distinct_keys!(zeros_4, zeros_5);

        let a = identifier(8, |i| i as u8);
        let b = identifier(9, |i| i as u8);
        assert_distinct_keys!(a, b);
    }

    #[test]
    fn hash_covers_declared_bytes() {
        let a = identifier(3, |i| i as u8 + 1);
        let expected = HashCombiner::new().combine_iter([1u8, 2, 3]).value();
        assert_eq!(hash_value(&a), expected);
    }

    #[test]
    fn oversized_clamped() {
        let size = MAX_SHADER_MODULE_IDENTIFIER_SIZE as u32 + 8;
        let a = identifier(size, |i| i as u8);
        let b = identifier(size, |i| i as u8);

        assert_same_key!(a, b);
        assert_eq!(a.data().len(), MAX_SHADER_MODULE_IDENTIFIER_SIZE);
        assert_distinct_keys!(a, identifier(size + 1, |i| i as u8));

        let err = a.validate().unwrap_err();
        assert_eq!(err.context, "identifier_size");
        assert!(identifier(4, |_| 0).validate().is_ok());
    }

    #[test]
    fn new_copies_data() {
        let a = ShaderModuleIdentifier::new(&[9, 8, 7]).unwrap();
        assert_eq!(a.identifier_size, 3);
        assert_eq!(a.data(), &[9, 8, 7]);
        assert!(a.identifier[3..].iter().all(|&byte| byte == 0));

        let too_long = [0; MAX_SHADER_MODULE_IDENTIFIER_SIZE + 1];
        let err = ShaderModuleIdentifier::new(&too_long).unwrap_err();
        assert_eq!(err.context, "data");
        assert!(ShaderModuleIdentifier::new(&[1; MAX_SHADER_MODULE_IDENTIFIER_SIZE]).is_ok());
    }

    #[test]
    fn raw_conversion() {
        let mut raw = vk::ShaderModuleIdentifierEXT::default();
        raw.identifier_size = 4;
        raw.identifier[..6].copy_from_slice(&[1, 2, 3, 4, 5, 6]);

        let a = ShaderModuleIdentifier::from(&raw);
        assert_eq!(a.data(), &[1, 2, 3, 4]);
        assert_same_key!(a, ShaderModuleIdentifier::new(&[1, 2, 3, 4]).unwrap());

        let back = a.to_vk();
        assert_eq!(back.identifier_size, 4);
        assert_eq!(back.identifier[4], 5);
    }

    #[test]
    fn map_lookup_ignores_padding() {
        let mut map = HashMap::new();
        map.insert(identifier(5, |i| i as u8), "pipeline");

        let lookup = identifier(5, |i| if i < 5 { i as u8 } else { 0xaa });
        assert_eq!(map.get(&lookup), Some(&"pipeline"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_keeps_key() {
        let a = ShaderModuleIdentifier::new(&[3, 1, 4, 1, 5]).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let back: ShaderModuleIdentifier = serde_json::from_str(&json).unwrap();
        assert_same_key!(back, a);
    }
}
