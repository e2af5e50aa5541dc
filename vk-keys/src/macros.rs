/// Generates a module for `#[serde(with = "...")]` that (de)serializes an Ash flags type through
/// its raw integer value.
#[cfg(feature = "serde")]
macro_rules! serde_vk_raw {
    ($module:ident, $ty:ty, $raw:ty) => {
        pub(crate) mod $module {
            use serde::{Deserialize, Deserializer, Serialize, Serializer};

            pub(crate) fn serialize<S>(value: &$ty, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                value.as_raw().serialize(serializer)
            }

            pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<$ty, D::Error>
            where
                D: Deserializer<'de>,
            {
                <$raw>::deserialize(deserializer).map(<$ty>::from_raw)
            }
        }
    };
}

#[cfg(feature = "serde")]
serde_vk_raw!(shader_stage_flags, ash::vk::ShaderStageFlags, u32);
#[cfg(feature = "serde")]
serde_vk_raw!(image_aspect_flags, ash::vk::ImageAspectFlags, u32);
