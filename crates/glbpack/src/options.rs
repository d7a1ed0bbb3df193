//! Options controlling a packing run.

use serde::{Deserialize, Serialize};

/// Resource categories selected for embedding.
///
/// Images are currently embedded whenever an `images` section is present,
/// regardless of `textures`; the flag is kept for the day image embedding
/// becomes opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedSet {
    /// Embed referenced textures.
    pub textures: bool,
    /// Embed referenced shader sources.
    pub shaders: bool,
}

impl EmbedSet {
    /// Every category enabled.
    pub const ALL: EmbedSet = EmbedSet {
        textures: true,
        shaders: true,
    };
}

/// Logical name of the unified body buffer in rewritten references.
///
/// Two consumer ecosystems expect different names; both are supported as
/// distinct values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferName {
    /// `binary_glTF`, the name most loaders expect.
    #[default]
    Standard,
    /// `KHR_binary_glTF`, the extension-prefixed legacy name.
    Khr,
}

impl BufferName {
    /// The name as it appears in rewritten `buffer` references.
    pub fn as_str(self) -> &'static str {
        match self {
            BufferName::Standard => "binary_glTF",
            BufferName::Khr => "KHR_binary_glTF",
        }
    }
}

/// Options for packing a scene into a binary container.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PackOptions {
    /// Which resource categories to embed.
    pub embed: EmbedSet,
    /// Name of the unified body buffer.
    pub buffer_name: BufferName,
    /// Replace referenced shaders with the built-in sources.
    pub use_builtin_shaders: bool,
}
