//! glbpack: packs a glTF scene and its external resources into a single
//! binary container.
//!
//! The input is a JSON scene document referencing array buffers, shader
//! sources and images by URI. The output is one self-contained file:
//! a 20-byte header, the rewritten scene JSON padded to a 4-byte boundary,
//! and every referenced resource concatenated into one body region.
//!
//! # Pipeline
//!
//! ```text
//! .gltf ─> SceneDocument ─> rewrite (fetch + accumulate) ─> emit ─> .glb
//! ```
//!
//! The rewrite phase collapses all buffers into a single unified buffer and
//! makes every `bufferView` offset absolute within the body; the emit phase
//! lays out header, scene text and body into one byte buffer that is only
//! written to disk on full success.
//!
//! # Quick Start
//!
//! ```ignore
//! use glbpack::{convert_file, PackOptions};
//!
//! let output = convert_file(Path::new("scene.gltf"), &PackOptions::default())?;
//! println!("wrote {}", output.display());
//! ```

pub mod body;
pub mod document;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod options;
pub mod rewrite;
pub mod shaders;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::info;

pub use body::{BodyAccumulator, BodySlot};
pub use document::SceneDocument;
pub use error::{PackError, Result};
pub use fetch::{DirSource, MemorySource, ResourceSource};
pub use options::{BufferName, EmbedSet, PackOptions};

/// Pack a scene document into a binary container.
///
/// Consumes the document: the rewrite phase mutates it in place and the
/// emit phase serializes the mutated tree. Resources are resolved through
/// `source`, so callers can run the whole pipeline without a filesystem.
pub fn pack(
    mut doc: SceneDocument,
    source: &dyn ResourceSource,
    options: &PackOptions,
) -> Result<Vec<u8>> {
    let mut body = BodyAccumulator::new();
    rewrite::rewrite(&mut doc, source, &mut body, options)?;
    emit::emit(&mut doc, &body, options.buffer_name.as_str())
}

/// Convert a `.gltf` file on disk to a `.glb` file next to it.
///
/// Fails fast if the input does not carry the `.gltf` extension. The output
/// is written only after the entire container has been built in memory, so
/// no partial file is ever committed. Returns the output path.
pub fn convert_file(path: &Path, options: &PackOptions) -> Result<PathBuf> {
    if path.extension().and_then(OsStr::to_str) != Some("gltf") {
        return Err(PackError::InputExtension(path.display().to_string()));
    }

    let doc = SceneDocument::from_slice(&std::fs::read(path)?)?;
    let source = DirSource::new(path.parent().unwrap_or_else(|| Path::new(".")));

    let container = pack(doc, &source, options)?;

    let output = path.with_extension("glb");
    std::fs::write(&output, container)?;
    info!(output = %output.display(), "wrote binary scene");

    Ok(output)
}
