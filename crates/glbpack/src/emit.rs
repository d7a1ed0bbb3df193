//! Binary container layout: header, scene text, padding and body.

use serde_json::{json, Map};
use tracing::debug;

use crate::body::BodyAccumulator;
use crate::document::SceneDocument;
use crate::error::Result;

/// Container magic, the ASCII string `glTF`, written big-endian.
const MAGIC: u32 = 0x676C_5446;
/// Container format version.
const VERSION: u32 = 1;
/// Scene format tag: 0 means JSON text.
const SCENE_FORMAT_JSON: u32 = 0;
/// Fixed header size in bytes.
pub const HEADER_LEN: u32 = 20;

/// Lay out the final container: header, scene JSON padded to a 4-byte
/// boundary with ASCII spaces, then every body block at its assigned
/// offset.
///
/// The document's `buffers` section is replaced wholesale with the single
/// unified descriptor before serialization; the scene's exact serialized
/// length determines the padding, so it is measured, never estimated.
pub fn emit(
    doc: &mut SceneDocument,
    body: &BodyAccumulator,
    buffer_name: &str,
) -> Result<Vec<u8>> {
    let mut buffers = Map::new();
    buffers.insert(
        buffer_name.to_string(),
        json!({ "uri": "data", "byteLength": body.total_len() }),
    );
    doc.set_section("buffers", buffers);

    let scene = doc.to_bytes()?;
    let scene_len = scene.len() as u32;
    let padded_scene_len = (scene_len + 3) & !3;
    let body_offset = HEADER_LEN + padded_scene_len;
    let file_len = body_offset + body.total_len();

    let mut out = Vec::with_capacity(file_len as usize);
    out.extend_from_slice(&MAGIC.to_be_bytes());
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&file_len.to_le_bytes());
    out.extend_from_slice(&padded_scene_len.to_le_bytes());
    out.extend_from_slice(&SCENE_FORMAT_JSON.to_le_bytes());

    out.extend_from_slice(&scene);
    out.resize(body_offset as usize, b' ');

    out.resize(file_len as usize, 0);
    for block in body.blocks() {
        let start = (body_offset + block.offset) as usize;
        out[start..start + block.bytes.len()].copy_from_slice(&block.bytes);
    }

    debug!(
        scene_len,
        padded_scene_len,
        body_len = body.total_len(),
        file_len,
        "emitted container"
    );
    Ok(out)
}
