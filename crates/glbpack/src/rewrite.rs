//! Reference rewriting: collects external resources into the body region
//! and repoints all buffer references at the single unified buffer.
//!
//! Three passes run strictly in order: the buffer pass assigns body offsets
//! that the bufferView pass reads, and the embedding pass appends to the
//! same body region after both. Fetch and append happen as one unit in
//! document iteration order, so offset assignment is deterministic.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::body::BodyAccumulator;
use crate::document::SceneDocument;
use crate::error::{PackError, Result};
use crate::fetch::{fetch, ResourceSource};
use crate::options::PackOptions;
use crate::shaders;

/// Name of the binary-container extension recorded in the document.
pub const BINARY_EXTENSION: &str = "KHR_binary_glTF";

/// Placeholder image metadata; no image introspection is performed.
const IMAGE_MIME_PLACEHOLDER: &str = "image/i-dont-know";
const IMAGE_DIMENSION_PLACEHOLDER: u32 = 9999;

/// Rewrite `doc` in place, filling `body` with every collected resource.
pub fn rewrite(
    doc: &mut SceneDocument,
    source: &dyn ResourceSource,
    body: &mut BodyAccumulator,
    options: &PackOptions,
) -> Result<()> {
    doc.push_extension_used(BINARY_EXTENSION);

    let offsets = embed_buffers(doc, source, body)?;
    rewrite_buffer_views(doc, &offsets, options.buffer_name.as_str())?;
    embed_resources(doc, source, body, options)?;

    Ok(())
}

/// Buffer pass: append every buffer's content to the body and record the
/// assigned offset both in the descriptor (scratch `byteOffset`, consumed
/// by the bufferView pass and superseded at emit time) and in the returned
/// map.
fn embed_buffers(
    doc: &mut SceneDocument,
    source: &dyn ResourceSource,
    body: &mut BodyAccumulator,
) -> Result<HashMap<String, u32>> {
    let buffers = doc.buffers_mut()?;
    let mut offsets = HashMap::new();

    for (id, descriptor) in buffers.iter_mut() {
        let buffer = as_descriptor(id, "buffer", descriptor)?;

        match buffer.get("type") {
            None | Some(Value::Null) => {}
            Some(Value::String(kind)) if kind == "arraybuffer" => {}
            Some(other) => {
                return Err(PackError::UnsupportedBufferType {
                    id: id.clone(),
                    kind: json_text(other),
                });
            }
        }

        let uri = required_uri(id, "buffer", buffer)?;
        let slot = body.append(fetch(&uri, source)?)?;
        buffer.insert("byteOffset".to_string(), json!(slot.offset));
        offsets.insert(id.clone(), slot.offset);
    }

    debug!(buffers = offsets.len(), body_len = body.total_len(), "buffer pass done");
    Ok(offsets)
}

/// BufferView pass: repoint every view at the unified buffer and make its
/// offset absolute within the body region.
fn rewrite_buffer_views(
    doc: &mut SceneDocument,
    offsets: &HashMap<String, u32>,
    buffer_name: &str,
) -> Result<()> {
    let views = doc.buffer_views_mut()?;

    for (id, descriptor) in views.iter_mut() {
        let view = as_descriptor(id, "bufferView", descriptor)?;

        let buffer_id = view
            .get("buffer")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PackError::InvalidDocument(format!("bufferView {id} has no buffer reference"))
            })?;

        let base = *offsets
            .get(buffer_id)
            .ok_or_else(|| PackError::DanglingBufferReference(buffer_id.to_string()))?;

        let relative = view
            .get("byteOffset")
            .ok_or_else(|| {
                PackError::InvalidDocument(format!("bufferView {id} has no byteOffset"))
            })?
            .as_u64()
            .ok_or_else(|| {
                PackError::InvalidDocument(format!(
                    "bufferView {id} byteOffset is not an unsigned integer"
                ))
            })?;
        view.insert("buffer".to_string(), Value::String(buffer_name.to_string()));
        view.insert("byteOffset".to_string(), json!(relative + u64::from(base)));
    }

    Ok(())
}

/// Embedding pass: pull shader and image content into the body, clear the
/// original URIs and record synthesized bufferViews under the binary
/// extension. Shaders are embedded only when enabled; images always.
fn embed_resources(
    doc: &mut SceneDocument,
    source: &dyn ResourceSource,
    body: &mut BodyAccumulator,
    options: &PackOptions,
) -> Result<()> {
    let buffer_name = options.buffer_name.as_str();
    let mut new_views: Vec<(String, Value)> = Vec::new();

    if options.embed.shaders {
        if let Some(shaders) = doc.shaders_mut()? {
            for (id, descriptor) in shaders.iter_mut() {
                let shader = as_descriptor(id, "shader", descriptor)?;
                let uri = required_uri(id, "shader", shader)?;
                shader.insert("uri".to_string(), Value::String(String::new()));

                let fetch_uri = if options.use_builtin_shaders {
                    debug!(shader = %id, "overriding provided shader");
                    shaders::builtin_shader_uri(id).unwrap_or_else(|| uri.clone())
                } else {
                    uri
                };

                let slot = body.append(fetch(&fetch_uri, source)?)?;
                let view_id = format!("binary_shader_{id}");
                shader.insert(
                    "extensions".to_string(),
                    json!({ BINARY_EXTENSION: { "bufferView": view_id.clone() } }),
                );
                new_views.push((
                    view_id,
                    json!({
                        "buffer": buffer_name,
                        "byteLength": slot.length,
                        "byteOffset": slot.offset,
                    }),
                ));
            }
        }
    }

    if let Some(images) = doc.images_mut()? {
        for (id, descriptor) in images.iter_mut() {
            let image = as_descriptor(id, "image", descriptor)?;
            let uri = required_uri(id, "image", image)?;
            image.insert("uri".to_string(), Value::String(String::new()));

            let slot = body.append(fetch(&uri, source)?)?;
            let view_id = format!("binary_images_{id}");
            image.insert(
                "extensions".to_string(),
                json!({
                    BINARY_EXTENSION: {
                        "bufferView": view_id.clone(),
                        "mimeType": IMAGE_MIME_PLACEHOLDER,
                        "height": IMAGE_DIMENSION_PLACEHOLDER,
                        "width": IMAGE_DIMENSION_PLACEHOLDER,
                    }
                }),
            );
            new_views.push((
                view_id,
                json!({
                    "buffer": buffer_name,
                    "byteLength": slot.length,
                    "byteOffset": slot.offset,
                }),
            ));
        }
    }

    if !new_views.is_empty() {
        debug!(views = new_views.len(), "embedded shader/image resources");
        let views = doc.buffer_views_mut()?;
        for (id, view) in new_views {
            views.insert(id, view);
        }
    }

    Ok(())
}

fn as_descriptor<'a>(
    id: &str,
    section: &str,
    value: &'a mut Value,
) -> Result<&'a mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| PackError::InvalidDocument(format!("{section} {id} is not an object")))
}

fn required_uri(id: &str, section: &str, descriptor: &Map<String, Value>) -> Result<String> {
    descriptor
        .get("uri")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PackError::InvalidDocument(format!("{section} {id} has no uri")))
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
