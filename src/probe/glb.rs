use crate::foundation::error::{ForgeError, ForgeResult};
use crate::probe::{slice_at, u32_le};
use crate::raster::png::PNG_SIGNATURE;
use crate::scene::glb::{
    CHUNK_BIN, CHUNK_HEADER_LEN, CHUNK_JSON, GLB_HEADER_LEN, GLB_MAGIC, GLB_VERSION,
};
use crate::scene::gltf::GltfDocument;

/// Axis-aligned bounds from the POSITION accessors' `min`/`max`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Aabb {
    /// Per-axis minimum.
    pub min: [f32; 3],
    /// Per-axis maximum.
    pub max: [f32; 3],
}

/// Container and scene summary of a GLB file.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlbInfo {
    /// Container version.
    pub version: u32,
    /// Total length from the header.
    pub total_length: u32,
    /// JSON chunk payload length, padding included.
    pub json_length: u32,
    /// BIN chunk payload length; 0 when absent.
    pub bin_length: u32,
    /// Meshes in the document.
    pub mesh_count: usize,
    /// Triangles over all triangle-list primitives.
    pub face_count: u64,
    /// Sum of POSITION accessor counts.
    pub vertex_count: u64,
    /// Materials in the document.
    pub material_count: usize,
    /// MIME type of each image, in image order.
    pub texture_mime_types: Vec<String>,
    /// Bounds, when the POSITION accessors declare them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aabb: Option<Aabb>,
}

fn vec3(v: Option<&Vec<f32>>) -> Option<[f32; 3]> {
    match v?.as_slice() {
        &[x, y, z] => Some([x, y, z]),
        _ => None,
    }
}

fn merge(aabb: Option<Aabb>, min: [f32; 3], max: [f32; 3]) -> Aabb {
    let Some(mut acc) = aabb else {
        return Aabb { min, max };
    };
    for axis in 0..3 {
        acc.min[axis] = acc.min[axis].min(min[axis]);
        acc.max[axis] = acc.max[axis].max(max[axis]);
    }
    acc
}

/// Check GLB framing, parse and validate the JSON chunk, and summarize the scene.
pub fn probe_glb(bytes: &[u8]) -> ForgeResult<GlbInfo> {
    if u32_le(bytes, 0, "glb magic")? != GLB_MAGIC {
        return Err(ForgeError::probe("missing glTF magic"));
    }
    let version = u32_le(bytes, 4, "glb version")?;
    if version != GLB_VERSION {
        return Err(ForgeError::probe(format!("unsupported glb version {version}")));
    }
    let total_length = u32_le(bytes, 8, "glb length")?;
    if total_length as usize != bytes.len() {
        return Err(ForgeError::probe(format!(
            "header length {total_length} != file size {}",
            bytes.len()
        )));
    }

    let json_length = u32_le(bytes, GLB_HEADER_LEN, "json chunk length")?;
    if u32_le(bytes, GLB_HEADER_LEN + 4, "json chunk type")? != CHUNK_JSON {
        return Err(ForgeError::probe("first chunk is not JSON"));
    }
    let json_at = GLB_HEADER_LEN + CHUNK_HEADER_LEN;
    let json = slice_at(bytes, json_at, json_length as usize, "json chunk")?;

    let mut at = json_at + json_length as usize;
    let mut bin: &[u8] = &[];
    if at < bytes.len() {
        let len = u32_le(bytes, at, "bin chunk length")?;
        if u32_le(bytes, at + 4, "bin chunk type")? != CHUNK_BIN {
            return Err(ForgeError::probe("second chunk is not BIN"));
        }
        bin = slice_at(bytes, at + CHUNK_HEADER_LEN, len as usize, "bin chunk")?;
        at += CHUNK_HEADER_LEN + len as usize;
    }
    if at != bytes.len() {
        return Err(ForgeError::probe(format!(
            "{} bytes after the last chunk",
            bytes.len() - at
        )));
    }

    let doc: GltfDocument = serde_json::from_slice(json)
        .map_err(|e| ForgeError::probe(format!("parse gltf json: {e}")))?;
    doc.validate(Some(bin.len()))
        .map_err(|e| ForgeError::probe(format!("invalid gltf document: {e}")))?;

    let mut face_count = 0u64;
    let mut vertex_count = 0u64;
    let mut aabb = None;
    for prim in doc.meshes.iter().flat_map(|m| &m.primitives) {
        let position = prim
            .attributes
            .get("POSITION")
            .map(|&a| &doc.accessors[a as usize]);
        if let Some(pos) = position {
            vertex_count += u64::from(pos.count);
            if let (Some(min), Some(max)) = (vec3(pos.min.as_ref()), vec3(pos.max.as_ref())) {
                aabb = Some(merge(aabb, min, max));
            }
        }
        if prim.is_triangles() {
            let corners = match prim.indices {
                Some(i) => Some(doc.accessors[i as usize].count),
                None => position.map(|p| p.count),
            };
            face_count += u64::from(corners.unwrap_or(0) / 3);
        }
    }

    let mut texture_mime_types = Vec::with_capacity(doc.images.len());
    for (i, img) in doc.images.iter().enumerate() {
        let mime = img.mime_type.clone().unwrap_or_default();
        if let Some(v) = img.buffer_view
            && mime == "image/png"
        {
            let view = &doc.buffer_views[v as usize];
            let at = view.byte_offset as usize;
            let data = slice_at(bin, at, view.byte_length as usize, "image")?;
            if !data.starts_with(&PNG_SIGNATURE) {
                return Err(ForgeError::probe(format!(
                    "image {i} is declared image/png but has no PNG signature"
                )));
            }
        }
        texture_mime_types.push(mime);
    }

    Ok(GlbInfo {
        version,
        total_length,
        json_length,
        bin_length: bin.len() as u32,
        mesh_count: doc.meshes.len(),
        face_count,
        vertex_count,
        material_count: doc.materials.len(),
        texture_mime_types,
        aabb,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/probe/glb.rs"]
mod tests;
