use std::collections::BTreeMap;

use crate::foundation::align::{GLB_ALIGN, len_u32, pad_to};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::scene::gltf::{
    Accessor, AccessorType, AssetInfo, Buffer, BufferView, COMPONENT_F32, COMPONENT_U16,
    GltfDocument, Image, Material, Mesh, Node, PbrMetallicRoughness, Primitive, Scene, Texture,
    TextureInfo,
};

/// `"glTF"` read as a little-endian u32.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// Container version written and accepted.
pub const GLB_VERSION: u32 = 2;
/// `"JSON"` chunk type.
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// `"BIN\0"` chunk type.
pub const CHUNK_BIN: u32 = 0x004E_4942;
/// Magic + version + total length.
pub const GLB_HEADER_LEN: usize = 12;
/// Chunk length + chunk type.
pub const CHUNK_HEADER_LEN: usize = 8;

/// Indexed triangle list with one UV set.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Texture coordinates, one per position.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices into `positions`.
    pub indices: Vec<u16>,
}

impl TriangleMesh {
    /// The single upright triangle of `test.glb`.
    pub fn fixture_triangle() -> Self {
        Self {
            positions: vec![[0.0, 0.5, 0.0], [-0.5, -0.5, 0.0], [0.5, -0.5, 0.0]],
            uvs: vec![[0.5, 0.0], [0.0, 1.0], [1.0, 1.0]],
            indices: vec![0, 1, 2],
        }
    }

    /// Check attribute counts and index ranges.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.positions.is_empty() {
            return Err(ForgeError::validation("mesh has no vertices"));
        }
        if self.uvs.len() != self.positions.len() {
            return Err(ForgeError::validation(format!(
                "mesh has {} positions but {} uvs",
                self.positions.len(),
                self.uvs.len()
            )));
        }
        if self.indices.is_empty() || !self.indices.len().is_multiple_of(3) {
            return Err(ForgeError::validation(format!(
                "mesh index count {} is not a non-zero multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self
            .indices
            .iter()
            .find(|&&i| usize::from(i) >= self.positions.len())
        {
            return Err(ForgeError::validation(format!(
                "mesh index {bad} is out of range for {} vertices",
                self.positions.len()
            )));
        }
        if self.positions.iter().flatten().any(|c| !c.is_finite())
            || self.uvs.iter().flatten().any(|c| !c.is_finite())
        {
            return Err(ForgeError::validation("mesh has non-finite coordinates"));
        }
        Ok(())
    }

    /// Per-axis minimum and maximum of the positions.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }
}

/// Byte range of one section appended to the shared blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    /// Offset of the first byte.
    pub offset: usize,
    /// Unpadded length.
    pub length: usize,
}

/// Builds the shared binary buffer, aligning each section's start to 4 bytes.
#[derive(Debug, Default)]
pub(crate) struct BlobBuilder {
    data: Vec<u8>,
}

impl BlobBuilder {
    pub(crate) fn append(&mut self, bytes: &[u8]) -> Section {
        pad_to(&mut self.data, GLB_ALIGN, 0);
        let offset = self.data.len();
        self.data.extend_from_slice(bytes);
        Section {
            offset,
            length: bytes.len(),
        }
    }

    pub(crate) fn finish(mut self) -> Vec<u8> {
        pad_to(&mut self.data, GLB_ALIGN, 0);
        self.data
    }
}

fn buffer_view(section: Section) -> ForgeResult<BufferView> {
    Ok(BufferView {
        buffer: 0,
        byte_offset: len_u32(section.offset, "buffer view offset")?,
        byte_length: len_u32(section.length, "buffer view")?,
    })
}

/// Lay out `mesh` and the PNG `texture` in one blob and describe them in a glTF document.
///
/// Blob order: indices (u16 LE), positions (f32 LE), uvs (f32 LE), PNG bytes; every section
/// starts on a 4-byte boundary and the blob ends on one.
pub fn build_textured_mesh(
    mesh: &TriangleMesh,
    texture_png: &[u8],
) -> ForgeResult<(GltfDocument, Vec<u8>)> {
    mesh.validate()?;
    if texture_png.is_empty() {
        return Err(ForgeError::validation("texture image is empty"));
    }

    let index_bytes: Vec<u8> = mesh.indices.iter().flat_map(|i| i.to_le_bytes()).collect();
    let position_bytes: Vec<u8> = mesh
        .positions
        .iter()
        .flatten()
        .flat_map(|c| c.to_le_bytes())
        .collect();
    let uv_bytes: Vec<u8> = mesh
        .uvs
        .iter()
        .flatten()
        .flat_map(|c| c.to_le_bytes())
        .collect();

    let mut blob = BlobBuilder::default();
    let indices = blob.append(&index_bytes);
    let positions = blob.append(&position_bytes);
    let uvs = blob.append(&uv_bytes);
    let image = blob.append(texture_png);
    let blob = blob.finish();

    let (min, max) = mesh.bounds();
    let vertex_count = len_u32(mesh.positions.len(), "vertex count")?;

    let mut attributes = BTreeMap::new();
    attributes.insert("POSITION".to_string(), 1);
    attributes.insert("TEXCOORD_0".to_string(), 2);

    let doc = GltfDocument {
        asset: AssetInfo {
            version: "2.0".to_string(),
            generator: Some(env!("CARGO_PKG_NAME").to_string()),
        },
        scene: Some(0),
        scenes: vec![Scene { nodes: vec![0] }],
        nodes: vec![Node { mesh: Some(0) }],
        meshes: vec![Mesh {
            primitives: vec![Primitive {
                attributes,
                indices: Some(0),
                material: Some(0),
                mode: None,
            }],
        }],
        materials: vec![Material {
            pbr_metallic_roughness: Some(PbrMetallicRoughness {
                base_color_texture: Some(TextureInfo { index: 0 }),
                metallic_factor: Some(0.0),
                roughness_factor: Some(1.0),
            }),
        }],
        textures: vec![Texture { source: Some(0) }],
        images: vec![Image {
            buffer_view: Some(3),
            mime_type: Some("image/png".to_string()),
            uri: None,
        }],
        accessors: vec![
            Accessor {
                buffer_view: Some(0),
                byte_offset: 0,
                component_type: COMPONENT_U16,
                count: len_u32(mesh.indices.len(), "index count")?,
                kind: AccessorType::Scalar,
                min: None,
                max: None,
            },
            Accessor {
                buffer_view: Some(1),
                byte_offset: 0,
                component_type: COMPONENT_F32,
                count: vertex_count,
                kind: AccessorType::Vec3,
                min: Some(min.to_vec()),
                max: Some(max.to_vec()),
            },
            Accessor {
                buffer_view: Some(2),
                byte_offset: 0,
                component_type: COMPONENT_F32,
                count: vertex_count,
                kind: AccessorType::Vec2,
                min: None,
                max: None,
            },
        ],
        buffer_views: vec![
            buffer_view(indices)?,
            buffer_view(positions)?,
            buffer_view(uvs)?,
            buffer_view(image)?,
        ],
        buffers: vec![Buffer {
            byte_length: len_u32(blob.len(), "binary buffer")?,
            uri: None,
        }],
    };
    doc.validate(Some(blob.len()))?;

    Ok((doc, blob))
}

/// Compact JSON, padded with trailing spaces to a 4-byte boundary.
pub fn padded_json(doc: &GltfDocument) -> ForgeResult<Vec<u8>> {
    let mut json = serde_json::to_vec(doc)
        .map_err(|e| ForgeError::encode(format!("serialize gltf json: {e}")))?;
    pad_to(&mut json, GLB_ALIGN, b' ');
    Ok(json)
}

/// Emit the GLB container: 12-byte header, JSON chunk, BIN chunk.
///
/// `total length = 12 + 8 + json + 8 + bin`, where both chunk payloads are padded to 4 bytes.
/// `doc` must describe `blob`: buffer 0 is the BIN chunk, its `byteLength` may fall short of the
/// padded chunk only by the padding, and every buffer view must end inside it.
pub fn encode_glb(doc: &GltfDocument, blob: &[u8]) -> ForgeResult<Vec<u8>> {
    let mut bin = blob.to_vec();
    pad_to(&mut bin, GLB_ALIGN, 0);
    check_bin_buffer(doc, bin.len())?;
    doc.validate(Some(bin.len()))?;

    let json = padded_json(doc)?;

    let total = GLB_HEADER_LEN + CHUNK_HEADER_LEN + json.len() + CHUNK_HEADER_LEN + bin.len();
    let total_u32 = len_u32(total, "glb file")?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&total_u32.to_le_bytes());

    out.extend_from_slice(&len_u32(json.len(), "json chunk")?.to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);

    out.extend_from_slice(&len_u32(bin.len(), "bin chunk")?.to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    debug_assert_eq!(out.len(), total);
    Ok(out)
}

fn check_bin_buffer(doc: &GltfDocument, bin_len: usize) -> ForgeResult<()> {
    let Some(buffer) = doc.buffers.first() else {
        if bin_len == 0 {
            return Ok(());
        }
        return Err(ForgeError::validation(
            "binary chunk is not empty but the document declares no buffer",
        ));
    };
    if buffer.uri.is_some() {
        return Err(ForgeError::validation(
            "buffer 0 of a glb must refer to the binary chunk, not a uri",
        ));
    }
    let declared = buffer.byte_length as usize;
    if declared > bin_len || bin_len - declared >= GLB_ALIGN {
        return Err(ForgeError::validation(format!(
            "buffer 0 declares {declared} bytes but the binary chunk holds {bin_len}"
        )));
    }
    Ok(())
}

/// Build and encode a textured mesh GLB in one step.
#[tracing::instrument(skip_all, fields(texture_bytes = texture_png.len()))]
pub fn assemble_textured_glb(mesh: &TriangleMesh, texture_png: &[u8]) -> ForgeResult<Vec<u8>> {
    let (doc, blob) = build_textured_mesh(mesh, texture_png)?;
    encode_glb(&doc, &blob)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/glb.rs"]
mod tests;
