//! Subset of the glTF 2.0 JSON schema needed for a textured mesh stored in one binary buffer.
//!
//! Field order follows the order the document is written in, so serialization is stable.

use std::collections::BTreeMap;

use crate::foundation::error::{ForgeError, ForgeResult};

/// `UNSIGNED_SHORT`
pub const COMPONENT_U16: u32 = 5123;
/// `UNSIGNED_INT`
pub const COMPONENT_U32: u32 = 5125;
/// `FLOAT`
pub const COMPONENT_F32: u32 = 5126;

/// Byte size of one component, for the component types this crate understands.
pub fn component_size(component_type: u32) -> Option<usize> {
    match component_type {
        5120 | 5121 => Some(1),
        5122 | COMPONENT_U16 => Some(2),
        COMPONENT_U32 | COMPONENT_F32 => Some(4),
        _ => None,
    }
}

/// Top-level glTF document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfDocument {
    /// Asset metadata.
    pub asset: AssetInfo,
    /// Default scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<u32>,
    /// Scenes.
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Nodes.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Meshes.
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    /// Materials.
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Textures.
    #[serde(default)]
    pub textures: Vec<Texture>,
    /// Images.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Accessors.
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    /// Buffer views.
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    /// Buffers.
    #[serde(default)]
    pub buffers: Vec<Buffer>,
}

/// `asset` object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetInfo {
    /// glTF version, always `"2.0"` when written by this crate.
    pub version: String,
    /// Tool that wrote the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

/// Scene: root node indices.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Root nodes.
    #[serde(default)]
    pub nodes: Vec<u32>,
}

/// Node, only the mesh reference is modelled.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Mesh index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<u32>,
}

/// Mesh.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    /// Primitives.
    pub primitives: Vec<Primitive>,
}

/// Mesh primitive.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Primitive {
    /// Attribute semantic (`POSITION`, `TEXCOORD_0`, ...) to accessor index.
    pub attributes: BTreeMap<String, u32>,
    /// Index accessor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<u32>,
    /// Material index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<u32>,
    /// Topology; absent means triangles (4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}

impl Primitive {
    /// `true` for triangle-list topology.
    pub fn is_triangles(&self) -> bool {
        self.mode.unwrap_or(4) == 4
    }
}

/// Material, only the PBR base colour texture is modelled.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Metallic-roughness parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
}

/// `pbrMetallicRoughness` object.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    /// Base colour texture reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color_texture: Option<TextureInfo>,
    /// Metalness factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metallic_factor: Option<f32>,
    /// Roughness factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_factor: Option<f32>,
}

/// Texture reference from a material.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextureInfo {
    /// Texture index.
    pub index: u32,
}

/// Texture: image source.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Texture {
    /// Image index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<u32>,
}

/// Image stored in a buffer view or referenced by URI.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Buffer view holding the encoded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<u32>,
    /// MIME type, required with `buffer_view`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// External or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Element shape of an accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessorType {
    /// One component.
    Scalar,
    /// Two components.
    Vec2,
    /// Three components.
    Vec3,
    /// Four components.
    Vec4,
}

impl AccessorType {
    /// Components per element.
    pub fn component_count(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 => 4,
        }
    }
}

/// Typed view over a buffer view.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    /// Source buffer view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<u32>,
    /// Offset inside the buffer view.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub byte_offset: u32,
    /// GL component type (5123, 5126, ...).
    pub component_type: u32,
    /// Number of elements.
    pub count: u32,
    /// Element shape.
    #[serde(rename = "type")]
    pub kind: AccessorType,
    /// Per-component minimum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f32>>,
    /// Per-component maximum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f32>>,
}

impl Accessor {
    /// Bytes covered by the accessor when tightly packed, if the component type is known.
    pub fn packed_len(&self) -> Option<usize> {
        component_size(self.component_type)
            .map(|size| size * self.kind.component_count() * self.count as usize)
    }
}

/// Byte range of a buffer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    /// Buffer index.
    pub buffer: u32,
    /// Start of the range.
    #[serde(default)]
    pub byte_offset: u32,
    /// Length of the range.
    pub byte_length: u32,
}

impl BufferView {
    /// One past the last byte of the range.
    pub fn end(&self) -> u64 {
        u64::from(self.byte_offset) + u64::from(self.byte_length)
    }
}

/// Buffer; the GLB-embedded buffer has no URI.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    /// Total length in bytes.
    pub byte_length: u32,
    /// External or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

fn check_index(kind: &str, idx: u32, len: usize, owner: &str) -> ForgeResult<()> {
    if idx as usize >= len {
        return Err(ForgeError::validation(format!(
            "{owner} references {kind} {idx}, but only {len} exist"
        )));
    }
    Ok(())
}

impl GltfDocument {
    /// Check that every index reference resolves, that buffer views stay inside their buffer
    /// (and inside `blob_len` when given), and that accessors fit their buffer view.
    pub fn validate(&self, blob_len: Option<usize>) -> ForgeResult<()> {
        if let Some(scene) = self.scene {
            check_index("scene", scene, self.scenes.len(), "document")?;
        }
        for (i, scene) in self.scenes.iter().enumerate() {
            for &n in &scene.nodes {
                check_index("node", n, self.nodes.len(), &format!("scene {i}"))?;
            }
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(m) = node.mesh {
                check_index("mesh", m, self.meshes.len(), &format!("node {i}"))?;
            }
        }
        for (i, mesh) in self.meshes.iter().enumerate() {
            for prim in &mesh.primitives {
                let owner = format!("mesh {i}");
                for &a in prim.attributes.values() {
                    check_index("accessor", a, self.accessors.len(), &owner)?;
                }
                if let Some(a) = prim.indices {
                    check_index("accessor", a, self.accessors.len(), &owner)?;
                }
                if let Some(m) = prim.material {
                    check_index("material", m, self.materials.len(), &owner)?;
                }
            }
        }
        for (i, mat) in self.materials.iter().enumerate() {
            if let Some(tex) = mat
                .pbr_metallic_roughness
                .as_ref()
                .and_then(|p| p.base_color_texture.as_ref())
            {
                check_index("texture", tex.index, self.textures.len(), &format!("material {i}"))?;
            }
        }
        for (i, tex) in self.textures.iter().enumerate() {
            if let Some(src) = tex.source {
                check_index("image", src, self.images.len(), &format!("texture {i}"))?;
            }
        }
        for (i, img) in self.images.iter().enumerate() {
            if let Some(v) = img.buffer_view {
                check_index("bufferView", v, self.buffer_views.len(), &format!("image {i}"))?;
                if img.mime_type.is_none() {
                    return Err(ForgeError::validation(format!(
                        "image {i} is stored in a buffer view but has no mimeType"
                    )));
                }
            }
        }
        for (i, view) in self.buffer_views.iter().enumerate() {
            let owner = format!("bufferView {i}");
            check_index("buffer", view.buffer, self.buffers.len(), &owner)?;
            let buffer_len = u64::from(self.buffers[view.buffer as usize].byte_length);
            if view.end() > buffer_len {
                return Err(ForgeError::validation(format!(
                    "{owner} ends at {} past buffer length {buffer_len}",
                    view.end()
                )));
            }
            if let Some(blob_len) = blob_len
                && view.end() > blob_len as u64
            {
                return Err(ForgeError::validation(format!(
                    "{owner} ends at {} past binary chunk length {blob_len}",
                    view.end()
                )));
            }
        }
        for (i, acc) in self.accessors.iter().enumerate() {
            let owner = format!("accessor {i}");
            let Some(v) = acc.buffer_view else {
                continue;
            };
            check_index("bufferView", v, self.buffer_views.len(), &owner)?;
            let view = &self.buffer_views[v as usize];
            let size = component_size(acc.component_type).ok_or_else(|| {
                ForgeError::validation(format!(
                    "{owner} has unknown componentType {}",
                    acc.component_type
                ))
            })?;
            if (view.byte_offset as usize + acc.byte_offset as usize) % size != 0 {
                return Err(ForgeError::validation(format!(
                    "{owner} data is not aligned to its {size}-byte component size"
                )));
            }
            let needed = acc.packed_len().unwrap_or(0) as u64 + u64::from(acc.byte_offset);
            if needed > u64::from(view.byte_length) {
                return Err(ForgeError::validation(format!(
                    "{owner} needs {needed} bytes but bufferView {v} holds {}",
                    view.byte_length
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/gltf.rs"]
mod tests;
