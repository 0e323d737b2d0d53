use super::*;
use crate::raster::grid::texture_gradient;
use crate::raster::png::encode_png_with;
use crate::scene::glb::{TriangleMesh, assemble_textured_glb};

fn fixture() -> Vec<u8> {
    let png = encode_png_with(16, 16, texture_gradient(16, 16)).unwrap();
    assemble_textured_glb(&TriangleMesh::fixture_triangle(), &png).unwrap()
}

#[test]
fn fixture_glb_summary() {
    let glb = fixture();
    let info = probe_glb(&glb).unwrap();
    assert_eq!(info.version, 2);
    assert_eq!(info.total_length as usize, glb.len());
    assert_eq!(info.json_length % 4, 0);
    assert_eq!(info.bin_length % 4, 0);
    assert_eq!(info.mesh_count, 1);
    assert_eq!(info.face_count, 1);
    assert_eq!(info.vertex_count, 3);
    assert_eq!(info.material_count, 1);
    assert_eq!(info.texture_mime_types, ["image/png"]);
    assert_eq!(
        info.aabb,
        Some(Aabb {
            min: [-0.5, -0.5, 0.0],
            max: [0.5, 0.5, 0.0],
        })
    );
}

#[test]
fn wrong_total_length_is_rejected() {
    let mut glb = fixture();
    glb.extend_from_slice(&[0; 4]);
    let err = probe_glb(&glb).unwrap_err();
    assert!(err.to_string().contains("header length"));
}

#[test]
fn bad_version_is_rejected() {
    let mut glb = fixture();
    glb[4] = 1;
    assert!(probe_glb(&glb).is_err());
}

#[test]
fn corrupted_texture_signature_is_rejected() {
    let mut glb = fixture();
    let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
    // Image section starts at blob offset 68.
    let image_at = 12 + 8 + json_len + 8 + 68;
    glb[image_at + 1] = b'X';
    let err = probe_glb(&glb).unwrap_err();
    assert!(err.to_string().contains("PNG signature"));
}

#[test]
fn merge_widens_bounds() {
    let a = merge(None, [0.0; 3], [1.0; 3]);
    let b = merge(Some(a), [-1.0, 0.5, 0.0], [0.5, 2.0, 1.0]);
    assert_eq!(b.min, [-1.0, 0.0, 0.0]);
    assert_eq!(b.max, [1.0, 2.0, 1.0]);
    assert_eq!(vec3(Some(&vec![1.0, 2.0])), None);
}
