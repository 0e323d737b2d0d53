use super::*;

fn minimal() -> GltfDocument {
    let mut attributes = BTreeMap::new();
    attributes.insert("POSITION".to_string(), 0);
    GltfDocument {
        asset: AssetInfo {
            version: "2.0".to_string(),
            generator: None,
        },
        scene: Some(0),
        scenes: vec![Scene { nodes: vec![0] }],
        nodes: vec![Node { mesh: Some(0) }],
        meshes: vec![Mesh {
            primitives: vec![Primitive {
                attributes,
                indices: None,
                material: None,
                mode: None,
            }],
        }],
        materials: vec![],
        textures: vec![],
        images: vec![],
        accessors: vec![Accessor {
            buffer_view: Some(0),
            byte_offset: 0,
            component_type: COMPONENT_F32,
            count: 3,
            kind: AccessorType::Vec3,
            min: None,
            max: None,
        }],
        buffer_views: vec![BufferView {
            buffer: 0,
            byte_offset: 0,
            byte_length: 36,
        }],
        buffers: vec![Buffer {
            byte_length: 36,
            uri: None,
        }],
    }
}

#[test]
fn minimal_document_is_valid() {
    minimal().validate(Some(36)).unwrap();
}

#[test]
fn dangling_references_are_rejected() {
    let mut doc = minimal();
    doc.nodes[0].mesh = Some(4);
    let err = doc.validate(None).unwrap_err();
    assert!(err.to_string().contains("references mesh 4"));

    let mut doc = minimal();
    doc.meshes[0].primitives[0].material = Some(0);
    assert!(doc.validate(None).is_err());

    let mut doc = minimal();
    doc.scene = Some(1);
    assert!(doc.validate(None).is_err());
}

#[test]
fn buffer_views_must_fit_buffer_and_blob() {
    let mut doc = minimal();
    doc.buffer_views[0].byte_offset = 4;
    assert!(doc.validate(None).is_err());

    let doc = minimal();
    assert!(doc.validate(Some(32)).is_err());
}

#[test]
fn accessor_must_fit_and_align() {
    let mut doc = minimal();
    doc.accessors[0].count = 4;
    assert!(doc.validate(None).is_err());

    let mut doc = minimal();
    doc.buffers[0].byte_length = 40;
    doc.buffer_views[0].byte_offset = 2;
    assert!(doc.validate(None).is_err());
}

#[test]
fn image_in_buffer_view_needs_mime_type() {
    let mut doc = minimal();
    doc.images.push(Image {
        buffer_view: Some(0),
        mime_type: None,
        uri: None,
    });
    assert!(doc.validate(None).is_err());
}

#[test]
fn serialization_uses_gltf_field_names() {
    let json = serde_json::to_string(&minimal()).unwrap();
    assert!(json.contains(r#""bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36}]"#));
    assert!(json.contains(r#""componentType":5126,"count":3,"type":"VEC3""#));
    assert!(!json.contains("byteOffset\":0,\"componentType"));
    assert!(!json.contains("generator"));

    let back: GltfDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, minimal());
}

#[test]
fn missing_arrays_default_to_empty() {
    let doc: GltfDocument = serde_json::from_str(r#"{"asset":{"version":"2.0"}}"#).unwrap();
    assert!(doc.meshes.is_empty());
    assert!(doc.scene.is_none());
    doc.validate(None).unwrap();
}

#[test]
fn component_sizes() {
    assert_eq!(component_size(COMPONENT_U16), Some(2));
    assert_eq!(component_size(COMPONENT_F32), Some(4));
    assert_eq!(component_size(1), None);
    assert_eq!(AccessorType::Vec2.component_count(), 2);
}
