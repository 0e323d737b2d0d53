//! Binary glTF fixtures: the JSON document model and the GLB assembler.

/// GLB container assembly.
pub mod glb;
pub mod gltf;
