use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ForgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ForgeError::encode("x").to_string().contains("encode error:"));
    assert!(ForgeError::probe("x").to_string().contains("probe error:"));
    assert!(
        ForgeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = ForgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
