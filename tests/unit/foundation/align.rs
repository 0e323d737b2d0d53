use super::*;

#[test]
fn padding_rounds_up_to_the_next_multiple() {
    assert_eq!(padding_for(0, 4), 0);
    assert_eq!(padding_for(6, 4), 2);
    assert_eq!(padding_for(8, 4), 0);
    assert_eq!(padding_for(9, 4), 3);
}

#[test]
fn pad_to_uses_fill_byte() {
    let mut buf = b"{}".to_vec();
    pad_to(&mut buf, GLB_ALIGN, b' ');
    assert_eq!(buf, b"{}  ");

    let mut aligned = vec![1u8, 2, 3, 4];
    pad_to(&mut aligned, GLB_ALIGN, 0);
    assert_eq!(aligned.len(), 4);
}

#[test]
fn len_u32_rejects_oversized_lengths() {
    assert_eq!(len_u32(36, "chunk").unwrap(), 36);
    if usize::BITS > 32 {
        let err = len_u32(u32::MAX as usize + 1, "chunk").unwrap_err();
        assert!(err.to_string().contains("chunk length"));
    }
}
