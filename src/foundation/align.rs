/// Alignment required for GLB chunks and buffer views.
pub(crate) const GLB_ALIGN: usize = 4;

/// Number of bytes needed to bring `len` up to a multiple of `align`.
pub(crate) fn padding_for(len: usize, align: usize) -> usize {
    debug_assert!(align > 0);
    (align - len % align) % align
}

/// Append `fill` bytes until `buf.len()` is a multiple of `align`.
pub(crate) fn pad_to(buf: &mut Vec<u8>, align: usize, fill: u8) {
    let n = padding_for(buf.len(), align);
    buf.extend(std::iter::repeat_n(fill, n));
}

/// Convert a byte length into a `u32` length field.
pub(crate) fn len_u32(len: usize, what: &str) -> crate::ForgeResult<u32> {
    u32::try_from(len).map_err(|_| {
        crate::ForgeError::validation(format!("{what} length {len} does not fit in a u32 field"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/align.rs"]
mod tests;
