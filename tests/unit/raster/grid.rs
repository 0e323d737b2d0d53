use super::*;

#[test]
fn from_fn_is_row_major() {
    let grid = PixelGrid::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
    assert_eq!(grid.as_rgba().len(), 3 * 2 * 4);
    assert_eq!(grid.pixel(2, 1), Some([2, 1, 0, 255]));
    assert_eq!(&grid.as_rgba()[4..8], &[1, 0, 0, 255]);
    assert_eq!(grid.pixel(3, 0), None);
}

#[test]
fn empty_grid_is_rejected() {
    assert!(PixelGrid::from_fn(0, 4, |_, _| [0; 4]).is_err());
    assert!(PixelGrid::from_fn(4, 0, |_, _| [0; 4]).is_err());
}

#[test]
fn scanlines_prefix_every_row_with_filter_none() {
    let grid = PixelGrid::from_fn(2, 3, |_, _| [9, 9, 9, 9]).unwrap();
    let lines = grid.scanlines();
    assert_eq!(lines.len(), 3 * (1 + 2 * 4));
    for row in lines.chunks_exact(9) {
        assert_eq!(row[0], 0);
        assert!(row[1..].iter().all(|&b| b == 9));
    }
}

#[test]
fn fixture_gradient_corners() {
    let rule = fixture_gradient(64, 64);
    assert_eq!(rule(0, 0), [0, 0, 255, 255]);
    assert_eq!(rule(63, 63), [251, 251, 3, 255]);
    assert_eq!(rule(32, 16), [127, 63, 127, 255]);
}

#[test]
fn texture_gradient_keeps_blue_constant() {
    let rule = texture_gradient(16, 16);
    assert_eq!(rule(0, 0), [0, 0, 128, 255]);
    assert_eq!(rule(15, 8), [239, 127, 128, 255]);
}

#[test]
fn gradients_hold_at_the_largest_extent() {
    let rule = fixture_gradient(u32::MAX, u32::MAX);
    assert_eq!(rule(u32::MAX - 1, 0), [254, 0, 0, 255]);
    assert_eq!(rule(0, u32::MAX - 1), [0, 254, 255, 255]);

    let rule = texture_gradient(u32::MAX, 2);
    assert_eq!(rule(u32::MAX / 2, 1), [127, 127, 128, 255]);
}
