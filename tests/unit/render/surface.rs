use super::*;

#[test]
fn solid_surface_is_premultiplied() {
    let s = Surface::solid(3, 2, Rgba8::new(200, 100, 0, 0));
    assert_eq!(s.size(), Size::new(3.0, 2.0));
    assert_eq!(s.pixel(2, 1), Some([0, 0, 0, 0]));

    let s = Surface::solid(1, 1, Rgba8::opaque(9, 8, 7));
    assert_eq!(s.pixel(0, 0), Some([9, 8, 7, 255]));
    assert_eq!(s.pixel(1, 0), None);
}

#[test]
fn from_premul_bytes_checks_length() {
    assert!(Surface::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
    assert!(matches!(
        Surface::from_premul_bytes(2, 2, vec![0; 15]),
        Err(PanelkitError::Render(_))
    ));
}

#[test]
fn scaled_produces_exact_target_size() {
    let s = Surface::solid(50, 50, Rgba8::opaque(255, 0, 0));
    let big = s.scaled(100, 40);
    assert_eq!((big.width(), big.height()), (100, 40));
    assert_eq!(big.pixel(50, 20), Some([255, 0, 0, 255]));
    assert_eq!((s.width(), s.height()), (50, 50));
}

#[test]
fn scaling_to_zero_yields_empty_surface() {
    let s = Surface::solid(4, 4, Rgba8::opaque(1, 2, 3));
    let z = s.scaled(0, 4);
    assert!(z.is_empty());
    assert_eq!(z.height(), 4);
}
