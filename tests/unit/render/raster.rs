use super::*;

#[test]
fn rejects_zero_capacity() {
    assert!(RasterBuffer::new(Viewport::new(0, 4)).is_err());
}

#[test]
fn viewport_must_fit_capacity() {
    let mut r = RasterBuffer::new(Viewport::new(8, 8)).unwrap();
    assert!(r.set_viewport(Viewport::new(4, 8)).is_ok());
    assert_eq!(r.pixels().len(), 32);
    assert!(r.set_viewport(Viewport::new(9, 1)).is_err());
    assert_eq!(r.viewport(), Viewport::new(4, 8));
}

#[test]
fn stride_follows_the_viewport_width() {
    let mut r = RasterBuffer::new(Viewport::new(8, 8)).unwrap();
    r.set_viewport(Viewport::new(3, 2)).unwrap();
    r.clear(0);
    r.put(2, 1, 7);
    assert_eq!(r.pixels()[5], 7);
    assert_eq!(r.pixel(2, 1), Some(7));
    assert_eq!(r.pixel(3, 1), None);
}

#[test]
fn clear_touches_only_the_live_region() {
    let mut r = RasterBuffer::new(Viewport::new(4, 4)).unwrap();
    r.clear(1);
    r.set_viewport(Viewport::new(2, 2)).unwrap();
    r.clear(9);
    assert!(r.pixels().iter().all(|&p| p == 9));
    r.set_viewport(Viewport::new(4, 4)).unwrap();
    assert_eq!(r.pixels().iter().filter(|&&p| p == 9).count(), 4);
}

#[test]
fn rgba8_export_unpacks_channels() {
    let mut r = RasterBuffer::new(Viewport::new(1, 1)).unwrap();
    r.clear(0xFF11_2233);
    assert_eq!(r.to_rgba8(), vec![0x11, 0x22, 0x33, 0xFF]);
}
