use super::*;

#[test]
fn fnv_hash_is_incremental() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"symbolfx");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b's');
    b.write_bytes(b"ymbolfx");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn parse_number_accepts_px_suffix() {
    assert_eq!(parse_number("12"), Some(12.0));
    assert_eq!(parse_number(" 4.5px "), Some(4.5));
    assert_eq!(parse_number("50%"), None);
    assert_eq!(parse_number("abc"), None);
}

#[test]
fn fmt_number_trims_trailing_zeros() {
    assert_eq!(fmt_number(10.0), "10");
    assert_eq!(fmt_number(2.5), "2.5");
    assert_eq!(fmt_number(1.0 / 3.0), "0.333");
    assert_eq!(fmt_number(-0.0004), "0");
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(0.0, 30.0, 0.0), 0.0);
    assert_eq!(lerp(0.0, 30.0, 1.0), 30.0);
    assert_eq!(lerp(100.0, 0.0, 0.5), 50.0);
}
