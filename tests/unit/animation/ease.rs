use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InQuad.apply(-1.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(3.0), 1.0);
}

#[test]
fn colors_lerp_per_channel() {
    let mid = Rgba8::lerp(&Rgba8::WHITE, &Rgba8::ORANGE, 0.5);
    assert_eq!(mid, Rgba8::opaque(255, 210, 128));
    assert_eq!(Rgba8::lerp(&Rgba8::BLACK, &Rgba8::WHITE, 1.0), Rgba8::WHITE);
}

#[test]
fn points_lerp_along_the_segment() {
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 0.0), &Point::new(10.0, -20.0), 0.25);
    assert_eq!(p, Point::new(2.5, -5.0));
}
