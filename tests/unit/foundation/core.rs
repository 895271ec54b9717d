use super::*;

#[test]
fn node_id_display_and_parse_agree() {
    let id = NodeId(42);
    assert_eq!(id.to_string(), "42");
    assert_eq!("42".parse::<NodeId>().unwrap(), id);
    assert_eq!(id.index(), 42);
}

#[test]
fn node_id_parse_rejects_garbage() {
    let err = "4x".parse::<NodeId>().unwrap_err();
    assert!(err.to_string().contains("malformed trace:"));
}

#[test]
fn css_color_carries_alpha() {
    assert_eq!(Rgba8::ORANGE.to_css(), "rgba(255,165,0,1.000)");
    assert_eq!(Rgba8::TRANSPARENT.to_css(), "rgba(0,0,0,0.000)");
}
