use super::*;

#[test]
fn link_text_form_round_trips() {
    let link = Link::new(NodeId(3), NodeId(17));
    assert_eq!(link.to_string(), "3-17");
    assert_eq!("3-17".parse::<Link>().unwrap(), link);
}

#[test]
fn link_rejects_missing_separator() {
    assert!("317".parse::<Link>().is_err());
    assert!("3-".parse::<Link>().is_err());
}

#[test]
fn instruction_json_uses_type_tag_and_link_strings() {
    let rotate = Instruction::Rotate {
        direction: RotateDir::Right,
        links_removed: vec![Link::new(NodeId(0), NodeId(1))],
        links_added: vec![Link::new(NodeId(1), NodeId(0))],
        movements: vec![NodeMove {
            id: NodeId(1),
            to: Point::new(0.0, 0.0),
        }],
        n1: NodeId(0),
        n2: NodeId(1),
        explanation: "rotate right, bringing 2 to 3".to_string(),
    };
    let json = serde_json::to_value(&rotate).unwrap();
    assert_eq!(json["type"], "rotate");
    assert_eq!(json["direction"], "right");
    assert_eq!(json["links_removed"][0], "0-1");
    assert_eq!(json["links_added"][0], "1-0");

    let back: Instruction = serde_json::from_value(json).unwrap();
    assert_eq!(back, rotate);
}

#[test]
fn explanation_and_kind_cover_every_variant() {
    let found = Instruction::ValueFound {
        id: NodeId(0),
        explanation: "3 found, nothing added".to_string(),
    };
    assert_eq!(found.explanation(), "3 found, nothing added");
    assert_eq!(found.kind(), "value_found");
    assert!(!found.is_rotation());
}
