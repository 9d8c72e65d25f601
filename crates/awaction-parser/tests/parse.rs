use awaction_core::{
    action::ActionMap,
    color::Rgb,
    command::{Command, CommandKind, Value},
    geometry::{Altitude, Vector3, WorldCoordinates},
    trigger::Trigger,
};
use awaction_parser::{ActionParser, RawAction, merge_actions};
use float_cmp::assert_approx_eq;

fn create(source: &str) -> Vec<Command> {
    let actions = ActionParser::new().parse(source);
    actions
        .get(Trigger::Create)
        .unwrap_or_else(|| panic!("no create action in `{source}`"))
        .to_vec()
}

fn only(source: &str) -> Command {
    let mut commands = create(source);
    assert_eq!(commands.len(), 1, "expected one command for `{source}`");
    commands.remove(0)
}

/// Feed a merged map back through the merge layer.
fn remerge(actions: ActionMap) -> ActionMap {
    merge_actions(
        actions
            .into_iter()
            .map(|(trigger, commands)| {
                RawAction::new(trigger, commands.into_iter().map(Some).collect())
            }),
    )
}

#[test]
fn test_reference_scenario() {
    let actions = ActionParser::new().parse("create texture derp.jpg tag=0, texture derp2.jpg tag=1");

    assert_eq!(
        serde_json::to_value(&actions).unwrap(),
        serde_json::json!({
            "create": [
                { "commandType": "texture", "texture": "derp.jpg", "tag": 0 },
                { "commandType": "texture", "texture": "derp2.jpg", "tag": 1 },
            ]
        })
    );
}

#[test]
fn test_trigger_case_insensitivity() {
    let parser = ActionParser::new();
    assert_eq!(
        parser.parse("CREATE texture a.jpg"),
        parser.parse("create texture a.jpg")
    );
}

#[test]
fn test_first_trigger_wins() {
    let commands = create("create texture a.jpg; create texture b.jpg");
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].get("texture"), Some(&Value::from("a.jpg")));
}

#[test]
fn test_last_command_wins_per_tag() {
    let commands = create("create texture a.jpg tag=0, texture b.jpg tag=0");
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].get("texture"), Some(&Value::from("b.jpg")));

    let commands = create("create texture a.jpg tag=0, texture b.jpg tag=1");
    assert_eq!(commands.len(), 2);
}

#[test]
fn test_last_command_wins_per_target() {
    let commands = create("create color red name=a, color blue name=b, color green name=a");
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].get("color"), Some(&Value::Color(Rgb::new(0, 255, 0))));
    assert_eq!(commands[0].target_name(), Some("a"));
    assert_eq!(commands[1].target_name(), Some("b"));
}

#[test]
fn test_duplicate_field_drops_only_that_command() {
    let actions = ActionParser::new().parse("create move time=1 time=2, examine");
    let commands = actions.get(Trigger::Create).unwrap();
    assert_eq!(commands, [Command::new(CommandKind::Examine)]);

    assert!(ActionParser::new().parse("create move time=1 time=2").is_empty());
}

#[test]
fn test_move_distance_defaulting() {
    let distance = |source: &str| only(source).get("distance").and_then(Value::as_vector);
    assert_eq!(distance("create move 5"), Some(Vector3::new(0.0, 5.0, 0.0)));
    assert_eq!(distance("create move 5 6"), Some(Vector3::new(5.0, 6.0, 0.0)));
    assert_eq!(distance("create move 5 6 7"), Some(Vector3::new(5.0, 6.0, 7.0)));
    assert_eq!(distance("create move 5 6 7 8"), Some(Vector3::ZERO));
}

#[test]
fn test_rotate_speed() {
    let command = only("create rotate 0 -10 0 nosync");
    assert_eq!(
        command.get("speed").and_then(Value::as_vector),
        Some(Vector3::new(0.0, -10.0, 0.0))
    );
    assert_eq!(command.get("sync"), Some(&Value::Bool(false)));
}

#[test]
fn test_scale_floor_clamp() {
    let command = only("create scale 0.01");
    assert_eq!(
        command.get("factor").and_then(Value::as_vector),
        Some(Vector3::splat(0.1))
    );
    assert_eq!(
        only("create scale 2 3").get("factor").and_then(Value::as_vector),
        Some(Vector3::new(2.0, 3.0, 1.0))
    );
}

#[test]
fn test_color_resolution() {
    let color = |source: &str| only(source).get("color").and_then(Value::as_color);
    assert_eq!(color("create color red"), Some(Rgb::new(255, 0, 0)));
    assert_eq!(color("create color ff0000"), Some(Rgb::new(255, 0, 0)));
    assert_eq!(color("create color zzz"), Some(Rgb::from_string_hash("zzz")));
}

#[test]
fn test_zero_argument_allow_list() {
    let parser = ActionParser::new();

    let actions = parser.parse("activate examine");
    assert_eq!(
        actions.get(Trigger::Activate),
        Some(&[Command::new(CommandKind::Examine)][..])
    );

    assert!(parser.parse("activate solid").is_empty());
    assert!(parser.debug("activate solid").is_empty());
}

#[test]
fn test_garbage_command_does_not_abort() {
    let commands = create("create texture a.jpg, ~~~garbage~~~ !!, color red");
    let types: Vec<_> = commands.iter().map(Command::command_type).collect();
    assert_eq!(types, ["texture", "color"]);
}

#[test]
fn test_merge_is_idempotent() {
    let actions = ActionParser::new().parse(
        "create texture a.jpg, texture b.jpg tag=2, name door; bump move 1 2; activate examine",
    );
    assert_eq!(remerge(actions.clone()), actions);
}

#[test]
fn test_rejected_string_is_empty_and_explained() {
    let parser = ActionParser::new();
    assert!(parser.parse("create examine ^^").is_empty());
    assert_eq!(
        parser.debug("create examine ^^"),
        "Line 1, col 16:\n> 1 | create examine ^^\n                     ^\nExpected \",\", \";\", or end of input"
    );
    assert_eq!(parser.debug("create examine"), "");

    let err = parser.try_parse("create examine ^^").unwrap_err();
    assert_eq!(err.diagnostic().column(), 16);
}

#[test]
fn test_unwanted_chars_are_stripped() {
    let parser = ActionParser::new();
    assert_eq!(
        parser.parse("create\u{7f} texture\u{80} a.jpg"),
        parser.parse("create texture a.jpg")
    );
}

#[test]
fn test_resource_fields_are_named_after_command() {
    let parser = ActionParser::new();
    let actions = parser.parse(
        "create sound ambient.wav, noise boom.wav overlap, picture http://x/p.jpg update=30, \
         media http://x/m.mp3 radius=20, url http://example.com target=aw_3d, corona glow.png size=2",
    );
    let commands = actions.get(Trigger::Create).unwrap();

    assert_eq!(commands[0].get("sound"), Some(&Value::from("ambient.wav")));
    assert_eq!(commands[1].get("noise"), Some(&Value::from("boom.wav")));
    assert_eq!(commands[1].get("overlap"), Some(&Value::Bool(true)));
    assert_eq!(commands[2].get("picture"), Some(&Value::from("http://x/p.jpg")));
    assert_eq!(commands[2].get("update"), Some(&Value::Integer(30)));
    assert_eq!(commands[3].get("media"), Some(&Value::from("http://x/m.mp3")));
    assert_eq!(commands[4].get("url"), Some(&Value::from("http://example.com")));
    assert_eq!(commands[4].get("target"), Some(&Value::from("aw_3d")));
    assert_eq!(commands[5].get("corona"), Some(&Value::from("glow.png")));
}

#[test]
fn test_light_command() {
    let command = only("create light type=SPOT color=blue brightness=0.8 radius=10 fx=Blink name=Lamp");
    assert_eq!(command.get("type"), Some(&Value::from("spot")));
    assert_eq!(command.get("color"), Some(&Value::Color(Rgb::new(0, 0, 255))));
    assert_approx_eq!(f64, command.get("brightness").and_then(Value::as_float).unwrap(), 0.8);
    assert_eq!(command.get("fx"), Some(&Value::from("blink")));
    assert_eq!(command.target_name(), Some("lamp"));
}

#[test]
fn test_opacity_and_intensity_are_clamped() {
    let commands = create("create opacity 1.5, ambient -0.5, diffuse 0.25 tag=4");
    assert_approx_eq!(f64, commands[0].get("value").and_then(Value::as_float).unwrap(), 1.0);
    assert_approx_eq!(f64, commands[1].get("intensity").and_then(Value::as_float).unwrap(), 0.0);
    assert_approx_eq!(f64, commands[2].get("intensity").and_then(Value::as_float).unwrap(), 0.25);
    assert_eq!(commands[2].tag(), Some(4));
}

#[test]
fn test_visible_and_solid() {
    let commands = create("create visible no, solid yes door");
    assert_eq!(commands[0].get("value"), Some(&Value::Bool(false)));
    assert_eq!(commands[1].get("value"), Some(&Value::Bool(true)));
    assert_eq!(commands[1].target_name(), Some("door"));
}

#[test]
fn test_sign_and_say() {
    let commands = create(r#"create sign "Welcome, friend" color=white bcolor=black, say hello"#);
    assert_eq!(commands[0].get("text"), Some(&Value::from("Welcome, friend")));
    assert_eq!(commands[0].get("color"), Some(&Value::Color(Rgb::WHITE)));
    assert_eq!(commands[0].get("bcolor"), Some(&Value::Color(Rgb::new(0, 0, 0))));
    assert_eq!(commands[1].get("text"), Some(&Value::from("hello")));

    let bare = only("create sign");
    assert!(bare.is_empty());
}

#[test]
fn test_animate() {
    let command = only("create animate nomask me flame 4 4 80 1 2 3 4");
    assert_eq!(command.get("maskStatus"), Some(&Value::Bool(false)));
    assert_eq!(command.target_name(), Some("me"));
    assert_eq!(command.get("texture"), Some(&Value::from("flame")));
    assert_eq!(command.get("imageCount"), Some(&Value::Integer(4)));
    assert_eq!(command.get("frameDelay"), Some(&Value::Integer(80)));
    assert_eq!(
        command.get("frameList").and_then(Value::as_integers),
        Some(&[1, 2, 3, 4][..])
    );
}

#[test]
fn test_animate_arguments_in_any_order() {
    let leading = only("create animate mask tag=1 door flame");
    assert_eq!(leading.get("maskStatus"), Some(&Value::Bool(true)));
    assert_eq!(leading.tag(), Some(1));
    assert_eq!(leading.target_name(), Some("door"));
    assert_eq!(leading.get("texture"), Some(&Value::from("flame")));

    let trailing = only("create animate door flame mask");
    assert_eq!(trailing.get("maskStatus"), Some(&Value::Bool(true)));
    assert_eq!(trailing.get("texture"), Some(&Value::from("flame")));
    assert!(!trailing.contains("mask"));
}

#[test]
fn test_animate_repeated_mask_is_dropped() {
    let parser = ActionParser::new();
    let actions = parser.parse("create animate mask door flame nomask, examine");
    let create = actions.get(Trigger::Create).unwrap();
    assert_eq!(create.len(), 1);
    assert_eq!(create[0].command_type(), "examine");
}

#[test]
fn test_teleport_and_warp() {
    let commands = create("create teleport mars 10s 20.5e 5a 90; bump warp +1 -1 -2a");
    let teleport = &commands[0];
    assert_eq!(teleport.get("worldName"), Some(&Value::from("mars")));
    assert_eq!(
        teleport.get("coordinates").and_then(Value::as_coordinates),
        Some(WorldCoordinates::Absolute {
            north: -10.0,
            east: 20.5
        })
    );
    assert_eq!(
        teleport.get("altitude").and_then(Value::as_altitude),
        Some(Altitude::absolute(5.0))
    );
    assert_eq!(teleport.get("direction"), Some(&Value::Integer(90)));

    let actions = ActionParser::new().parse("bump warp +1 -1 -2a");
    let warp = &actions.get(Trigger::Bump).unwrap()[0];
    assert_eq!(
        warp.get("coordinates").and_then(Value::as_coordinates),
        Some(WorldCoordinates::Relative { x: 1.0, y: -1.0 })
    );
    assert_eq!(
        warp.get("altitude").and_then(Value::as_altitude),
        Some(Altitude::relative(-2.0))
    );
    assert!(!warp.contains("direction"));
}

#[test]
fn test_seq_and_end_trigger() {
    let actions = ActionParser::new().parse("end seq wave loop name=Dancer");
    let command = &actions.get(Trigger::End).unwrap()[0];
    assert_eq!(command.get("seq"), Some(&Value::from("wave")));
    assert_eq!(command.get("loop"), Some(&Value::Bool(true)));
    assert_eq!(command.target_name(), Some("dancer"));
}

#[test]
fn test_shared_parser_functions() {
    assert_eq!(
        awaction_parser::parse("create examine"),
        ActionParser::new().parse("create examine")
    );
    assert!(awaction_parser::debug("nonsense").starts_with("Line 1, col 1:"));
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn keywords_are_case_insensitive(
            trigger in "(create|bump|activate|adone)",
            command in "(texture|sound|picture|noise)",
            name in "[a-z]{1,8}",
        ) {
            let parser = ActionParser::new();
            let lower = format!("{trigger} {command} {name}.jpg");
            let upper = format!("{} {} {name}.jpg", trigger.to_uppercase(), command.to_uppercase());
            prop_assert_eq!(parser.parse(&upper), parser.parse(&lower));
        }

        #[test]
        fn merge_is_idempotent(
            names in proptest::collection::vec("[a-z]{1,6}", 1..6),
            tags in proptest::collection::vec(0u8..3, 1..6),
        ) {
            let source = names
                .iter()
                .zip(&tags)
                .map(|(name, tag)| format!("texture {name}.jpg tag={tag}"))
                .collect::<Vec<_>>()
                .join(", ");
            let actions = ActionParser::new().parse(&format!("create {source}"));
            prop_assert_eq!(remerge(actions.clone()), actions);
        }

        #[test]
        fn garbage_between_commands_never_aborts(garbage in "[a-z0-9 !?~^*]{0,20}") {
            let parser = ActionParser::new();
            let actions = parser.parse(&format!("create texture a.jpg, ~{garbage}, examine"));
            let create = actions.get(Trigger::Create).unwrap();
            prop_assert!(create.contains(&Command::new(CommandKind::Examine)));
        }

        #[test]
        fn arbitrary_input_never_panics(source in "\\PC{0,60}") {
            let parser = ActionParser::new();
            let map = parser.parse(&source);
            let rejected = parser.try_parse(&source).is_err();
            prop_assert_eq!(!parser.debug(&source).is_empty(), rejected);
            if rejected {
                prop_assert!(map.is_empty());
            }
        }
    }
}
