//! Integration tests driving a player over whole scripts
//!
//! These play scripts tick by tick the way the terminal player does and check
//! the frame the reveal engine produces after every tick.

use std::time::Duration;
use strata::playback::{DemoScript, Layer, Player, Tick, MAX_SPEED_MS, MIN_SPEED_MS};
use strata::reveal::{visible_text, Revealer};
use strata::TokenKind;

fn expected_final_text(script: &DemoScript) -> String {
    let mut text = String::new();
    for (index, layer) in script.layers.iter().enumerate() {
        text.push_str(&layer.code);
        let last = index + 1 == script.layers.len();
        if !last && !layer.code.ends_with('\n') {
            text.push('\n');
        }
    }
    text
}

#[test]
fn test_builtin_script_plays_to_completion() {
    let script = DemoScript::builtin().expect("built-in script is valid");
    let expected = expected_final_text(&script);
    let mut player = Player::new(script).unwrap();
    let mut revealer = Revealer::new();

    player.play();
    let mut previous_len = 0;
    loop {
        let tick = player.tick();
        let frame = player.frame(&mut revealer);
        let text = visible_text(&frame);

        // The frame is always the baseline plus the typed prefix
        let typed: String = player.fragment().chars().take(player.cursor()).collect();
        assert_eq!(text, format!("{}{}", player.baseline(), typed));

        match tick {
            Tick::Typed => assert_eq!(text.chars().count(), previous_len + 1),
            Tick::Advanced => assert_eq!(player.cursor(), 0),
            Tick::Finished => break,
            Tick::Idle => panic!("player paused itself"),
        }
        previous_len = text.chars().count();
    }

    let frame = player.frame(&mut revealer);
    assert_eq!(visible_text(&frame), expected);
    assert!(frame.iter().all(|t| !t.in_progress));
}

#[test]
fn test_markup_layer_is_highlighted_as_markup() {
    let script = DemoScript::new(
        MIN_SPEED_MS,
        vec![
            Layer::new("js", "let a;", "javascript"),
            Layer::new("page", "<b id=\"x\">", "html"),
        ],
    )
    .unwrap();
    let mut player = Player::new(script).unwrap();
    player.jump_to(1).unwrap();
    player.next();

    let frame = player.frame(&mut Revealer::new());
    let kinds: Vec<TokenKind> = frame.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            // Baseline, tokenized as script
            TokenKind::Keyword,
            TokenKind::Text,
            TokenKind::Text,
            TokenKind::Operator,
            TokenKind::Text,
            // Fragment, tokenized as markup
            TokenKind::Tag,
            TokenKind::Function,
            TokenKind::Text,
            TokenKind::Attribute,
            TokenKind::Operator,
            TokenKind::String,
            TokenKind::Tag,
        ]
    );
}

#[test]
fn test_delays_follow_script() {
    let script = DemoScript::new(
        40,
        vec![
            Layer::new("a", "x", "js").with_delay(Duration::from_millis(900)),
            Layer::new("b", "y", "js"),
        ],
    )
    .unwrap();
    let mut player = Player::new(script).unwrap();
    player.play();

    assert_eq!(player.next_delay(), Duration::from_millis(40));
    assert_eq!(player.tick(), Tick::Typed);
    assert_eq!(player.next_delay(), Duration::from_millis(900));
    assert_eq!(player.tick(), Tick::Advanced);
    assert_eq!(player.next_delay(), Duration::from_millis(40));
}

#[test]
fn test_speed_override_is_clamped() {
    let mut player = Player::new(DemoScript::builtin().unwrap()).unwrap();
    player.set_speed(0);
    assert_eq!(player.speed_ms(), MIN_SPEED_MS);
    player.set_speed(u64::MAX);
    assert_eq!(player.speed_ms(), MAX_SPEED_MS);
}

#[test]
fn test_script_from_yaml_file_contents() {
    let yaml = r#"
speed_ms: 20
layers:
  - id: first
    language: ts
    code: "const a = 1;"
  - id: second
    language: html
    delay_ms: 100
    description: Markup
    code: |
      <p>hi</p>
"#;
    let script = DemoScript::from_yaml_str(yaml).unwrap();
    assert_eq!(script.layers.len(), 2);
    assert_eq!(script.layers[1].code, "<p>hi</p>\n");
    assert_eq!(script.layers[1].delay, Duration::from_millis(100));
    assert_eq!(expected_final_text(&script), "const a = 1;\n<p>hi</p>\n");
}
