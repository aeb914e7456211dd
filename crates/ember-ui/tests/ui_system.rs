// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the UI system.
//!
//! Frames are scripted through `InputState`; draw calls are captured by a
//! `RecordingRenderer` and click events are read back from an `EventBus`.

use ember_core::input::{InputEvent, InputState, MouseButton};
use ember_core::math::{Aabb2, Rgba, Vec2};
use ember_core::renderer::{
    DrawCommand, MaterialHandle, PathTextureProvider, RecordingRenderer, TextureHandle,
};
use ember_core::EventBus;
use ember_ui::{names, UiConfig, UiError, UiEvent, UiSystem, WidgetKind, WidgetState};

const CANVAS_HEIGHT: f32 = 900.0;

/// Helper: a system wired to a fresh event bus.
fn system_with(config: UiConfig) -> (UiSystem, EventBus<UiEvent>) {
    let bus = EventBus::new();
    let ui = UiSystem::new(config, bus.sender(), Box::new(PathTextureProvider::new()));
    (ui, bus)
}

fn system() -> (UiSystem, EventBus<UiEvent>) {
    system_with(UiConfig::default())
}

/// Helper: moves the cursor to a canvas position (window y is flipped).
fn move_to(input: &mut InputState, x: f32, y: f32) {
    input.apply(&InputEvent::MouseMoved {
        x,
        y: CANVAS_HEIGHT - y,
    });
}

fn press(input: &mut InputState) {
    input.apply(&InputEvent::MouseButtonPressed {
        button: MouseButton::Left,
    });
}

fn release(input: &mut InputState) {
    input.apply(&InputEvent::MouseButtonReleased {
        button: MouseButton::Left,
    });
}

fn aabb(x0: f32, y0: f32, x1: f32, y1: f32) -> Aabb2 {
    Aabb2::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
}

const MENU: &str = r#"
<UI>
  <Window Name="Menu" Offset="100,100">
    <Button Name="Play" Size="100,50" OnClick="StartGame">
      <Highlighted BackgroundColor="0xFFFF00FF"/>
    </Button>
  </Window>
</UI>"#;

// ───────────────────────────── hit-testing and bounds ─────────────────────────────

#[test]
fn later_added_overlapping_child_wins_hit_test() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    let root = ui.add_widget(UiSystem::create_widget(WidgetKind::Window));

    let mut a = UiSystem::create_widget(WidgetKind::Window);
    let _ = a.set_property(names::SIZE, Vec2::new(50.0, 50.0));
    let child_a = ui.add_child(root, a).unwrap();

    let mut b = UiSystem::create_widget(WidgetKind::Window);
    let _ = b.set_property(names::OFFSET, Vec2::new(10.0, 10.0));
    let _ = b.set_property(names::SIZE, Vec2::new(50.0, 50.0));
    let child_b = ui.add_child(root, b).unwrap();

    // --- ACT & ASSERT ---
    assert_eq!(ui.tree().hit_test(Vec2::new(20.0, 20.0)), Some(child_b));
    assert_eq!(ui.tree().hit_test(Vec2::new(5.0, 5.0)), Some(child_a));
    assert_eq!(ui.tree().hit_test(Vec2::new(500.0, 500.0)), None);
}

#[test]
fn border_padding_and_margin_grow_child_derived_content() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    let mut parent = UiSystem::create_widget(WidgetKind::Window);
    let _ = parent.set_property(names::BORDER_WIDTH, 5.0f32);
    let _ = parent.set_property(names::PADDING, Vec2::new(2.0, 2.0));
    let _ = parent.set_property(names::MARGIN, Vec2::new(1.0, 1.0));
    let parent = ui.add_widget(parent);

    let mut child = UiSystem::create_widget(WidgetKind::Window);
    let _ = child.set_property(names::SIZE, Vec2::new(10.0, 10.0));

    // --- ACT ---
    ui.add_child(parent, child).unwrap();

    // --- ASSERT ---
    let bounds = ui.widget(parent).unwrap().bounds();
    assert_eq!(bounds.content, aabb(0.0, 0.0, 10.0, 10.0));
    assert_eq!(bounds.borderless, aabb(-2.0, -2.0, 12.0, 12.0));
    assert_eq!(bounds.bordered, aabb(-7.0, -7.0, 17.0, 17.0));
    assert_eq!(bounds.final_bounds, aabb(-8.0, -8.0, 18.0, 18.0));
}

// ───────────────────────────── interaction state machine ─────────────────────────────

#[test]
fn hover_press_release_fires_click_and_returns_to_highlighted() {
    // --- ARRANGE ---
    let (mut ui, bus) = system();
    ui.load_from_str(MENU).unwrap();
    let play = ui.find_widget("Play").unwrap();
    let mut input = InputState::new();

    // --- ACT & ASSERT ---
    move_to(&mut input, 150.0, 125.0);
    ui.update(&input);
    input.advance_frame();
    assert_eq!(ui.highlighted(), Some(play));
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Highlighted);
    assert_eq!(
        ui.widget(play).unwrap().property::<Rgba>(names::BACKGROUND_COLOR),
        Rgba::YELLOW
    );

    press(&mut input);
    ui.update(&input);
    input.advance_frame();
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Pressed);
    assert_eq!(bus.pending(), 0, "No click before release");

    release(&mut input);
    ui.update(&input);
    input.advance_frame();
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Highlighted);

    let events = bus.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "StartGame");
    assert_eq!(events[0].widget_name().as_deref(), Some("Play"));
    assert_eq!(events[0].checked(), None);

    move_to(&mut input, 10.0, 10.0);
    ui.update(&input);
    assert_eq!(ui.highlighted(), None);
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Active);
}

#[test]
fn checkbox_click_toggles_and_reports_value() {
    // --- ARRANGE ---
    let (mut ui, bus) = system();
    ui.load_from_str(r#"<UI><Checkbox Name="Sound" OnClick="ToggleSound"/></UI>"#)
        .unwrap();
    let sound = ui.find_widget("Sound").unwrap();
    let mut input = InputState::new();
    move_to(&mut input, 12.0, 12.0);

    // --- ACT ---
    press(&mut input);
    release(&mut input);
    ui.update(&input);

    // --- ASSERT ---
    assert!(ui.widget(sound).unwrap().is_checked());
    let events = bus.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].checked(), Some(true));
}

#[test]
fn disabled_widget_is_neither_highlighted_nor_clicked() {
    // --- ARRANGE ---
    let (mut ui, bus) = system();
    ui.load_from_str(MENU).unwrap();
    assert!(ui.set_widget_enabled("Play", false));
    let play = ui.find_widget("Play").unwrap();
    let mut input = InputState::new();
    move_to(&mut input, 150.0, 125.0);

    // --- ACT ---
    ui.update(&input);
    press(&mut input);
    release(&mut input);
    ui.update(&input);

    // --- ASSERT ---
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Disabled);
    assert_eq!(bus.pending(), 0);
}

#[test]
fn removing_the_highlighted_widget_clears_the_highlight() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    ui.load_from_str(MENU).unwrap();
    let menu = ui.find_widget("Menu").unwrap();
    let mut input = InputState::new();
    move_to(&mut input, 150.0, 125.0);
    ui.update(&input);
    assert!(ui.highlighted().is_some());

    // --- ACT ---
    let removed = ui.remove_widget(menu).unwrap();

    // --- ASSERT ---
    assert_eq!(removed, 2);
    assert_eq!(ui.highlighted(), None);
    assert!(ui.tree().is_empty());
    ui.update(&input);
    assert_eq!(ui.highlighted(), None);
}

// ───────────────────────────── visibility ─────────────────────────────

#[test]
fn hiding_a_parent_hides_every_descendant() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    ui.load_from_str(MENU).unwrap();
    let menu = ui.find_widget("Menu").unwrap();
    let play = ui.find_widget("Play").unwrap();

    // --- ACT ---
    assert!(ui.set_widget_visibility("Menu", true));

    // --- ASSERT ---
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Hidden);
    assert_eq!(ui.tree().hit_test(Vec2::new(150.0, 125.0)), None);

    // A child added after the hide keeps its own state but is still invisible.
    let late = ui
        .add_child(menu, UiSystem::create_widget(WidgetKind::Label))
        .unwrap();
    assert_eq!(ui.widget(late).unwrap().state(), WidgetState::Active);
    assert!(ui.tree().is_effectively_hidden(late));

    let mut renderer = RecordingRenderer::new();
    assert_eq!(ui.render(&mut renderer), 0);

    assert!(ui.set_widget_visibility("Menu", false));
    assert_eq!(ui.widget(play).unwrap().state(), WidgetState::Active);
    assert!(!ui.set_widget_visibility("Nope", true));
}

// ───────────────────────────── rendering ─────────────────────────────

#[test]
fn render_inherits_opacity_and_brackets_with_ortho() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    ui.load_from_str(
        r#"<UI>
             <Window BackgroundColor="255,0,0" Opacity="0.5">
               <Label Offset="10,10" Text="Hi"/>
             </Window>
           </UI>"#,
    )
    .unwrap();
    let mut renderer = RecordingRenderer::new();

    // --- ACT ---
    let draws = ui.render(&mut renderer);

    // --- ASSERT ---
    assert_eq!(draws, 2);
    assert!(renderer.is_balanced());
    assert_eq!(
        renderer.commands(),
        &[
            DrawCommand::BeginOrtho {
                bottom_left: Vec2::ZERO,
                top_right: Vec2::new(1600.0, 900.0),
            },
            DrawCommand::Aabb {
                bounds: aabb(10.0, 10.0, 34.0, 34.0),
                color: Rgba::new(1.0, 0.0, 0.0, 0.5),
                material: MaterialHandle::new(RecordingRenderer::DEFAULT_MATERIAL_PATH),
            },
            DrawCommand::Text {
                position: Vec2::new(10.0, 10.0),
                text: "Hi".to_string(),
                scale: 24.0,
                color: Rgba::new(0.0, 0.0, 0.0, 0.5),
            },
            DrawCommand::EndOrtho,
        ]
    );
}

/// Helper: the boxes of every untextured fill, in draw order.
fn drawn_boxes(renderer: &RecordingRenderer) -> Vec<Aabb2> {
    renderer
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Aabb { bounds, .. } => Some(*bounds),
            _ => None,
        })
        .collect()
}

#[test]
fn scale_shrinks_the_subtree_about_the_scaled_widget() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    ui.load_from_str(
        r#"<UI>
             <Window Scale="0.5" BackgroundColor="255,0,0">
               <Window Size="10,10"/>
               <Window Offset="90,90" Size="10,10"/>
             </Window>
           </UI>"#,
    )
    .unwrap();
    let mut renderer = RecordingRenderer::new();

    // --- ACT ---
    ui.render(&mut renderer);

    // --- ASSERT ---
    let boxes = drawn_boxes(&renderer);
    assert_eq!(
        boxes,
        vec![
            aabb(25.0, 25.0, 75.0, 75.0),
            aabb(25.0, 25.0, 30.0, 30.0),
            aabb(70.0, 70.0, 75.0, 75.0),
        ]
    );
    let parent = boxes[0];
    for child in &boxes[1..] {
        assert!(
            parent.is_point_on_or_inside(child.min) && parent.is_point_on_or_inside(child.max),
            "{child:?} escapes {parent:?}"
        );
    }
}

#[test]
fn material_attribute_reaches_the_renderer() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    ui.load_from_str(
        r#"<UI>
             <Window Size="20,20" Material="shaders/ui.glsl"/>
             <Window Offset="30,0" Size="20,20"/>
           </UI>"#,
    )
    .unwrap();
    let mut renderer = RecordingRenderer::new();

    // --- ACT ---
    ui.render(&mut renderer);

    // --- ASSERT ---
    let materials: Vec<&MaterialHandle> = renderer
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Aabb { material, .. } => Some(material),
            _ => None,
        })
        .collect();
    assert_eq!(
        materials,
        vec![
            &MaterialHandle::new("shaders/ui.glsl"),
            &MaterialHandle::new(RecordingRenderer::DEFAULT_MATERIAL_PATH),
        ]
    );
}

#[test]
fn widget_texture_is_drawn_as_a_textured_fill() {
    // --- ARRANGE ---
    let (mut ui, _bus) = system();
    let mut panel = UiSystem::create_widget_from_tag("Window").unwrap();
    let _ = panel.set_property(names::SIZE, Vec2::new(40.0, 20.0));
    let id = ui.add_widget(panel);

    // --- ACT ---
    ui.set_widget_texture(id, "ui/panel.png").unwrap();
    let mut renderer = RecordingRenderer::new();
    let draws = ui.render(&mut renderer);

    // --- ASSERT ---
    assert_eq!(draws, 1);
    assert!(matches!(
        &renderer.commands()[1],
        DrawCommand::TexturedAabb { bounds, texture, .. }
            if *bounds == aabb(0.0, 0.0, 40.0, 20.0)
                && *texture == TextureHandle::new("ui/panel.png")
    ));
    assert_eq!(
        ui.widget(id).unwrap().property::<String>(names::TEXTURE),
        "ui/panel.png"
    );

    ui.remove_widget(id).unwrap();
    assert!(matches!(
        ui.set_widget_texture(id, "ui/panel.png"),
        Err(UiError::UnknownWidget(_))
    ));
}

#[test]
fn widgets_are_created_from_description_tags() {
    let button = UiSystem::create_widget_from_tag("Button").unwrap();
    assert_eq!(button.kind(), WidgetKind::Button);
    assert!(matches!(
        UiSystem::create_widget_from_tag("Slider"),
        Err(UiError::UnknownWidgetTag { tag, .. }) if tag == "Slider"
    ));
}

// ───────────────────────────── loading ─────────────────────────────

#[test]
fn reload_hotkey_rebuilds_and_failed_reload_keeps_tree() {
    // --- ARRANGE ---
    let path = std::env::temp_dir().join(format!("ember-ui-reload-{}.xml", std::process::id()));
    std::fs::write(&path, MENU).unwrap();
    let config = UiConfig {
        description_path: path.clone(),
        ..UiConfig::default()
    };
    let (mut ui, _bus) = system_with(config);
    let mut input = InputState::new();
    let key = |code: &str| InputEvent::KeyPressed {
        key_code: code.to_string(),
    };

    // --- ACT ---
    input.apply(&key("KeyU"));
    ui.update(&input);
    input.advance_frame();

    // --- ASSERT ---
    assert_eq!(ui.tree().len(), 2);

    std::fs::write(&path, r#"<UI><Spinner/></UI>"#).unwrap();
    input.apply(&InputEvent::KeyReleased {
        key_code: "KeyU".to_string(),
    });
    input.apply(&key("KeyU"));
    ui.update(&input);
    assert_eq!(ui.tree().len(), 2, "Failed reload must keep the old tree");
    assert!(ui.find_widget("Play").is_some());

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(ui.reload(), Err(UiError::Io { .. })));
}

#[test]
fn teardown_empties_the_tree() {
    let (mut ui, _bus) = system();
    ui.load_from_str(MENU).unwrap();
    ui.teardown();
    assert!(ui.tree().is_empty());
    assert!(ui.tree().roots().is_empty());
}
