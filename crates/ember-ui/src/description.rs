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

//! Builds a [`WidgetTree`] from an XML description.
//!
//! The document element is a container (its tag is not interpreted). Each of
//! its element children is a top-level widget; nested elements are either
//! child widgets or, when named after an interaction state, that state's
//! property overrides:
//!
//! ```xml
//! <UI>
//!   <Window Name="Menu" Offset="100,100" Padding="8,8" BorderWidth="2">
//!     <Button Name="Play" Offset="0,40" Size="200,32" Text="Play" OnClick="StartGame">
//!       <Highlighted BackgroundColor="0xFFFF00FF"/>
//!     </Button>
//!   </Window>
//! </UI>
//! ```

use std::any::Any;
use std::fmt::Display;

use ember_core::math::{parse_scalar, Rgba, Vec2};
use ember_core::renderer::TextureProvider;
use roxmltree::Node;

use crate::bounds::DockType;
use crate::error::UiError;
use crate::properties::names;
use crate::state::WidgetState;
use crate::tree::WidgetTree;
use crate::widget::{Widget, WidgetId, WidgetKind};

/// Parses `text` into a fresh tree laid out on `canvas`.
///
/// Any error aborts the whole build; the caller never sees a partial tree.
pub fn build_tree(
    text: &str,
    canvas: Vec2,
    textures: &mut dyn TextureProvider,
) -> Result<WidgetTree, UiError> {
    let document = roxmltree::Document::parse(text)?;
    let mut tree = WidgetTree::new(canvas);
    for node in document.root_element().children().filter(Node::is_element) {
        build_widget(node, &mut tree, None, textures)?;
    }
    log::debug!("Built {} widgets from UI description.", tree.len());
    Ok(tree)
}

fn position(node: Node<'_, '_>) -> String {
    node.document().text_pos_at(node.range().start).to_string()
}

fn build_widget(
    node: Node<'_, '_>,
    tree: &mut WidgetTree,
    parent: Option<WidgetId>,
    textures: &mut dyn TextureProvider,
) -> Result<WidgetId, UiError> {
    let tag = node.tag_name().name();
    let kind = WidgetKind::from_tag(tag).ok_or_else(|| UiError::UnknownWidgetTag {
        tag: tag.to_string(),
        position: position(node),
    })?;

    let mut widget = Widget::new(kind);
    apply_attributes(node, &mut widget, None, textures)?;
    for child in node.children().filter(Node::is_element) {
        if let Some(state) = WidgetState::from_tag(child.tag_name().name()) {
            apply_attributes(child, &mut widget, Some(state), textures)?;
        }
    }

    let id = match parent {
        Some(parent) => tree.add_child(parent, widget)?,
        None => tree.add_root(widget),
    };

    for child in node.children().filter(Node::is_element) {
        if WidgetState::from_tag(child.tag_name().name()).is_none() {
            build_widget(child, tree, Some(id), textures)?;
        }
    }
    Ok(id)
}

fn set_layer<T: Any + Send + Sync>(
    widget: &mut Widget,
    state: Option<WidgetState>,
    name: &str,
    value: T,
) {
    let _ = match state {
        Some(state) => widget.set_state_property(state, name, value),
        None => widget.set_property(name, value),
    };
}

fn offset_in_layer(widget: &Widget, state: Option<WidgetState>) -> Vec2 {
    let properties = widget.properties();
    state
        .and_then(|s| properties.overrides_for(s))
        .filter(|bag| bag.contains(names::OFFSET))
        .unwrap_or(properties.all_states())
        .get::<Vec2>(names::OFFSET)
        .unwrap_or(Vec2::ZERO)
}

fn apply_attributes(
    node: Node<'_, '_>,
    widget: &mut Widget,
    state: Option<WidgetState>,
    textures: &mut dyn TextureProvider,
) -> Result<(), UiError> {
    let tag = node.tag_name().name();
    let mut axis_offsets: (Option<f32>, Option<f32>) = (None, None);

    for attribute in node.attributes() {
        let (key, raw) = (attribute.name(), attribute.value());
        let malformed = |reason: &dyn Display| UiError::MalformedAttribute {
            tag: tag.to_string(),
            attribute: key.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        match key {
            names::NAME | names::TEXT | names::ON_CLICK => {
                set_layer(widget, state, key, raw.to_string());
            }
            names::OFFSET | names::SIZE | names::MIN_SIZE | names::PADDING | names::MARGIN => {
                let value = Vec2::parse(raw).map_err(|e| malformed(&e))?;
                set_layer(widget, state, key, value);
            }
            "HorizontalOffset" => {
                axis_offsets.0 = Some(parse_scalar(raw).map_err(|e| malformed(&e))?);
            }
            "VerticalOffset" => {
                axis_offsets.1 = Some(parse_scalar(raw).map_err(|e| malformed(&e))?);
            }
            names::BACKGROUND_COLOR | names::BORDER_COLOR | names::TEXT_COLOR => {
                let value = Rgba::parse(raw).map_err(|e| malformed(&e))?;
                set_layer(widget, state, key, value);
            }
            names::BORDER_WIDTH | names::OPACITY | names::SCALE | names::FONT_SIZE => {
                let value = parse_scalar(raw).map_err(|e| malformed(&e))?;
                set_layer(widget, state, key, value);
            }
            names::CHECKED => {
                let value = raw.trim().parse::<bool>().map_err(|e| malformed(&e))?;
                set_layer(widget, state, key, value);
            }
            names::DOCK => {
                let dock = DockType::parse(raw).unwrap_or_else(|| {
                    log::warn!(
                        "Unknown dock keyword '{raw}' on <{tag}> at {}, using None.",
                        position(node)
                    );
                    DockType::None
                });
                set_layer(widget, state, key, dock);
            }
            names::TEXTURE => {
                set_layer(widget, state, key, raw.to_string());
                if state.is_none() {
                    widget.set_texture(Some(textures.texture(raw)));
                }
            }
            names::MATERIAL => {
                set_layer(widget, state, key, raw.to_string());
                if state.is_none() {
                    widget.set_material(Some(textures.material(raw)));
                }
            }
            _ => log::trace!("Ignoring attribute '{key}' on <{tag}>."),
        }
    }

    // Axis offsets refine `Offset` whatever order the attributes came in.
    if let (None, None) = axis_offsets {
        return Ok(());
    }
    let mut offset = offset_in_layer(widget, state);
    offset.x = axis_offsets.0.unwrap_or(offset.x);
    offset.y = axis_offsets.1.unwrap_or(offset.y);
    set_layer(widget, state, names::OFFSET, offset);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::math::Aabb2;
    use ember_core::renderer::PathTextureProvider;

    const CANVAS: Vec2 = Vec2::new(1600.0, 900.0);

    fn build(text: &str) -> Result<WidgetTree, UiError> {
        build_tree(text, CANVAS, &mut PathTextureProvider::new())
    }

    #[test]
    fn nested_nodes_become_children() {
        let tree = build(
            r#"<UI>
                 <Window Name="Menu" Offset="100,50">
                   <Button Name="Play" Offset="10,10" Size="20,20"/>
                   <Label Name="Title" Text="Hi" FontSize="10"/>
                 </Window>
                 <Button Name="Quit"/>
               </UI>"#,
        )
        .unwrap();

        assert_eq!(tree.roots().len(), 2);
        let menu = tree.find_by_name("Menu").unwrap();
        let play = tree.find_by_name("Play").unwrap();
        assert_eq!(tree.get(play).unwrap().parent(), Some(menu));
        assert_eq!(tree.get(menu).unwrap().children().len(), 2);
        assert_eq!(
            tree.get(play).unwrap().bounds().final_bounds,
            Aabb2::new(Vec2::new(110.0, 60.0), Vec2::new(130.0, 80.0))
        );
    }

    #[test]
    fn attributes_are_coerced() {
        let tree = build(
            r#"<UI><Checkbox Name="Sound" BackgroundColor="0,0,255" BorderColor="0xFF0000FF"
                 BorderWidth="2.5" Opacity="0.5" Checked="true" Dock="left" Texture="ui/box.png"/></UI>"#,
        )
        .unwrap();
        let w = tree.get(tree.find_by_name("Sound").unwrap()).unwrap();

        assert_eq!(w.property::<Rgba>(names::BACKGROUND_COLOR), Rgba::BLUE);
        assert_eq!(w.property::<Rgba>(names::BORDER_COLOR), Rgba::RED);
        assert_eq!(w.property::<f32>(names::BORDER_WIDTH), 2.5);
        assert_eq!(w.property::<f32>(names::OPACITY), 0.5);
        assert!(w.is_checked());
        assert_eq!(w.property::<DockType>(names::DOCK), DockType::Left);
        assert_eq!(w.texture().map(|t| t.path()), Some("ui/box.png"));
    }

    #[test]
    fn axis_offsets_merge_into_offset() {
        let tree = build(r#"<UI><Window Name="W" Offset="1,2" VerticalOffset="7"/></UI>"#).unwrap();
        let w = tree.get(tree.find_by_name("W").unwrap()).unwrap();
        assert_eq!(w.property::<Vec2>(names::OFFSET), Vec2::new(1.0, 7.0));
    }

    #[test]
    fn axis_offsets_win_regardless_of_attribute_order() {
        let tree = build(
            r#"<UI>
                 <Window Name="A" VerticalOffset="7" Offset="1,2"/>
                 <Window Name="B" HorizontalOffset="9" Offset="1,2" VerticalOffset="3"/>
               </UI>"#,
        )
        .unwrap();
        let offset = |name: &str| {
            tree.get(tree.find_by_name(name).unwrap())
                .unwrap()
                .property::<Vec2>(names::OFFSET)
        };
        assert_eq!(offset("A"), Vec2::new(1.0, 7.0));
        assert_eq!(offset("B"), Vec2::new(9.0, 3.0));
    }

    #[test]
    fn non_finite_numbers_fail_the_build() {
        for attribute in [r#"Opacity="NaN""#, r#"Size="inf,4""#, r#"BorderColor="0x+FFFFFFF""#] {
            let text = format!("<UI><Window {attribute}/></UI>");
            assert!(
                matches!(build(&text), Err(UiError::MalformedAttribute { .. })),
                "{attribute} should be rejected"
            );
        }
    }

    #[test]
    fn state_elements_fill_overrides() {
        let tree = build(
            r#"<UI><Button Name="B"><Disabled BackgroundColor="0x808080FF"/></Button></UI>"#,
        )
        .unwrap();
        let w = tree.get(tree.find_by_name("B").unwrap()).unwrap();
        assert!(w.children().is_empty());
        assert!(w
            .properties()
            .overrides_for(WidgetState::Disabled)
            .is_some_and(|bag| bag.contains(names::BACKGROUND_COLOR)));
    }

    #[test]
    fn unknown_tag_fails_the_build() {
        let err = build(r#"<UI><Window><Slider/></Window></UI>"#).err();
        assert!(matches!(err, Some(UiError::UnknownWidgetTag { ref tag, .. }) if tag == "Slider"));
    }

    #[test]
    fn malformed_value_fails_the_build() {
        let err = build(r#"<UI><Window Size="ten,4"/></UI>"#).err();
        assert!(matches!(
            err,
            Some(UiError::MalformedAttribute { ref attribute, .. }) if attribute == "Size"
        ));
    }

    #[test]
    fn bad_dock_and_unknown_attributes_are_tolerated() {
        let tree = build(r#"<UI><Window Name="W" Dock="sideways" Tooltip="x"/></UI>"#).unwrap();
        let w = tree.get(tree.find_by_name("W").unwrap()).unwrap();
        assert_eq!(w.property::<DockType>(names::DOCK), DockType::None);
    }

    #[test]
    fn broken_xml_is_reported() {
        assert!(matches!(build("<UI><Window></UI>"), Err(UiError::Xml(_))));
    }
}
