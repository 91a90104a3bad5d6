//! Integration tests for calculated styles, the property registry, and
//! configuration.

use std::rc::Rc;

use kestrel_css::{
    Axis, CalculatedStyle, ContainingBlock, PropertyName, Resolution, ResolverConfig,
    StyleContext, UnitType, ValueError,
};

fn assert_px(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "Expected {expected}px but got {actual}px"
    );
}

fn font_size(style: &CalculatedStyle) -> f64 {
    style
        .get(&PropertyName::FontSize)
        .unwrap()
        .as_float()
        .unwrap()
}

#[test]
fn test_root_seeds_default_font_size() {
    let root = CalculatedStyle::root(ResolverConfig::default());
    assert_px(font_size(&root), 16.0);
    assert!(root.parent().is_none());

    let config = ResolverConfig {
        default_font_size_px: 20.0,
        ..ResolverConfig::default()
    };
    assert_px(font_size(&CalculatedStyle::root(config)), 20.0);
}

#[test]
fn test_derive_resolves_against_parent() {
    let root = Rc::new(CalculatedStyle::root(ResolverConfig::default()));
    let mut child = CalculatedStyle::child_of(&root);

    let resolution = child.derive("font-size", "1.5em").unwrap();
    assert_eq!(resolution, Resolution::Resolved { px: 24.0 });
    assert_px(font_size(&child), 24.0);

    // Grandchildren compute against the child, not the root.
    let child = Rc::new(child);
    let mut grandchild = CalculatedStyle::child_of(&child);
    let _ = grandchild.derive("font-size", "50%").unwrap();
    assert_px(font_size(&grandchild), 12.0);
}

#[test]
fn test_derive_absolute_value_is_unchanged() {
    let mut root = CalculatedStyle::root(ResolverConfig::default());
    assert_eq!(
        root.derive("line-height", "20px").unwrap(),
        Resolution::Unchanged
    );
    assert_px(
        root.get(&PropertyName::LineHeight)
            .unwrap()
            .as_float()
            .unwrap(),
        20.0,
    );
}

#[test]
fn test_inherited_properties_fall_back_to_parent() {
    let mut root = CalculatedStyle::root(ResolverConfig::default());
    let _ = root.derive("line-height", "18px").unwrap();
    let _ = root.derive("top", "5px").unwrap();
    let root = Rc::new(root);
    let child = CalculatedStyle::child_of(&root);

    assert!(child.get(&PropertyName::LineHeight).is_some());
    assert_px(font_size(&child), 16.0);
    // `top` is not inherited.
    assert!(child.property_by_name(&PropertyName::Top).is_none());
}

#[test]
fn test_forced_inherit_shares_parent_value() {
    let mut root = CalculatedStyle::root(ResolverConfig::default());
    let _ = root.derive("color", "red").unwrap();
    let root = Rc::new(root);
    let mut child = CalculatedStyle::child_of(&root);

    let resolution = child.derive("color", "inherit").unwrap();
    assert_eq!(resolution, Resolution::Unchanged);

    let color = PropertyName::from_name("color");
    let inherited = child.get(&color).unwrap();
    let parent_value = root.get(&color).unwrap();
    assert!(inherited.css_value().ptr_eq(parent_value.css_value()));
    assert_eq!(inherited.css_text(), "red");
}

#[test]
fn test_forced_inherit_without_parent_value_keeps_keyword() {
    let mut root = CalculatedStyle::root(ResolverConfig::default());
    let _ = root.derive("cursor", "inherit").unwrap();
    let value = root.get(&PropertyName::from_name("cursor")).unwrap();
    assert_eq!(value.as_string().unwrap(), "inherit");
}

#[test]
fn test_pending_values_bind_to_containing_block() {
    let root = Rc::new(CalculatedStyle::root(ResolverConfig::default()));
    let mut style = CalculatedStyle::child_of(&root);

    let top = style.derive("top", "50%").unwrap();
    assert_eq!(
        top,
        Resolution::PendingLayout {
            property: PropertyName::Top,
            percentage: 50.0,
            axis: Axis::Height,
        }
    );
    let _ = style.derive("max-width", "20%").unwrap();
    let _ = style.derive("margin-top", "4px").unwrap();
    assert_eq!(style.pending().count(), 2);

    let bound = style
        .bind_containing_block(ContainingBlock {
            width: 1000.0,
            height: 300.0,
        })
        .unwrap();
    assert_eq!(bound, 2);
    assert_eq!(style.pending().count(), 0);

    let top = style.get(&PropertyName::Top).unwrap();
    assert_px(top.as_float().unwrap(), 150.0);
    assert_eq!(top.primitive_type().unwrap(), UnitType::PX);
    assert_px(
        style
            .get(&PropertyName::MaxWidth)
            .unwrap()
            .as_float()
            .unwrap(),
        200.0,
    );
}

#[test]
fn test_derive_errors_store_nothing() {
    let mut root = CalculatedStyle::root(ResolverConfig::default());
    assert!(matches!(
        root.derive("width", "12p!x"),
        Err(ValueError::MalformedNumber { .. })
    ));
    assert!(root.get(&PropertyName::from_name("width")).is_none());

    assert_eq!(
        root.derive("vertical-align", "10%"),
        Err(ValueError::MissingProperty {
            property: PropertyName::LineHeight
        })
    );
    assert!(root.get(&PropertyName::VerticalAlign).is_none());
}

#[test]
fn test_property_names() {
    assert_eq!(PropertyName::from_name("Font-Size"), PropertyName::FontSize);
    assert_eq!(PropertyName::from_name("max-height"), PropertyName::MaxHeight);
    assert_eq!(
        PropertyName::from_name("Z-Index"),
        PropertyName::Other("z-index".to_string())
    );
    assert_eq!(PropertyName::TextIndent.to_string(), "text-indent");
    assert_eq!(PropertyName::from("left").containing_block_axis(), Some(Axis::Width));
    assert_eq!(PropertyName::Bottom.containing_block_axis(), Some(Axis::Height));
    assert_eq!(PropertyName::VerticalAlign.containing_block_axis(), None);
    assert_eq!(PropertyName::from_name("width").containing_block_axis(), None);
}

#[test]
fn test_config_from_partial_json() {
    let config: ResolverConfig = serde_json::from_str(r#"{"snap-to-whole-pixels": false}"#).unwrap();
    assert!(!config.snap_to_whole_pixels);
    assert!(config.trim_list_segments);
    assert_px(config.default_font_size_px, 16.0);
    assert_px(config.snap(1.75), 1.75);
    assert_px(ResolverConfig::default().snap(1.75), 1.0);
}

#[test]
fn test_resolution_serializes() {
    let json = serde_json::to_value(Resolution::PendingLayout {
        property: PropertyName::Left,
        percentage: 10.0,
        axis: Axis::Width,
    })
    .unwrap();
    assert_eq!(json["outcome"], "pending-layout");
    assert_eq!(json["property"], "left");
    assert_eq!(json["axis"], "width");
}
