//! Integration tests for derived value construction and accessors.

use kestrel_css::{
    ColorValue, Computation, Counter, DerivedValue, PrimitiveValue, RectSide, ResolverConfig,
    SharedValue, Unit, UnitType, ValueError, ValueKind,
};

fn derived(text: &str) -> DerivedValue {
    DerivedValue::new(SharedValue::parse(text).unwrap(), None)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "Expected {expected} but got {actual}"
    );
}

#[test]
fn test_absolute_lengths_convert_at_construction() {
    // 1in = 25.4mm = 90.71px at 0.28mm per pixel, floored.
    let value = derived("1in");
    assert!(!value.requires_computation());
    assert_close(value.as_float().unwrap(), 90.0);
    assert_eq!(value.primitive_type().unwrap(), UnitType::PX);
    assert_eq!(value.specified_unit(), Some(&UnitType::Dimension(Unit::In)));

    assert_close(derived("1cm").as_float().unwrap(), 35.0);
    assert_close(derived("12pt").as_float().unwrap(), 15.0);
    assert_close(derived("1pc").as_float().unwrap(), 15.0);
    assert_close(derived("17px").as_float().unwrap(), 17.0);
}

#[test]
fn test_construction_does_not_rewrite_raw_text() {
    let value = derived("1in");
    assert_eq!(value.css_text(), "1in");
}

#[test]
fn test_other_numbers_keep_their_unit() {
    let angle = derived("90deg");
    assert!(!angle.requires_computation());
    assert_eq!(
        angle.computation(),
        &Computation::Absolute {
            value: 90.0,
            unit: UnitType::Dimension(Unit::Deg),
        }
    );

    let number = derived("1.2");
    assert_close(number.as_float().unwrap(), 1.2);
    assert_eq!(number.primitive_type().unwrap(), UnitType::Number);

    let unknown = derived("3furlongs");
    assert_eq!(
        unknown.primitive_type().unwrap(),
        UnitType::UnknownDimension("furlongs".to_string())
    );
    assert_close(unknown.as_float().unwrap(), 3.0);
}

#[test]
fn test_relative_values_require_computation() {
    for text in ["1.5em", "2ex", "50%"] {
        let value = derived(text);
        assert!(value.requires_computation(), "{text} should be relative");
        assert!(matches!(
            value.as_float(),
            Err(ValueError::Unresolved { .. })
        ));
    }
}

#[test]
fn test_scalar_and_list_kinds() {
    let scalar = derived("bold");
    assert!(scalar.is_scalar());
    assert!(!scalar.is_list());

    let list = derived("a, b, c");
    assert!(list.is_list());
    assert!(!list.is_scalar());
    assert_eq!(list.css_value().kind(), ValueKind::List);
}

#[test]
fn test_scalar_accessors_reject_lists() {
    let list = derived("1px 2px");
    let mismatch = ValueError::KindMismatch {
        expected: ValueKind::Scalar,
    };
    assert_eq!(list.as_float(), Err(mismatch.clone()));
    assert_eq!(list.as_string(), Err(mismatch.clone()));
    assert_eq!(list.as_color(), Err(mismatch.clone()));
    assert_eq!(list.primitive_type(), Err(mismatch.clone()));
    assert_eq!(list.get_counter_value(), Err(mismatch));
}

#[test]
fn test_list_accessors_reject_scalars() {
    let scalar = derived("bold");
    assert_eq!(
        scalar.list_items(),
        Err(ValueError::KindMismatch {
            expected: ValueKind::List
        })
    );
}

#[test]
fn test_list_items() {
    let list = derived("1px solid red");
    let items = list.list_items().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], PrimitiveValue::numeric(1.0, Unit::Px));
    assert_eq!(items[1], PrimitiveValue::Ident("solid".to_string()));
    assert_eq!(
        list.item(2).unwrap(),
        Some(PrimitiveValue::Ident("red".to_string()))
    );
    assert_eq!(list.item(3).unwrap(), None);
}

#[test]
fn test_as_string_array_trims_by_default() {
    let value = derived("a, b, c");
    assert_eq!(value.as_string_array(), ["a", "b", "c"]);
}

#[test]
fn test_as_string_array_without_trimming() {
    let config = ResolverConfig {
        trim_list_segments: false,
        ..ResolverConfig::default()
    };
    let value = DerivedValue::with_config(SharedValue::parse("a, b, c").unwrap(), None, config);
    assert_eq!(value.as_string_array(), ["a", " b", " c"]);
}

#[test]
fn test_as_string_array_is_cached() {
    let mut value = derived("a, b");
    assert_eq!(value.as_string_array(), ["a", "b"]);
    value.set_css_text("x, y, z").unwrap();
    // The first split is kept.
    assert_eq!(value.as_string_array(), ["a", "b"]);
}

#[test]
fn test_as_color_transparent() {
    let value = derived("transparent");
    assert_eq!(value.as_color().unwrap(), ColorValue::TRANSPARENT);
    assert_eq!(
        derived("Transparent").as_color().unwrap(),
        ColorValue { r: 0, g: 0, b: 0, a: 0 }
    );
}

#[test]
fn test_as_color_forms() {
    let red = ColorValue {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };
    assert_eq!(derived("red").as_color().unwrap(), red);
    assert_eq!(derived("#f00").as_color().unwrap(), red);
    assert_eq!(derived("rgb(255, 0, 0)").as_color().unwrap(), red);
    assert_eq!(derived("hsl(0, 100%, 50%)").as_color().unwrap(), red);
    assert_eq!(
        derived("rgba(0, 0, 255, 0.5)").as_color().unwrap(),
        ColorValue {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
}

#[test]
fn test_as_color_rejects_non_colors() {
    assert_eq!(
        derived("bold").as_color(),
        Err(ValueError::NotAColor {
            text: "bold".to_string()
        })
    );
    assert!(matches!(
        derived("10px").as_color(),
        Err(ValueError::NotAColor { .. })
    ));
}

#[test]
fn test_as_string_on_string_like_values() {
    assert_eq!(derived("\"Gill Sans\"").as_string().unwrap(), "Gill Sans");
    assert_eq!(derived("serif").as_string().unwrap(), "serif");
    assert_eq!(derived("url(a.png)").as_string().unwrap(), "a.png");
    assert_eq!(derived("attr(title)").get_string_value().unwrap(), "title");
    assert_eq!(
        derived("12px").as_string(),
        Err(ValueError::NotAString { unit: UnitType::PX })
    );
}

#[test]
fn test_has_forced_inherit() {
    assert!(derived("inherit").has_forced_inherit());
    assert!(derived("INHERIT").has_forced_inherit());
    assert!(derived("a, inherit").has_forced_inherit());
    assert!(!derived("inherited").has_forced_inherit());
    assert!(!derived("\"no-inherit\"").has_forced_inherit());
}

#[test]
fn test_get_float_value_converts_lengths() {
    let config = ResolverConfig {
        snap_to_whole_pixels: false,
        ..ResolverConfig::default()
    };
    let value = DerivedValue::with_config(SharedValue::parse("1in").unwrap(), None, config);
    assert_close(value.get_float_value(&UnitType::PX).unwrap(), 90.71);
    assert_close(value.get_float_value(&Unit::In.into()).unwrap(), 1.0);
    assert_close(value.get_float_value(&Unit::Pt.into()).unwrap(), 72.0);
    assert_close(value.get_float_value(&Unit::Mm.into()).unwrap(), 25.4);
}

#[test]
fn test_get_float_value_returns_written_number_in_own_unit() {
    let points = derived("12pt");
    assert_close(points.as_float().unwrap(), 15.0);
    assert_close(points.get_float_value(&Unit::Pt.into()).unwrap(), 12.0);
    assert_close(points.get_float_value(&Unit::Pc.into()).unwrap(), 1.0);

    let inches = derived("1in");
    assert_close(inches.get_float_value(&Unit::In.into()).unwrap(), 1.0);
    assert_close(inches.get_float_value(&Unit::Mm.into()).unwrap(), 25.4);
    assert_close(inches.get_float_value(&UnitType::PX).unwrap(), 90.0);
}

#[test]
fn test_get_float_value_in_own_unit() {
    assert_close(
        derived("50%")
            .get_float_value(&UnitType::Percentage)
            .unwrap(),
        50.0,
    );
    assert_close(
        derived("1.5em").get_float_value(&Unit::Em.into()).unwrap(),
        1.5,
    );
    assert_close(
        derived("90deg").get_float_value(&Unit::Deg.into()).unwrap(),
        90.0,
    );
}

#[test]
fn test_get_float_value_rejects_unrelated_units() {
    assert_eq!(
        derived("90deg").get_float_value(&UnitType::PX),
        Err(ValueError::UnsupportedConversion {
            from: Unit::Deg.into(),
            to: UnitType::PX,
        })
    );
    assert!(matches!(
        derived("1.5em").get_float_value(&UnitType::PX),
        Err(ValueError::Unresolved { .. })
    ));
    assert!(matches!(
        derived("bold").get_float_value(&UnitType::PX),
        Err(ValueError::NotNumeric { .. })
    ));
}

#[test]
fn test_get_counter_value() {
    let value = derived("counters(section, \".\", upper-roman)");
    assert_eq!(
        value.get_counter_value().unwrap(),
        Counter {
            identifier: "section".to_string(),
            list_style: Some("upper-roman".to_string()),
            separator: Some(".".to_string()),
        }
    );
    assert_eq!(value.primitive_type().unwrap(), UnitType::Counter);
    assert!(matches!(
        derived("bold").get_counter_value(),
        Err(ValueError::NotACounter { .. })
    ));
}

#[test]
fn test_get_rect_value() {
    let rect = derived("rect(5px, auto, 2em, 0)").get_rect_value().unwrap();
    assert_eq!(
        rect.top,
        RectSide::Length {
            value: 5.0,
            unit: UnitType::PX
        }
    );
    assert_eq!(rect.right, RectSide::Auto);
    assert_eq!(
        rect.bottom,
        RectSide::Length {
            value: 2.0,
            unit: Unit::Em.into()
        }
    );
    assert_eq!(
        rect.left,
        RectSide::Length {
            value: 0.0,
            unit: UnitType::PX
        }
    );
    assert!(matches!(
        derived("10px").get_rect_value(),
        Err(ValueError::NotARect { .. })
    ));
}

#[test]
fn test_set_float_value_refreshes_state() {
    let mut value = derived("50%");
    assert!(value.requires_computation());

    value.set_float_value(Unit::Pt, 12.0).unwrap();

    assert!(!value.requires_computation());
    assert_close(value.as_float().unwrap(), 15.0);
    assert_eq!(value.css_text(), "12pt");
    assert_eq!(value.specified_unit(), Some(&UnitType::Dimension(Unit::Pt)));
}

#[test]
fn test_set_float_value_rejects_non_numeric() {
    let mut value = derived("bold");
    assert_eq!(
        value.set_float_value(Unit::Px, 1.0),
        Err(ValueError::NotNumeric {
            unit: UnitType::Ident
        })
    );
    assert_eq!(value.css_text(), "bold");
}

#[test]
fn test_set_string_value_keeps_type() {
    let mut value = derived("url(a.png)");
    value.set_string_value("b.png").unwrap();
    assert_eq!(value.primitive_type().unwrap(), UnitType::Uri);
    assert_eq!(value.css_text(), "url(b.png)");

    let mut number = derived("12px");
    assert!(matches!(
        number.set_string_value("x"),
        Err(ValueError::NotAString { .. })
    ));
}

#[test]
fn test_set_css_text_reclassifies() {
    let mut value = derived("12px");
    value.set_css_text("a, b").unwrap();
    assert!(value.is_list());

    value.set_css_text("2em").unwrap();
    assert!(value.requires_computation());

    let err = value.set_css_text("rgb(1, 2").unwrap_err();
    assert!(matches!(err, ValueError::Syntax { .. }));
    assert_eq!(value.css_text(), "2em");
}

#[test]
fn test_copy_shares_raw_value() {
    let mut original = derived("10px");
    let copy = original.copy();
    assert!(copy.css_value().ptr_eq(original.css_value()));

    original.set_css_text("20px").unwrap();
    assert_eq!(copy.css_text(), "20px");
}

#[test]
fn test_copy_rederives_state_from_raw() {
    let original = derived("1.5em");
    let copy = original.copy();
    assert!(copy.requires_computation());

    original.css_value().set_css_text("30px").unwrap();
    let later = original.copy();
    assert!(!later.requires_computation());
    assert_close(later.as_float().unwrap(), 30.0);
}

#[test]
fn test_malformed_number_is_rejected() {
    assert_eq!(
        SharedValue::parse("12p!x").unwrap_err(),
        ValueError::MalformedNumber {
            text: "12p!x".to_string()
        }
    );
}

#[test]
fn test_set_string_value_with_quote_stays_classifiable() {
    let mut value = derived("\"Gill Sans\"");
    value.set_string_value("a\"b").unwrap();
    assert_eq!(value.css_text(), r#""a\"b""#);
    assert_eq!(value.as_string().unwrap(), "a\"b");

    let reparsed = derived(&value.css_text());
    assert_eq!(reparsed.as_string().unwrap(), "a\"b");
}
