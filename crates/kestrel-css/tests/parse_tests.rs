//! Integration tests for value text classification.

use kestrel_common::warning::was_warned;
use kestrel_css::values::parse_primitive;
use kestrel_css::{
    ColorValue, ListSeparator, ParsedValue, PrimitiveValue, Unit, UnitType, ValueError,
    parse_value,
};

fn single(text: &str) -> PrimitiveValue {
    match parse_value(text).unwrap() {
        ParsedValue::Single(primitive) => primitive,
        list @ ParsedValue::List { .. } => panic!("expected a single value, got {list:?}"),
    }
}

#[test]
fn test_numbers_and_units() {
    assert_eq!(single("12px"), PrimitiveValue::numeric(12.0, Unit::Px));
    assert_eq!(single("1.5EM"), PrimitiveValue::numeric(1.5, Unit::Em));
    assert_eq!(single("-2.5e1mm"), PrimitiveValue::numeric(-25.0, Unit::Mm));
    assert_eq!(single("50%"), PrimitiveValue::numeric(50.0, UnitType::Percentage));
    assert_eq!(single(".5"), PrimitiveValue::numeric(0.5, UnitType::Number));
    assert_eq!(single("300ms"), PrimitiveValue::numeric(300.0, Unit::Ms));
    assert_eq!(
        single("2Q"),
        PrimitiveValue::numeric(2.0, UnitType::UnknownDimension("q".to_string()))
    );
    assert!(was_warned("CSS", "unknown unit 'Q' kept as written"));
}

#[test]
fn test_malformed_numbers() {
    for text in ["12px!", "1.5.5em", "3%%"] {
        assert!(
            matches!(parse_value(text), Err(ValueError::MalformedNumber { .. })),
            "{text} should be malformed"
        );
    }
}

#[test]
fn test_identifiers_strings_and_functions() {
    assert_eq!(single("bold"), PrimitiveValue::Ident("bold".to_string()));
    assert_eq!(single("'a b'"), PrimitiveValue::String("a b".to_string()));
    assert_eq!(
        single("url(\"img/bg.png\")"),
        PrimitiveValue::Uri("img/bg.png".to_string())
    );
    assert_eq!(single("attr(alt)"), PrimitiveValue::Attr("alt".to_string()));
    assert_eq!(
        single("#00ff00"),
        PrimitiveValue::Color(ColorValue {
            r: 0,
            g: 255,
            b: 0,
            a: 255
        })
    );
    assert!(matches!(
        single("rgb(0 0 0 / 50%)"),
        PrimitiveValue::Color(ColorValue { a: 128, .. })
    ));
}

#[test]
fn test_comma_list() {
    let value = parse_value("\"Gill Sans\", Times New Roman, serif").unwrap();
    assert_eq!(
        value,
        ParsedValue::List {
            items: vec![
                PrimitiveValue::String("Gill Sans".to_string()),
                PrimitiveValue::Ident("Times New Roman".to_string()),
                PrimitiveValue::Ident("serif".to_string()),
            ],
            separator: ListSeparator::Comma,
        }
    );
}

#[test]
fn test_space_list() {
    let value = parse_value("1px  solid rgb(255, 0, 0)").unwrap();
    let ParsedValue::List { items, separator } = value else {
        panic!("expected a list");
    };
    assert_eq!(separator, ListSeparator::Space);
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[2],
        PrimitiveValue::Color(ColorValue {
            r: 255,
            g: 0,
            b: 0,
            a: 255
        })
    );
}

#[test]
fn test_serialization() {
    assert_eq!(parse_value("a ,b").unwrap().to_string(), "a, b");
    assert_eq!(single("counter(item)").to_string(), "counter(item)");
    assert_eq!(single("#F00").to_string(), "#ff0000");
    assert_eq!(single("1.5em").to_string(), "1.5em");
}

#[test]
fn test_syntax_errors() {
    for text in [
        "",
        "   ",
        "rgb(1, 2",
        "\"open",
        "frobnicate(1)",
        "a, , b",
        "1px 2px, 3px",
        "#ggg",
        "rect(1px, 2px)",
        "counter(1)",
    ] {
        assert!(
            matches!(parse_value(text), Err(ValueError::Syntax { .. })),
            "{text:?} should be a syntax error"
        );
    }
}

#[test]
fn test_parse_primitive_rejects_lists() {
    assert!(parse_primitive("a b").is_err());
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        single(r#""say \"hi\"""#),
        PrimitiveValue::String("say \"hi\"".to_string())
    );
    assert_eq!(single(r"'\41 B'"), PrimitiveValue::String("AB".to_string()));
    assert_eq!(
        single(r#""a\\b""#),
        PrimitiveValue::String("a\\b".to_string())
    );
    assert_eq!(
        PrimitiveValue::String("a\"b\\c".to_string()).to_string(),
        r#""a\"b\\c""#
    );
    assert!(matches!(
        parse_value(r#""open\""#),
        Err(ValueError::Syntax { .. })
    ));
}
