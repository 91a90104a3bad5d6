//! Classification of a single declaration value's text.
//!
//! [CSS Syntax Level 3 § 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization)
//!
//! This is not a stylesheet parser: it takes the text of one property value
//! (`1.5em`, `rgb(0 0 0 / 50%)`, `"Gill Sans", serif`) and classifies it into
//! a [`ParsedValue`]. Only the component types the value model represents are
//! recognized.

use std::str::{Chars, FromStr};

use kestrel_common::warning::warn_once;

use super::color::{ColorValue, parse_color_function};
use super::primitive::{Counter, ListSeparator, ParsedValue, PrimitiveValue, Rect, RectSide};
use super::unit::{Unit, UnitType};
use crate::error::ValueError;

/// Classify the text of one declaration value.
///
/// Top-level commas make a comma-separated list; otherwise top-level
/// whitespace makes a space-separated list; otherwise the text is one
/// primitive value.
///
/// # Errors
///
/// Returns [`ValueError::MalformedNumber`] for numeric text that is not a
/// number, and [`ValueError::Syntax`] for anything else that cannot be
/// classified (empty text, unknown functions, unbalanced quotes or
/// parentheses).
pub fn parse_value(text: &str) -> Result<ParsedValue, ValueError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(syntax(text, "empty value"));
    }

    // STEP 1: Comma-separated list.
    //
    // [§ 2.1 Component value multipliers](https://www.w3.org/TR/css-values-3/#mult-comma)
    // "A hash mark (#) indicates that the preceding type, word, or group occurs
    // one or more times, separated by comma tokens."
    let comma_items = split_top_level(text, |c| c == ',')?;
    if comma_items.len() > 1 {
        let items = comma_items
            .into_iter()
            .map(parse_list_item)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ParsedValue::List {
            items,
            separator: ListSeparator::Comma,
        });
    }

    // STEP 2: Space-separated list.
    let words = split_words(text)?;
    if words.len() > 1 {
        let items = words
            .into_iter()
            .map(parse_primitive)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ParsedValue::List {
            items,
            separator: ListSeparator::Space,
        });
    }

    // STEP 3: A single component.
    parse_primitive(text).map(ParsedValue::Single)
}

/// One item of a comma-separated list.
///
/// An item of several bare identifiers (`Times New Roman`) is kept as one
/// identifier with its words joined by single spaces, the way family names
/// are written.
fn parse_list_item(item: &str) -> Result<PrimitiveValue, ValueError> {
    if item.is_empty() {
        return Err(syntax(item, "empty list item"));
    }
    let words = split_words(item)?;
    if words.len() == 1 {
        return parse_primitive(item);
    }
    if words.iter().all(|word| is_ident(word)) {
        return Ok(PrimitiveValue::Ident(words.join(" ")));
    }
    Err(syntax(item, "nested value lists are not supported"))
}

/// Classify a single component value.
///
/// # Errors
///
/// See [`parse_value`].
pub fn parse_primitive(text: &str) -> Result<PrimitiveValue, ValueError> {
    let text = text.trim();
    let Some(first) = text.chars().next() else {
        return Err(syntax(text, "empty value"));
    };

    // [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    if first == '"' || first == '\'' {
        return parse_string(text, first).map(PrimitiveValue::String);
    }

    // [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    if first == '#' {
        return ColorValue::from_hex(text)
            .map(PrimitiveValue::Color)
            .ok_or_else(|| syntax(text, "invalid hex color"));
    }

    // [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    if starts_with_number(text) {
        return parse_numeric(text);
    }

    // [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    if let Some(open) = text.find('(') {
        return parse_function(text, open);
    }
    if is_ident(text) {
        return Ok(PrimitiveValue::Ident(text.to_string()));
    }

    Err(syntax(text, "unrecognized value"))
}

/// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
///
/// "If the next 3 input code points would start an ident sequence, then:
/// Create a `<dimension-token>`... Otherwise, if the next input code point is
/// U+0025 PERCENTAGE SIGN (%), consume it. Create a `<percentage-token>`...
/// Otherwise, create a `<number-token>`."
fn parse_numeric(text: &str) -> Result<PrimitiveValue, ValueError> {
    let malformed = || ValueError::MalformedNumber {
        text: text.to_string(),
    };
    let (value, rest) = consume_number(text).ok_or_else(malformed)?;

    let unit = match rest {
        "" => UnitType::Number,
        "%" => UnitType::Percentage,
        suffix if is_ident(suffix) => Unit::from_str(suffix).map_or_else(
            |_| {
                warn_once("CSS", &format!("unknown unit '{suffix}' kept as written"));
                UnitType::UnknownDimension(suffix.to_ascii_lowercase())
            },
            UnitType::Dimension,
        ),
        _ => return Err(malformed()),
    };
    Ok(PrimitiveValue::Numeric { value, unit })
}

/// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
///
/// Consume a number from the start of `text`; returns the number and the
/// unconsumed remainder, or `None` when `text` does not start with a number.
pub(crate) fn consume_number(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    // STEP 1: "If the next input code point is U+002B PLUS SIGN (+) or
    // U+002D HYPHEN-MINUS (-), consume it."
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    // STEP 2: "While the next input code point is a digit, consume it."
    let integer_digits = digits_from(end);
    end += integer_digits;

    // STEP 3: "If the next 2 input code points are U+002E FULL STOP (.)
    // followed by a digit, then: Consume them."
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    // STEP 4: "If the next 2 or 3 input code points are U+0045 LATIN CAPITAL
    // LETTER E (E) or U+0065 LATIN SMALL LETTER E (e), optionally followed by
    // U+002D HYPHEN-MINUS (-) or U+002B PLUS SIGN (+), followed by a digit"
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    // STEP 5: "Convert repr to a number."
    let value = text[..end].parse::<f64>().ok()?;
    Some((value, &text[end..]))
}

/// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
fn starts_with_number(text: &str) -> bool {
    let mut chars = text.chars();
    let first = chars.next();
    let second = chars.next();
    let third = chars.next();
    match first {
        Some('+' | '-') => match second {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => third.is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        },
        Some('.') => second.is_some_and(|c| c.is_ascii_digit()),
        Some(c) => c.is_ascii_digit(),
        None => false,
    }
}

/// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
///
/// Whether all of `text` is one ident sequence. Escapes are not supported.
fn is_ident(text: &str) -> bool {
    let is_start = |c: char| c.is_ascii_alphabetic() || c == '_' || !c.is_ascii();
    let is_ident_char = |c: char| is_start(c) || c.is_ascii_digit() || c == '-';

    let mut chars = text.chars();
    let valid_start = match chars.next() {
        Some('-') => match chars.next() {
            Some('-') => true,
            Some(c) => is_start(c),
            None => false,
        },
        Some(c) => is_start(c),
        None => false,
    };
    valid_start && chars.all(is_ident_char)
}

/// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
fn parse_string(text: &str, quote: char) -> Result<String, ValueError> {
    let unterminated = || syntax(text, "unterminated string");
    let mut chars = text[quote.len_utf8()..].chars();
    let mut value = String::new();
    loop {
        match chars.next().ok_or_else(unterminated)? {
            c if c == quote => break,
            '\\' => value.push(consume_escape(&mut chars).ok_or_else(unterminated)?),
            c => value.push(c),
        }
    }
    if !chars.as_str().is_empty() {
        return Err(syntax(text, "unexpected text after string"));
    }
    Ok(value)
}

/// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
///
/// "hex digit: Consume as many hex digits as possible, but no more than 5.
/// Note that this means 1-6 hex digits have been consumed in total. If the
/// next input code point is whitespace, consume it as well."
fn consume_escape(chars: &mut Chars<'_>) -> Option<char> {
    let first = chars.next()?;
    if !first.is_ascii_hexdigit() {
        return Some(first);
    }

    let rest = chars.as_str();
    let digits = rest
        .chars()
        .take(5)
        .take_while(char::is_ascii_hexdigit)
        .count();
    let code = u32::from_str_radix(&format!("{first}{}", &rest[..digits]), 16).ok()?;
    let rest = &rest[digits..];
    *chars = rest
        .strip_prefix(|c: char| c.is_ascii_whitespace())
        .unwrap_or(rest)
        .chars();

    Some(match code {
        0 => char::REPLACEMENT_CHARACTER,
        code => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    })
}

/// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
///
/// "If string's value is an ASCII case-insensitive match for "url", and the
/// next input code point is U+0028 LEFT PARENTHESIS ((), consume it... Otherwise,
/// if the next input code point is U+0028 LEFT PARENTHESIS ((), then consume
/// it. Create a `<function-token>` with its value set to string and return it."
fn parse_function(text: &str, open: usize) -> Result<PrimitiveValue, ValueError> {
    let name = &text[..open];
    if !is_ident(name) {
        return Err(syntax(text, "invalid function name"));
    }
    let args = text[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| syntax(text, "unbalanced parentheses"))?
        .trim();
    // Rejects `a(b) c(d)` sneaking past the caller's list split.
    let _ = split_top_level(args, |_| false)?;

    match name.to_ascii_lowercase().as_str() {
        "url" => Ok(PrimitiveValue::Uri(unquote(args).to_string())),
        "attr" if is_ident(args) => Ok(PrimitiveValue::Attr(args.to_string())),
        "counter" | "counters" => parse_counter(text, name, args).map(PrimitiveValue::Counter),
        "rect" => parse_rect(text, args).map(PrimitiveValue::Rect),
        _ => parse_color_function(name, args)
            .map(PrimitiveValue::Color)
            .ok_or_else(|| syntax(text, "unsupported function")),
    }
}

/// Strip one pair of matching quotes, if present.
fn unquote(text: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| text.strip_prefix(q).and_then(|t| t.strip_suffix(q)))
        .unwrap_or(text)
}

/// [CSS 2.1 § 12.2 The 'content' property](https://www.w3.org/TR/CSS21/generate.html#counter)
///
/// "counter(`<identifier>`) or counter(`<identifier>`, `<list-style-type>`)"
/// "counters(`<identifier>`, `<string>`) or counters(`<identifier>`, `<string>`,
/// `<list-style-type>`)"
fn parse_counter(text: &str, name: &str, args: &str) -> Result<Counter, ValueError> {
    let parts = split_top_level(args, |c| c == ',')?;

    if name.eq_ignore_ascii_case("counters") {
        let [identifier, separator, rest @ ..] = parts.as_slice() else {
            return Err(syntax(text, "counters() needs a name and a separator"));
        };
        let separator = match separator.chars().next() {
            Some(quote @ ('"' | '\'')) => parse_string(separator, quote)?,
            _ => return Err(syntax(text, "counters() separator must be a string")),
        };
        let list_style = match rest {
            [] => None,
            [style] => Some(counter_ident(text, style)?),
            _ => return Err(syntax(text, "too many counters() arguments")),
        };
        return Ok(Counter {
            identifier: counter_ident(text, identifier)?,
            list_style,
            separator: Some(separator),
        });
    }

    match parts.as_slice() {
        [identifier] => Ok(Counter {
            identifier: counter_ident(text, identifier)?,
            list_style: None,
            separator: None,
        }),
        [identifier, style] => Ok(Counter {
            identifier: counter_ident(text, identifier)?,
            list_style: Some(counter_ident(text, style)?),
            separator: None,
        }),
        _ => Err(syntax(text, "counter() takes one or two arguments")),
    }
}

fn counter_ident(text: &str, part: &str) -> Result<String, ValueError> {
    if is_ident(part) {
        Ok(part.to_string())
    } else {
        Err(syntax(text, "counter arguments must be identifiers"))
    }
}

/// [CSS 2.1 § 11.1.2 Clipping](https://www.w3.org/TR/CSS21/visufx.html#clipping)
///
/// "`<top>`, `<right>`, `<bottom>`, and `<left>` may either have a `<length>`
/// value or 'auto'." User agents accept both comma- and space-separated forms.
fn parse_rect(text: &str, args: &str) -> Result<Rect, ValueError> {
    let sides = split_top_level(args, |c| c == ',' || c.is_ascii_whitespace())?
        .into_iter()
        .filter(|side| !side.is_empty())
        .map(|side| parse_rect_side(text, side))
        .collect::<Result<Vec<_>, _>>()?;

    let Ok([top, right, bottom, left]) = <[RectSide; 4]>::try_from(sides) else {
        return Err(syntax(text, "rect() takes four offsets"));
    };
    Ok(Rect {
        top,
        right,
        bottom,
        left,
    })
}

fn parse_rect_side(text: &str, side: &str) -> Result<RectSide, ValueError> {
    if side.eq_ignore_ascii_case("auto") {
        return Ok(RectSide::Auto);
    }
    if !starts_with_number(side) {
        return Err(syntax(text, "rect() offsets must be lengths or 'auto'"));
    }
    match parse_numeric(side)? {
        PrimitiveValue::Numeric { value, unit } if unit.is_absolute_length() || unit.is_relative() => {
            Ok(RectSide::Length { value, unit })
        }
        // "The unit identifier is optional after the number zero."
        PrimitiveValue::Numeric {
            value,
            unit: UnitType::Number,
        } if value.abs() < f64::EPSILON => Ok(RectSide::Length {
            value,
            unit: UnitType::PX,
        }),
        _ => Err(syntax(text, "rect() offsets must be lengths or 'auto'")),
    }
}

/// Split on whitespace outside quotes and parentheses, dropping empty words.
fn split_words(text: &str) -> Result<Vec<&str>, ValueError> {
    Ok(split_top_level(text, |c| c.is_ascii_whitespace())?
        .into_iter()
        .filter(|word| !word.is_empty())
        .collect())
}

/// Split `text` at every character matching `is_separator` that is outside
/// quotes and parentheses. Pieces are trimmed; empty pieces are kept.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] when quotes or parentheses are unbalanced.
pub(crate) fn split_top_level(
    text: &str,
    is_separator: impl Fn(char) -> bool,
) -> Result<Vec<&str>, ValueError> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(_), _) if escaped => escaped = false,
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| syntax(text, "unbalanced parentheses"))?;
            }
            (None, c) if depth == 0 && is_separator(c) => {
                pieces.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            (None, _) => {}
        }
    }

    if quote.is_some() {
        return Err(syntax(text, "unterminated string"));
    }
    if depth != 0 {
        return Err(syntax(text, "unbalanced parentheses"));
    }
    pieces.push(text[start..].trim());
    Ok(pieces)
}

fn syntax(text: &str, reason: &'static str) -> ValueError {
    ValueError::Syntax {
        text: text.to_string(),
        reason,
    }
}
