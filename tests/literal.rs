use num_bigint::BigInt;
use webidl_conversions::{
    HostValue,
    error::ParseError,
    host::{
        buffer::{BufferClass, classify},
        value::{ObjectKind, Type},
    },
    literal::parser::{MAX_BYTE_LENGTH, parse_literal},
};

fn assert_parses(src: &str, rendered: &str) {
    match parse_literal(src) {
        Ok(value) => assert_eq!(value.to_string(), rendered, "{src}"),
        Err(e) => panic!("Literal {src} failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if parse_literal(src).is_ok() {
        panic!("Literal {src} parsed but was expected to fail")
    }
}

#[test]
fn primitives() {
    assert_parses("undefined", "undefined");
    assert_parses("null", "null");
    assert_parses("true", "true");
    assert_parses("  false  ", "false");
    assert_parses("1.5", "1.5");
    assert_parses(".5", "0.5");
    assert_parses("1e3", "1000");
    assert_parses("-0", "-0");
    assert_parses("+7", "7");
    assert_parses("-Infinity", "-Infinity");
    assert_parses("-NaN", "NaN");
}

#[test]
fn bigints() {
    assert_eq!(parse_literal("123n").unwrap(), HostValue::BigInt(BigInt::from(123)));
    assert_eq!(parse_literal("-5n").unwrap(), HostValue::BigInt(BigInt::from(-5)));
    assert_parses("18446744073709551616n", "18446744073709551616n");
}

#[test]
fn strings_and_escapes() {
    assert_parses(r#""plain""#, r#""plain""#);
    assert_parses(r#""a\"b""#, r#""a\"b""#);
    assert_parses(r#""tab\there""#, r#""tab\there""#);
    assert_parses(r#""A""#, r#""A""#);

    let HostValue::String(s) = parse_literal(r#""\uD800x""#).unwrap() else {
        panic!("expected a string");
    };
    assert_eq!(s.units(), &[0xD800, 0x78]);

    assert_failure(r#""\q""#);
    assert_failure(r#""\u12""#);
    assert_failure(r#""\u+123""#);
    assert_failure(r#""\u-7FF""#);
    assert_failure(r#""unterminated"#);
}

#[test]
fn symbols_objects_and_functions() {
    assert_parses(r#"Symbol("tag")"#, r#"Symbol("tag")"#);
    assert_parses("Symbol()", "Symbol()");
    assert_parses("{}", "{}");
    assert_parses("{ toString: \"x\", valueOf: 2 }", "{ valueOf: 2, toString: \"x\" }");
    assert_parses("{ valueOf: {} }", "{ valueOf: {} }");
    assert_parses("function f", "function f");

    let value = parse_literal("function").unwrap();
    assert!(value.is_callable());
    assert_eq!(value.type_of(), Type::Object);

    assert_failure("{ length: 1 }");
    assert_failure("{ valueOf 1 }");
    assert_failure("{ valueOf: 1,");
}

#[test]
fn each_literal_is_a_fresh_allocation() {
    let a = parse_literal("Symbol(\"s\")").unwrap();
    let b = parse_literal("Symbol(\"s\")").unwrap();
    assert_ne!(a, b);

    let a = parse_literal("{}").unwrap();
    let b = parse_literal("{}").unwrap();
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn buffers_and_views() {
    assert_parses("ArrayBuffer(8)", "ArrayBuffer(8)");
    assert_parses("SharedArrayBuffer(0)", "SharedArrayBuffer(0)");
    assert_parses("Uint8Array(4)", "Uint8Array(4)");
    assert_parses("Int32Array(ArrayBuffer(8))", "Int32Array(2)");
    assert_parses("DataView(SharedArrayBuffer(3))", "DataView(SharedArrayBuffer(3))");

    let value = parse_literal("Float64Array(SharedArrayBuffer(16))").unwrap();
    let BufferClass::View(view) = classify(&value) else {
        panic!("expected a view");
    };
    assert!(view.buffer().is_shared());
    assert_eq!(view.length(), 2);

    assert!(matches!(parse_literal("Uint16Array(ArrayBuffer(3))"),
                     Err(ParseError::InvalidLength { .. })));
    assert!(matches!(parse_literal("ArrayBuffer(-1)"), Err(ParseError::UnexpectedToken { .. })));
    assert!(matches!(parse_literal("Int8Array(1.5)"), Err(ParseError::InvalidLength { .. })));
    assert!(matches!(parse_literal("Map(1)"), Err(ParseError::UnknownConstructor { .. })));
    assert_failure("DataView(8)");
}

#[test]
fn oversized_lengths_are_rejected() {
    assert_eq!(parse_literal("ArrayBuffer(9007199254740991)"),
               Err(ParseError::InvalidLength { value:    "9007199254740991".to_string(),
                                               position: 12, }));
    assert_eq!(parse_literal("Uint8Array(9007199254740991)"),
               Err(ParseError::InvalidLength { value:    "9007199254740991".to_string(),
                                               position: 11, }));
    assert!(matches!(parse_literal("SharedArrayBuffer(1e300)"),
                     Err(ParseError::InvalidLength { .. })));
    assert!(matches!(parse_literal("Float64Array(134217729)"),
                     Err(ParseError::InvalidLength { .. })));
    assert!(matches!(parse_literal("DataView(ArrayBuffer(2000000000))"),
                     Err(ParseError::InvalidLength { .. })));

    let max = MAX_BYTE_LENGTH / 8;
    assert!(matches!(parse_literal(&format!("Float64Array({})", max + 1)),
                     Err(ParseError::InvalidLength { .. })));
}

#[test]
fn detached_values() {
    assert_parses("detached ArrayBuffer(8)", "detached ArrayBuffer(0)");
    assert_parses("detached Uint8Array(4)", "detached Uint8Array(0)");
    assert_parses("detached DataView(ArrayBuffer(4))", "detached DataView(detached ArrayBuffer(0))");

    let value = parse_literal("detached ArrayBuffer(8)").unwrap();
    let Some(object) = value.as_object() else {
        panic!("expected an object");
    };
    let ObjectKind::Buffer(buffer) = object.kind() else {
        panic!("expected a buffer");
    };
    assert!(buffer.is_detached());

    assert_eq!(parse_literal("detached SharedArrayBuffer(8)"),
               Err(ParseError::NotDetachable { position: 0 }));
    assert_eq!(parse_literal("detached 5"), Err(ParseError::NotDetachable { position: 0 }));
    assert_eq!(parse_literal("detached detached ArrayBuffer(1)"),
               Err(ParseError::NotDetachable { position: 0 }));
}

#[test]
fn structural_errors() {
    assert_eq!(parse_literal(""), Err(ParseError::UnexpectedEnd));
    assert_eq!(parse_literal("1 2"),
               Err(ParseError::TrailingInput { token:    "2".to_string(),
                                               position: 2, }));
    assert_eq!(parse_literal(")"),
               Err(ParseError::UnexpectedToken { token:    ")".to_string(),
                                                 position: 0, }));
    assert_failure("- true");
    assert_failure("#");
}
