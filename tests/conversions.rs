use std::rc::Rc;

use num_bigint::BigInt;
use webidl_conversions::{
    ConversionOptions, Error, HostValue, IdlValue, TYPE_NAMES, convert, convert_literal,
    conversion::{
        float,
        integer::IntegerType,
        string::{byte_string, usv_string},
    },
    error::ConversionResult,
    host::{
        buffer::{BufferRef, ElementKind, ViewRef},
        coerce::number_value,
        realm::Realm,
        value::HostString,
    },
    lookup,
};

fn assert_converts(type_name: &str, literal: &str, expected: &str) {
    match convert_literal(type_name, literal, &ConversionOptions::default()) {
        Ok(value) => assert_eq!(value.to_string(), expected, "{type_name} <- {literal}"),
        Err(e) => panic!("Converting {literal} to {type_name} failed: {e}"),
    }
}

fn assert_rejects(type_name: &str, literal: &str, options: &ConversionOptions, message: &str) {
    match convert_literal(type_name, literal, options) {
        Ok(value) => panic!("Converting {literal} to {type_name} succeeded with {value}"),
        Err(e) => assert_eq!(e.to_string(), message),
    }
}

#[derive(Debug)]
struct Frame;

impl Realm for Frame {
    fn name(&self) -> &str {
        "frame"
    }
}

#[derive(Debug)]
struct Doubling;

impl Realm for Doubling {
    fn name(&self) -> &str {
        "doubling"
    }

    fn to_number(&self, value: &HostValue, options: &ConversionOptions) -> ConversionResult<f64> {
        number_value(value, options).map(|x| x * 2.0)
    }

    fn to_string(&self,
                 _value: &HostValue,
                 _options: &ConversionOptions)
                 -> ConversionResult<HostString> {
        Ok(HostString::from("from the frame"))
    }
}

#[test]
fn every_type_name_resolves() {
    for name in TYPE_NAMES {
        assert!(lookup(name).is_some(), "no converter for {name}");
    }
    assert_eq!(TYPE_NAMES.len(), 37);
    assert!(lookup("Long").is_none());
}

#[test]
fn unknown_type_is_reported_before_parsing() {
    let err = convert_literal("record<DOMString, long>", "(", &ConversionOptions::default());
    assert!(matches!(err, Err(Error::UnknownType(name)) if name == "record<DOMString, long>"));
}

#[test]
fn wraparound() {
    assert_converts("octet", "256", "0");
    assert_converts("octet", "-1", "255");
    assert_converts("octet", "255.9", "255");
    assert_converts("unsigned short", "-1", "65535");
    assert_converts("short", "-32769", "32767");
}

#[test]
fn integer_conversion_is_idempotent() {
    let opts = ConversionOptions::default();

    for ty in [IntegerType::BYTE,
               IntegerType::OCTET,
               IntegerType::SHORT,
               IntegerType::UNSIGNED_SHORT,
               IntegerType::LONG,
               IntegerType::UNSIGNED_LONG]
    {
        for input in [-1e10, -129.5, -1.0, 0.0, 0.5, 200.0, 70000.0, 3e9, 1e15] {
            let once = ty.coerce(&input.into(), &opts).unwrap();
            #[allow(clippy::cast_precision_loss)]
            let twice = ty.coerce(&(once as f64).into(), &opts).unwrap();
            assert_eq!(once, twice, "{ty:?} on {input}");

            let (lower, upper) = ty.bounds();
            assert!((lower..=upper).contains(&once));
        }
    }

    let safe = BigInt::from(9_007_199_254_740_991_i64);
    for ty in [IntegerType::LONG_LONG, IntegerType::UNSIGNED_LONG_LONG] {
        let inputs = [HostValue::Number(-1e10),
                      HostValue::Number(-0.5),
                      HostValue::Number(1e19),
                      HostValue::Number(2f64.powi(63)),
                      HostValue::BigInt(BigInt::from(-1)),
                      HostValue::BigInt(BigInt::from(u64::MAX)),
                      HostValue::BigInt(BigInt::from(1u8) << 70u32),
                      HostValue::BigInt(-(BigInt::from(1u8) << 63u32) - 1)];

        for input in inputs {
            let once = ty.coerce_big(&input, &opts).unwrap();
            let twice = ty.coerce_big(&HostValue::BigInt(once.clone()), &opts).unwrap();
            assert_eq!(once, twice, "{ty:?} on {input}");

            if once <= safe && once >= -safe.clone() {
                let as_number = once.to_string().parse::<f64>().unwrap();
                let again = ty.coerce_big(&as_number.into(), &opts).unwrap();
                assert_eq!(once, again, "{ty:?} on {input} as a number");
            }
        }
    }
}

#[test]
fn objects_yielding_bigints_become_numbers() {
    let opts = ConversionOptions::default();
    let boxed = HostValue::object_with(Some(HostValue::BigInt(BigInt::from(5))), None);

    assert_eq!(convert("long", &boxed, &opts).unwrap(), convert("long", &5.into(), &opts).unwrap());
    assert_eq!(float::double(&boxed, &opts).unwrap(), 5.0);
    assert_eq!(IntegerType::LONG_LONG.coerce_big(&boxed, &opts).unwrap(), BigInt::from(5));

    assert_rejects("long",
                   "5n",
                   &opts,
                   "Value is a BigInt which cannot be converted to a number.");
}

#[test]
fn clamp_and_enforce_range_on_64_bit_types() {
    let clamp = ConversionOptions::default().with_clamp();
    let strict = ConversionOptions::default().with_enforce_range();

    let big = HostValue::BigInt(BigInt::from(1u8) << 70u32);
    assert_eq!(IntegerType::LONG_LONG.coerce_big(&big, &clamp).unwrap(),
               BigInt::from(9_007_199_254_740_991_i64));
    assert!(IntegerType::LONG_LONG.coerce_big(&big, &strict).is_err());
    assert_eq!(IntegerType::LONG_LONG.coerce_big(&big, &ConversionOptions::default()).unwrap(),
               BigInt::from(0));

    let nan = HostValue::Number(f64::NAN);
    assert_eq!(IntegerType::UNSIGNED_LONG_LONG.coerce_big(&nan, &clamp).unwrap(),
               BigInt::from(0));
    assert!(IntegerType::UNSIGNED_LONG_LONG.coerce_big(&nan, &strict).is_err());
}

#[test]
fn enforce_range_wins_over_clamp() {
    let both = ConversionOptions::default().with_clamp().with_enforce_range();
    assert!(IntegerType::OCTET.coerce(&300.into(), &both).is_err());
    assert_eq!(IntegerType::OCTET.coerce(&255.5.into(), &both).unwrap(), 255);
}

#[test]
fn float_narrowing() {
    let opts = ConversionOptions::default();
    assert!(float::float(&3.4e39.into(), &opts).is_err());
    assert_eq!(float::unrestricted_float(&3.4e39.into(), &opts).unwrap(), f32::INFINITY);

    let negative_zero = float::float(&(-0.0).into(), &opts).unwrap();
    assert!(negative_zero == 0.0 && negative_zero.is_sign_negative());

    let max = f64::from(f32::MAX);
    assert_eq!(float::float(&max.into(), &opts).unwrap(), f32::MAX);
}

#[test]
fn surrogate_repair() {
    let opts = ConversionOptions::default();
    let lone = HostValue::String(HostString::from_units(vec![0x61, 0xD800, 0x62]));
    assert_eq!(usv_string(&lone, &opts).unwrap(), "a\u{FFFD}b");

    let pair = HostValue::String(HostString::from_units(vec![0xD83D, 0xDE00]));
    assert_eq!(usv_string(&pair, &opts).unwrap(), "\u{1F600}");

    assert_eq!(usv_string(&"plain".into(), &opts).unwrap(), "plain");
}

#[test]
fn byte_string_boundaries() {
    let opts = ConversionOptions::default();
    let latin = HostValue::String(HostString::from_units(vec![0x00, 0x7F, 0xFF]));
    assert!(byte_string(&latin, &opts).is_ok());

    let wide = HostValue::String(HostString::from_units(vec![0x41, 0x100]));
    assert_eq!(byte_string(&wide, &opts).unwrap_err().message(),
               "Value is not a valid ByteString.");
}

#[test]
fn buffers_are_returned_by_identity() {
    let opts = ConversionOptions::default();
    let buffer = BufferRef::new(8);

    let Ok(IdlValue::Buffer(out)) = convert("ArrayBuffer", &buffer.clone().into(), &opts) else {
        panic!("ArrayBuffer conversion failed");
    };
    assert!(out.ptr_eq(&buffer));
    assert_ne!(out, BufferRef::new(8));

    let view = ViewRef::typed_with_length(ElementKind::Float32, 2);
    let Ok(IdlValue::View(out)) = convert("BufferSource", &view.clone().into(), &opts) else {
        panic!("BufferSource conversion failed");
    };
    assert!(out.ptr_eq(&view));
}

#[test]
fn detachment_is_observed_at_call_time() {
    let opts = ConversionOptions::default().with_allow_shared();
    let view = ViewRef::typed_with_length(ElementKind::Uint8, 4);
    let value = HostValue::from(view.clone());

    assert!(convert("Uint8Array", &value, &opts).is_ok());

    assert_eq!(view.buffer().detach(), Some(vec![0; 4]));
    let Err(Error::Conversion(err)) = convert("Uint8Array", &value, &opts) else {
        panic!("detached view was accepted");
    };
    assert_eq!(err.message(), "Value is a view on a detached ArrayBuffer.");
}

#[test]
fn shared_buffers_need_allow_shared() {
    let shared = ConversionOptions::default().with_allow_shared();
    let plain = ConversionOptions::default();

    assert_rejects("ArrayBuffer",
                   "SharedArrayBuffer(4)",
                   &plain,
                   "Value is not an ArrayBuffer.");
    assert!(convert_literal("ArrayBuffer", "SharedArrayBuffer(4)", &shared).is_ok());
    assert!(convert_literal("ArrayBufferView", "Int16Array(SharedArrayBuffer(4))", &shared).is_ok());
    assert_rejects("ArrayBufferView",
                   "Int16Array(SharedArrayBuffer(4))",
                   &plain,
                   "Value is a view on a SharedArrayBuffer, which is not allowed.");
}

#[test]
fn realm_builds_the_errors() {
    let opts = ConversionOptions::default().with_realm(Rc::new(Frame))
                                           .with_context("Argument 1");

    let Err(Error::Conversion(err)) = convert("object", &HostValue::Null, &opts) else {
        panic!("null was accepted as an object");
    };
    assert_eq!(err.message(), "Argument 1 is not an object.");
    assert_eq!(err.realm(), Some("frame"));

    let Err(Error::Conversion(err)) = convert("object", &HostValue::Null, &opts.clone().with_context("x"))
    else {
        panic!("null was accepted as an object");
    };
    assert_eq!(err.realm(), Some("frame"));

    let Err(Error::Conversion(err)) =
        convert("object", &HostValue::Null, &ConversionOptions::default())
    else {
        panic!("null was accepted as an object");
    };
    assert_eq!(err.realm(), None);
}

#[test]
fn realm_supplies_number_and_string_factories() {
    let opts = ConversionOptions::default().with_realm(Rc::new(Doubling));

    assert_eq!(convert("long", &21.into(), &opts).unwrap(), IdlValue::Integer(42));
    assert_eq!(convert("double", &1.5.into(), &opts).unwrap(), IdlValue::Double(3.0));
    assert_eq!(convert("DOMString", &5.into(), &opts).unwrap().to_string(),
               "\"from the frame\"");

    let Err(Error::Conversion(err)) = convert("long", &HostValue::BigInt(1.into()), &opts) else {
        panic!("BigInt was accepted as a long");
    };
    assert_eq!(err.realm(), Some("doubling"));
}

#[test]
fn options_from_json() {
    let opts = ConversionOptions::from_json(r#"{"enforceRange": true, "context": "Arg"}"#).unwrap();
    assert!(opts.enforce_range);
    assert!(!opts.clamp);
    assert_eq!(opts.context(), "Arg");

    assert!(ConversionOptions::from_json(r#"{"clamp": "yes"}"#).is_err());
    assert_rejects("octet", "-1", &opts, "Arg is outside the accepted range of 0 to 255, inclusive.");
}

#[test]
fn symbols_do_not_become_strings_or_numbers() {
    let opts = ConversionOptions::default();
    assert_rejects("DOMString",
                   "Symbol(\"s\")",
                   &opts,
                   "Value is a symbol, which cannot be converted to a string.");
    assert_rejects("USVString",
                   "Symbol()",
                   &opts,
                   "Value is a symbol, which cannot be converted to a string.");
    assert_rejects("unrestricted double",
                   "Symbol()",
                   &opts,
                   "Value is a symbol, which cannot be converted to a number.");
}

#[test]
fn any_and_undefined_pass_through() {
    let symbol = HostValue::symbol(Some("s"));
    let Ok(IdlValue::Any(out)) = convert("any", &symbol, &ConversionOptions::default()) else {
        panic!("any conversion failed");
    };
    assert_eq!(out, symbol);
    assert_ne!(out, HostValue::symbol(Some("s")));

    assert_eq!(convert("undefined", &5.into(), &ConversionOptions::default()).unwrap(),
               IdlValue::Undefined);
}

#[test]
fn typed_arrays_stringify_their_elements() {
    let opts = ConversionOptions::default();
    let view = ViewRef::typed_with_length(ElementKind::Int16, 3);
    assert!(view.buffer().write(0, &[1, 0, 0xFF, 0xFF, 0, 1]));

    let out = convert("DOMString", &view.into(), &opts).unwrap();
    assert_eq!(out.as_host_string().map(HostString::to_string_lossy),
               Some("1,-1,256".to_string()));

    let bytes = ViewRef::typed_with_length(ElementKind::Uint8, 1);
    assert!(!bytes.buffer().write(1, &[0]));
}

#[test]
fn typed_accessors() {
    let opts = ConversionOptions::default();

    let out = convert("unrestricted float", &0.1.into(), &opts).unwrap();
    assert_eq!(out.as_f64(), Some(f64::from(0.1_f32)));

    let out = convert("USVString", &"ok".into(), &opts).unwrap();
    assert_eq!(out.as_str(), Some("ok"));

    let out = convert("unsigned long long", &HostValue::BigInt(BigInt::from(-2)), &opts).unwrap();
    assert_eq!(out.as_bigint(), Some(&BigInt::from(u64::MAX - 1)));

    assert!(!IntegerType::OCTET.is_signed());
    assert_eq!(IntegerType::UNSIGNED_LONG_LONG.bit_length(), 64);
}
