use std::fs::{self};

use walkdir::WalkDir;
use webidl_conversions::{ConversionOptions, convert_literal};

/// One fixture line: `type | options-json | literal | expected`.
struct Case<'a> {
    type_name: &'a str,
    options:   &'a str,
    literal:   &'a str,
    expected:  &'a str,
}

#[test]
fn fixtures_match() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/fixtures").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            count += 1;

            let case = parse_case(line).unwrap_or_else(|| {
                                           panic!("Malformed fixture at {path:?}:{}: {line}", i + 1)
                                       });
            let options = ConversionOptions::from_json(case.options).unwrap_or_else(|e| {
                              panic!("Bad options at {path:?}:{}: {e}", i + 1)
                          });

            let actual = match convert_literal(case.type_name, case.literal, &options) {
                Ok(value) => value.to_string(),
                Err(e) => format!("!{e}"),
            };

            assert_eq!(actual, case.expected, "Fixture {path:?}:{} failed: {line}", i + 1);
        }
    }

    assert!(count > 0, "No fixtures found in tests/fixtures");
}

fn parse_case(line: &str) -> Option<Case<'_>> {
    let mut fields = line.splitn(4, " | ").map(str::trim);

    Some(Case { type_name: fields.next()?,
                options:   fields.next()?,
                literal:   fields.next()?,
                expected:  fields.next()?, })
}
