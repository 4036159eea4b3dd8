use clap::Parser;
use tracing_subscriber::EnvFilter;
use webidl_conversions::{ConversionOptions, TYPE_NAMES, convert_literal};

/// webidl converts a host value, written in literal notation, to a Web IDL
/// type and prints the canonical result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Name of the IDL type, such as `long`, `USVString` or `Uint8Array`.
    #[arg(required_unless_present = "list")]
    type_name: Option<String>,

    /// The value to convert, such as `-0`, `"abc"`, `12n` or
    /// `detached ArrayBuffer(8)`.
    #[arg(required_unless_present = "list", allow_hyphen_values = true)]
    value: Option<String>,

    /// Conversion options as a JSON object; the flags below are applied on top.
    #[arg(short, long)]
    options: Option<String>,

    /// Reject out-of-range and non-finite integers.
    #[arg(long)]
    enforce_range: bool,

    /// Saturate out-of-range integers.
    #[arg(long)]
    clamp: bool,

    /// Convert `null` to the empty string.
    #[arg(long)]
    treat_null_as_empty_string: bool,

    /// Accept shared buffers and views over them.
    #[arg(long)]
    allow_shared: bool,

    /// Prefix for error messages.
    #[arg(short, long)]
    context: Option<String>,

    /// Lists every supported type name and exits.
    #[arg(short, long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr)
                             .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                                                  EnvFilter::new("warn")
                                                                              }))
                             .init();

    let args = Args::parse();

    if args.list {
        for name in TYPE_NAMES {
            println!("{name}");
        }
        return;
    }

    let options = build_options(&args);

    let (Some(type_name), Some(value)) = (&args.type_name, &args.value) else {
        eprintln!("Both a type name and a value are required.");
        std::process::exit(2);
    };

    match convert_literal(type_name, value, &options) {
        Ok(result) => println!("{result}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

/// Merges the JSON options with the command-line flags.
fn build_options(args: &Args) -> ConversionOptions {
    let mut options = match &args.options {
        Some(json) => ConversionOptions::from_json(json).unwrap_or_else(|e| {
                                                            eprintln!("Invalid options '{json}': {e}");
                                                            std::process::exit(2);
                                                        }),
        None => ConversionOptions::default(),
    };

    options.enforce_range |= args.enforce_range;
    options.clamp |= args.clamp;
    options.treat_null_as_empty_string |= args.treat_null_as_empty_string;
    options.allow_shared |= args.allow_shared;
    if let Some(context) = &args.context {
        options.context = Some(context.clone());
    }

    tracing::debug!(?options, "resolved conversion options");
    options
}
