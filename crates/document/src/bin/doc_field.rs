//! `doc-field` — print one field of a JSON document.
//!
//! Usage:
//!   doc-field <path> [--as json|string|int|float|bool]
//!
//! The document is read from stdin. Exits with status 1 when the field is
//! absent or cannot be converted.

use arango_document::cli::{init_tracing, lookup_field, FieldFormat};
use std::io::{self, Read, Write};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut path = None;
    let mut format = FieldFormat::default();
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--as" => match rest.next().map(|name| name.parse::<FieldFormat>()) {
                Some(Ok(parsed)) => format = parsed,
                Some(Err(e)) => fail(&e),
                None => fail(&"--as requires a format"),
            },
            _ if path.is_none() => path = Some(arg.clone()),
            other => fail(&format!("unexpected argument: {other}")),
        }
    }
    let Some(path) = path else {
        fail(&"First argument must be a field path.");
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        fail(&e);
    }

    match lookup_field(buf.trim(), &path, format) {
        Ok(result) => {
            let mut out = io::stdout().lock();
            if let Err(e) = writeln!(out, "{result}") {
                fail(&e);
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(message: &dyn std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
