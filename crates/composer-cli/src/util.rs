use std::fmt::Display;
use std::io::Read;
use std::path::Path;

/// Reads `path`, or stdin if `path` is `None`. Exits the process on any
/// I/O failure, matching the other commands' "print and exit" error
/// style rather than threading a `Result` up through `main`.
pub fn read_input(path: Option<&Path>) -> String {
    match path {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {}: {e}", path.display()))),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| fail(format!("reading stdin: {e}")));
            buf
        }
    }
}

pub fn parse_json<T: serde::de::DeserializeOwned>(source: &str, what: &str) -> T {
    serde_json::from_str(source).unwrap_or_else(|e| fail(format!("{what} is not valid JSON: {e}")))
}

/// Prints `message` to stderr prefixed with `error: ` and exits with
/// status 1. Never returns; typed to unify with `unwrap_or_else` call
/// sites that need a value of any type on the never-taken success arm.
pub fn fail<T>(message: impl Display) -> T {
    eprintln!("error: {message}");
    std::process::exit(1);
}
