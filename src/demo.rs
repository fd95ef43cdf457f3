//! Console demonstration: greeting lines, process properties, and a few
//! basic language features printed to stdout.

use crate::greeting::say_hello;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::{self, Write};

const DEMO_LANGUAGES: &[&str] = &["Rust", "Java", "Python", "JavaScript", "C++"];
const UNKNOWN_USER: &str = "unknown";

/// Ambient properties of the running process, read for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SystemInfo {
    pub runtime_version: String,
    pub operating_system: String,
    pub user: String,
}

impl SystemInfo {
    pub fn collect() -> Self {
        Self::collect_with(|key| env::var(key).ok())
    }

    /// Same as [`SystemInfo::collect`] with a pluggable environment lookup.
    pub fn collect_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let user = ["USER", "USERNAME"]
            .iter()
            .find_map(|key| lookup(key))
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        Self {
            runtime_version: format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
            operating_system: env::consts::OS.to_string(),
            user,
        }
    }
}

/// Writes the full demonstration text to `out`.
pub fn render<W: Write>(out: &mut W, info: &SystemInfo) -> io::Result<()> {
    writeln!(out, "{}", say_hello("World"))?;
    writeln!(out, "Welcome to the Rust Hello World application!")?;

    writeln!(out)?;
    writeln!(out, "System Information:")?;
    writeln!(out, "Runtime Version: {}", info.runtime_version)?;
    writeln!(out, "Operating System: {}", info.operating_system)?;
    writeln!(out, "User: {}", info.user)?;

    render_basic_functionality(out)
}

fn render_basic_functionality<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Basic Functionality Demo ===")?;

    let target = "Rust World";
    writeln!(out, "{}", say_hello(target))?;

    write!(out, "Supported languages:")?;
    for language in DEMO_LANGUAGES {
        write!(out, " {language}")?;
    }
    writeln!(out)?;

    let a: i32 = 10;
    let b: i32 = 20;
    let sum = a + b;
    writeln!(out, "Calculation: {a} + {b} = {sum}")?;

    writeln!(out)?;
    writeln!(out, "Application completed successfully!")?;
    out.flush()
}

/// Prints the demonstration to stdout.
///
/// Write failures (a closed pipe, for instance) are logged and swallowed so
/// the caller can always exit successfully.
pub fn run() {
    let info = SystemInfo::collect();
    tracing::debug!(
        runtime_version = %info.runtime_version,
        operating_system = %info.operating_system,
        "rendering demo"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(error) = render(&mut handle, &info) {
        tracing::warn!(%error, "failed to write demo output");
    }
}
