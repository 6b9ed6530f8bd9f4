use std::io::{self, Write};

use shopify_components::config::ConfigWarning;
use shopify_components::BuildEvent;

/// Print one NDJSON line to stdout
pub fn emit_json(value: serde_json::Value) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{value}")
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, w.file.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Event sink printing NDJSON to stdout, or human lines (errors to stderr)
pub fn event_printer(json: bool) -> impl Fn(BuildEvent) + 'static {
    move |event| {
        if json {
            println!("{}", event.to_json());
        } else if event.is_error() {
            eprintln!("{event}");
        } else {
            println!("{event}");
        }
    }
}
