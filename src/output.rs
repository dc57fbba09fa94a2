//! User-facing console lines.
//!
//! Status messages get a colored prefix when stdout is a TTY. Primary results
//! (tree and leaf names, theme status) go through [`print_user`] unadorned so
//! they stay script-friendly.

use owo_colors::OwoColorize;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

#[derive(Clone, Copy)]
enum Kind {
    Info,
    Warn,
    Error,
    Success,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Info => "info:",
            Kind::Warn => "warn:",
            Kind::Error => "error:",
            Kind::Success => "ok:",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Kind::Warn | Kind::Error)
    }
}

fn emit(kind: Kind, msg: &str) {
    let label = kind.label();
    let line = if is_tty() {
        let prefix = match kind {
            Kind::Info => label.cyan().bold().to_string(),
            Kind::Warn => label.yellow().bold().to_string(),
            Kind::Error => label.red().bold().to_string(),
            Kind::Success => label.green().bold().to_string(),
        };
        format!("{prefix} {msg}")
    } else {
        format!("{label} {msg}")
    };
    if kind.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Kind::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Kind::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Kind::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Kind::Success, msg);
}

/// Print a plain line (no prefix).
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// Print each item on its own plain line.
pub fn print_lines<I, S>(items: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for item in items {
        print_user(item.as_ref());
    }
}
