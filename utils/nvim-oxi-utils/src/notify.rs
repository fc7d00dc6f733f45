use nvim_oxi::api;
use nvim_oxi::api::opts::EchoOpts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    const fn hl_group(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Warn => Some("WarningMsg"),
            Self::Error => Some("ErrorMsg"),
        }
    }
}

fn format_message(context: &str, message: &str) -> String {
    if context.is_empty() {
        message.to_string()
    } else {
        format!("{context}: {message}")
    }
}

fn echo(level: Level, context: &str, message: &str) {
    let text = format_message(context, message);
    let mut opts = EchoOpts::builder();
    if level == Level::Error {
        opts.err(true);
    }
    let result: nvim_oxi::Result<()> =
        api::echo([(text.as_str(), level.hl_group())], true, &opts.build()).map_err(Into::into);
    if let Err(err) = result {
        api::err_writeln(&format!("echo failed ({context}): {err}"));
    }
}

/// Plain message; an empty `context` prints `message` alone.
pub fn info(context: &str, message: &str) {
    echo(Level::Info, context, message);
}

pub fn warn(context: &str, message: &str) {
    echo(Level::Warn, context, message);
}

pub fn error(context: &str, message: &str) {
    echo(Level::Error, context, message);
}

#[cfg(test)]
mod tests {
    use super::format_message;

    #[test]
    fn context_prefixes_message() {
        assert_eq!(
            format_message("rs_quick_themes", "bad args"),
            "rs_quick_themes: bad args"
        );
    }

    #[test]
    fn empty_context_leaves_message_alone() {
        assert_eq!(format_message("", "Mariana (Mariana)"), "Mariana (Mariana)");
    }
}
