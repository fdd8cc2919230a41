// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{
    Args, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use owo_colors::{OwoColorize, Style, style};
use std::{
    fmt,
    io::{self, BufWriter, Write},
    sync::Once,
};
use swrite::{SWrite, swrite};
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    level_filters::LevelFilter,
    warn,
};
use tracing_subscriber::{
    Layer,
    filter::Targets,
    fmt::{FmtContext, FormatEvent, FormatFields, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Events logged to this target are printed without a level prefix.
pub(crate) const NO_HEADING: &str = "depgraph::no_heading";

pub(crate) const fn clap_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
}

#[derive(Copy, Clone, Debug, Args)]
#[must_use]
pub(crate) struct OutputOpts {
    /// List every artifact written and log at debug level
    #[arg(long, short, global = true, env = "DEPGRAPH_VERBOSE")]
    pub(crate) verbose: bool,

    /// Produce color output: auto, always, never
    #[arg(
        long,
        value_enum,
        default_value_t,
        hide_possible_values = true,
        global = true,
        value_name = "WHEN",
        env = "DEPGRAPH_COLOR"
    )]
    pub(crate) color: Color,
}

impl OutputOpts {
    /// Installs the logger and returns the resulting context.
    pub(crate) fn init(self) -> OutputContext {
        let OutputOpts { verbose, color } = self;
        init_logger(color.should_colorize(supports_color::Stream::Stderr), verbose);
        OutputContext { verbose, color }
    }
}

#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct OutputContext {
    pub(crate) verbose: bool,
    pub(crate) color: Color,
}

impl OutputContext {
    /// Returns the styles used for error messages.
    pub fn stderr_styles(&self) -> StderrStyles {
        let colorize = self.color.should_colorize(supports_color::Stream::Stderr);
        StderrStyles {
            bold: if colorize { style().bold() } else { Style::new() },
        }
    }

    /// Returns the styles used for the summary and the options listing.
    pub(crate) fn stdout_styles(&self) -> StdoutStyles {
        if !self.color.should_colorize(supports_color::Stream::Stdout) {
            return StdoutStyles::default();
        }
        StdoutStyles {
            option: style().bold(),
            default_value: style().green().bold(),
            count: style().bold(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
#[must_use]
pub enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

impl Color {
    pub(crate) fn should_colorize(self, stream: supports_color::Stream) -> bool {
        match self {
            Color::Auto => supports_color::on_cached(stream).is_some(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

static INIT_LOGGER: Once = Once::new();

fn init_logger(colorize: bool, verbose: bool) {
    INIT_LOGGER.call_once(|| {
        let (targets, invalid) =
            log_targets(std::env::var("DEPGRAPH_LOG").ok().as_deref(), verbose);

        let layer = tracing_subscriber::fmt::layer()
            .event_format(LogFormatter { colorize })
            .with_writer(io::stderr)
            .with_filter(targets);
        tracing_subscriber::registry().with(layer).init();

        if let Some(invalid) = invalid {
            warn!("ignoring invalid DEPGRAPH_LOG value `{invalid}`");
        }
    });
}

/// Builds the log filter from `DEPGRAPH_LOG`, falling back to the verbosity default.
///
/// Also returns the value if it could not be parsed.
fn log_targets(level_str: Option<&str>, verbose: bool) -> (Targets, Option<String>) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let default = Targets::new().with_default(level);

    match level_str {
        None | Some("") => (default, None),
        Some(level_str) => match level_str.parse() {
            Ok(targets) => (targets, None),
            Err(_) => (default, Some(level_str.to_owned())),
        },
    }
}

/// Prints `<level>: <message>` lines, or the bare message for [`NO_HEADING`].
struct LogFormatter {
    colorize: bool,
}

impl LogFormatter {
    fn heading(&self, level: Level) -> (&'static str, Style) {
        let (label, colored) = match level {
            Level::ERROR => ("error", style().red().bold()),
            Level::WARN => ("warning", style().yellow().bold()),
            Level::INFO => ("info", style().bold()),
            Level::DEBUG => ("debug", style().bold()),
            Level::TRACE => ("trace", style().dimmed()),
        };
        (label, if self.colorize { colored } else { Style::new() })
    }
}

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        if metadata.target() != NO_HEADING {
            let (label, style) = self.heading(*metadata.level());
            write!(writer, "{}: ", label.style(style))?;
        }

        let mut message = MessageText::default();
        event.record(&mut message);
        writeln!(writer, "{}", message.0)
    }
}

/// Collects the `message` field of an event. Other fields are not printed.
#[derive(Default)]
struct MessageText(String);

impl Visit for MessageText {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            swrite!(self.0, "{value:?}");
        }
    }
}

#[derive(Debug, Default)]
pub struct StderrStyles {
    pub(crate) bold: Style,
}

#[derive(Debug, Default)]
pub(crate) struct StdoutStyles {
    pub(crate) option: Style,
    pub(crate) default_value: Style,
    pub(crate) count: Style,
}

/// Where stdout goes. Tests capture it in memory.
#[derive(Default)]
pub enum OutputWriter {
    #[default]
    Normal,
    #[cfg(test)]
    Test { stdout: Vec<u8> },
}

impl OutputWriter {
    pub(crate) fn stdout_writer(&mut self) -> Box<dyn Write + '_> {
        match self {
            Self::Normal => Box::new(BufWriter::new(io::stdout().lock())),
            #[cfg(test)]
            Self::Test { stdout } => Box::new(stdout),
        }
    }
}
