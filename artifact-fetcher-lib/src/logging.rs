use anyhow::Result;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::span::Record;
use tracing::{Event, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::style::ProgressStyle;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

/// Style for asset downloads. Assets without a known size only show the byte count.
pub fn progress_bar_style() -> Result<ProgressStyle> {
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
    )?
    .progress_chars("=> ")
    .tick_strings(TICKS);
    Ok(style)
}

pub fn spinner_style(template: &str) -> Result<ProgressStyle> {
    let style = ProgressStyle::with_template(&format!("{{spinner:.green}} {template}"))?
        .tick_strings(TICKS);
    Ok(style)
}

/// Installs the global subscriber: bare messages on stdout plus progress bars.
/// `verbose` also shows debug events, such as skipped release entries.
pub fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(false)
        .without_time()
        .event_format(MessageOnlyFormat)
        .fmt_fields(MessageOnlyFormat);

    tracing_subscriber::registry()
        .with(level)
        .with(fmt_layer)
        .with(IndicatifLayer::new())
        .init();
}

/// Writes an event as its `message` field followed by a newline, without
/// level, target or span context.
#[derive(Clone, Debug, Default)]
pub struct MessageOnlyFormat;

impl<'writer> FormatFields<'writer> for MessageOnlyFormat {
    fn format_fields<R: RecordFields>(
        &self,
        mut writer: Writer<'writer>,
        fields: R,
    ) -> std::fmt::Result {
        struct MessageVisitor<'a, 'w> {
            writer: &'a mut Writer<'w>,
            result: std::fmt::Result,
        }

        impl Visit for MessageVisitor<'_, '_> {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.result = write!(self.writer, "{value:?}");
                }
            }
        }

        let mut visitor = MessageVisitor {
            writer: &mut writer,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }

    fn add_fields(
        &self,
        _current: &'writer mut FormattedFields<Self>,
        _fields: &Record<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

impl<S, N> FormatEvent<S, N> for MessageOnlyFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_compile() {
        assert!(progress_bar_style().is_ok());
        assert!(spinner_style("{msg}").is_ok());
    }
}
