use anyhow::Result;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{format::FmtSpan, Layer as FmtLayer},
    layer::SubscriberExt as _,
    Layer as _, Registry,
};

pub(crate) struct Options {
    pub verbose: bool,
    pub color: bool,
}

impl Options {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::TRACE
        } else {
            LevelFilter::INFO
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.verbose {
            FmtSpan::FULL
        } else {
            // "reconcile system" start and end
            FmtSpan::NEW | FmtSpan::CLOSE
        }
    }
}

/// Install the global subscriber: plain log lines on stderr, so that `dump`
/// output on stdout stays a clean config file.
pub(crate) fn set_up(options: &Options) -> Result<()> {
    let fmt_layer = FmtLayer::new()
        .with_writer(std::io::stderr)
        .with_target(options.verbose)
        .with_span_events(options.span_events())
        .with_ansi(options.color)
        .with_filter(options.level());

    tracing::subscriber::set_global_default(Registry::default().with(fmt_layer))
        .map_err(|e| anyhow::anyhow!("failed to set up tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_level() {
        let quiet = Options {
            verbose: false,
            color: false,
        };
        let verbose = Options {
            verbose: true,
            color: false,
        };
        assert_eq!(quiet.level(), LevelFilter::INFO);
        assert_eq!(verbose.level(), LevelFilter::TRACE);
        assert_eq!(verbose.span_events(), FmtSpan::FULL);
    }
}
