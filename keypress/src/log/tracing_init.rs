// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayPreference, TracingConfig, WriterConfig, rolling_file_appender_impl};
use miette::IntoDiagnostic as _;
use tracing::subscriber::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt as _, registry::LookupSpan,
                         util::SubscriberInitExt as _};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Returns the layers, or `None` if `tracing_config` has logging turned off. This does
/// not initialize the tracing system; [`TracingConfig::install_global`] and
/// [`TracingConfig::install_thread_local`] do that.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    if !tracing_config.is_enabled() {
        return Ok(None);
    }

    let level_filter = tracing_config.level_filter;
    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter for the whole stack, not just per layer.
    return_it.push(Box::new(level_filter));

    if let Some(layer) =
        try_create_display_layer(level_filter, &tracing_config.writer_config)
    {
        return_it.push(layer);
    }

    if let Some(layer) =
        try_create_file_layer(level_filter, &tracing_config.writer_config)?
    {
        return_it.push(layer);
    }

    Ok(Some(return_it))
}

/// This erases the concrete type of the writer, and returns a boxed layer.
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    match writer_config {
        WriterConfig::DisplayAndFile(display_pref, _)
        | WriterConfig::Display(display_pref) => match display_pref {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
        },
        WriterConfig::None | WriterConfig::File(_) => None,
    }
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!().with_ansi(false);

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, file_path) | WriterConfig::File(file_path) => {
            let file = rolling_file_appender_impl::try_create(file_path)?;
            Some(Box::new(
                fmt_layer.with_writer(file).with_filter(level_filter),
            ))
        }
        WriterConfig::None | WriterConfig::Display(_) => None,
    })
}

impl TracingConfig {
    /// Global default subscriber, which once set, can't be unset or changed. This is
    /// great for apps. No-op when logging is turned off.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created or a global subscriber is
    /// already set.
    pub fn install_global(&self) -> miette::Result<()> {
        match try_create_layers(self)? {
            Some(layers) => tracing_subscriber::registry()
                .with(layers)
                .try_init()
                .into_diagnostic(),
            None => Ok(()),
        }
    }

    /// Thread local subscriber, active until the returned guard is dropped. This is
    /// great for tests. `None` when logging is turned off.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created.
    pub fn install_thread_local(&self) -> miette::Result<Option<DefaultGuard>> {
        Ok(try_create_layers(self)?
            .map(|layers| tracing_subscriber::registry().with(layers).set_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// A fresh log file path under the system temp dir, unique to this test.
    fn temp_log_path(test_name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "r3bl_keypress_{}_{test_name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("keypress.log");
        drop(std::fs::remove_file(&path));
        path
    }

    #[test]
    fn test_try_create_display_layer() {
        let tracing_config =
            TracingConfig::new_display(DisplayPreference::Stderr, LevelFilter::DEBUG);
        assert!(tracing_config.is_enabled());
        assert_eq!(
            tracing_config.writer_config,
            WriterConfig::Display(DisplayPreference::Stderr)
        );
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(
                tracing_config.level_filter,
                &tracing_config.writer_config,
            );
        assert!(layer.is_some());

        let layers = try_create_layers(&tracing_config).unwrap().unwrap();
        assert_eq!(layers.len(), 2);

        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, &WriterConfig::None);
        assert!(layer.is_none());
    }

    #[test]
    fn test_try_create_file_layer() {
        let file_path = temp_log_path("file_layer");
        let writer_config = WriterConfig::File(file_path.to_string_lossy().into());
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, &writer_config).unwrap();

        assert!(layer.is_some());
        assert!(file_path.exists());
    }

    #[test]
    fn test_try_create_both_layers() {
        let file_path = temp_log_path("both_layers");
        let tracing_config = TracingConfig {
            writer_config: WriterConfig::DisplayAndFile(
                DisplayPreference::Stdout,
                file_path.to_string_lossy().into(),
            ),
            level_filter: LevelFilter::DEBUG,
        };

        let layers = try_create_layers(&tracing_config).unwrap().unwrap();
        assert_eq!(layers.len(), 3);
        assert!(file_path.exists());
    }

    #[test]
    fn test_logging_off_creates_nothing() {
        let file_path = temp_log_path("logging_off");
        let tracing_config =
            TracingConfig::new_file(file_path.to_string_lossy(), LevelFilter::OFF);

        assert!(try_create_layers(&tracing_config).unwrap().is_none());
        assert!(tracing_config.install_thread_local().unwrap().is_none());
        assert!(!file_path.exists());
        assert!(TracingConfig::default().install_thread_local().unwrap().is_none());
    }

    #[test]
    fn test_install_thread_local_writes_to_file() {
        let file_path = temp_log_path("thread_local");
        let guard = TracingConfig::new_file(file_path.to_string_lossy(), LevelFilter::INFO)
            .install_thread_local()
            .unwrap();

        tracing::warn!("terminal went away");
        tracing::debug!("below the level filter");
        drop(guard);

        let contents = std::fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("terminal went away"));
        assert!(contents.contains("WARN"));
        assert!(!contents.contains("below the level filter"));
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        // A plain file where the log folder should be.
        let blocker = temp_log_path("unwritable").with_file_name("blocker");
        std::fs::write(&blocker, b"not a folder").unwrap();
        let file_path = blocker.join("keypress.log").to_string_lossy().into_owned();

        let tracing_config = TracingConfig::new_file(file_path, LevelFilter::DEBUG);
        assert!(try_create_layers(&tracing_config).is_err());
    }
}
