//! Layer builders shared by the configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::RunsweepConfig;
use crate::github::filter::RunFilter;

/// Where a configuration layer comes from, lowest precedence first.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `layers` in order into a [`RunsweepConfig`].
pub fn compose(layers: impl IntoIterator<Item = (Source, Value)>) -> RunsweepConfig {
    let mut composer = MergeComposer::new();
    for (source, value) in layers {
        match source {
            Source::Defaults => composer.push_defaults(value),
            Source::File => composer.push_file(value, None),
            Source::Environment => composer.push_environment(value),
            Source::Cli => composer.push_cli(value),
        }
    }
    RunsweepConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Merges `layers` and resolves the run filter they describe.
pub fn filter_from_layers(layers: impl IntoIterator<Item = (Source, Value)>) -> RunFilter {
    compose(layers)
        .run_filter()
        .expect("layered filter should be valid")
}
