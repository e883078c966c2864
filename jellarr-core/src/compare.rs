//! Field comparators.
//!
//! Every comparator answers "would applying `desired` change `current`?" for a
//! single field. An absent desired field never differs.

use crate::model::{PluginRepository, SystemSpec, SystemState};

pub fn enable_metrics_changed(current: &SystemState, desired: &SystemSpec) -> bool {
    match desired.enable_metrics {
        Some(enable_metrics) => enable_metrics != current.enable_metrics,
        None => false,
    }
}

pub fn plugin_repositories_changed(current: &SystemState, desired: &SystemSpec) -> bool {
    match &desired.plugin_repositories {
        Some(repos) => !equal_repos_unordered(&current.plugin_repositories, repos),
        None => false,
    }
}

/// Only the sub-fields present in the desired record are compared.
pub fn trickplay_options_changed(current: &SystemState, desired: &SystemSpec) -> bool {
    let Some(options) = &desired.trickplay_options else {
        return false;
    };
    let current = &current.trickplay_options;
    sub_field_changed(options.enable_hw_acceleration, current.enable_hw_acceleration)
        || sub_field_changed(options.enable_hw_encoding, current.enable_hw_encoding)
}

fn sub_field_changed(desired: Option<bool>, current: bool) -> bool {
    desired.is_some_and(|desired| desired != current)
}

/// Multiset equality of two repository lists, ignoring order.
pub fn equal_repos_unordered(a: &[PluginRepository], b: &[PluginRepository]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    sort_repos(&mut a);
    sort_repos(&mut b);
    a == b
}

/// Canonical order: see the `Ord` impl of [`PluginRepository`].
pub fn sort_repos(repos: &mut [PluginRepository]) {
    repos.sort();
}

/// Which fields of a [`SystemSpec`] differ from a [`SystemState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemDiff {
    pub enable_metrics: bool,
    pub plugin_repositories: bool,
    pub trickplay_options: bool,
}

impl SystemDiff {
    pub fn between(current: &SystemState, desired: &SystemSpec) -> SystemDiff {
        SystemDiff {
            enable_metrics: enable_metrics_changed(current, desired),
            plugin_repositories: plugin_repositories_changed(current, desired),
            trickplay_options: trickplay_options_changed(current, desired),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.enable_metrics || self.plugin_repositories || self.trickplay_options
    }

    /// Names of the changed fields, as they appear in a config file.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            (self.enable_metrics, "enableMetrics"),
            (self.plugin_repositories, "pluginRepositories"),
            (self.trickplay_options, "trickplayOptions"),
        ]
        .into_iter()
        .filter_map(|(changed, name)| changed.then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrickplayOptions, TrickplayOptionsSpec};

    fn repo(name: &str, url: &str, enabled: bool) -> PluginRepository {
        PluginRepository::new(name, url, enabled)
    }

    fn state() -> SystemState {
        SystemState {
            enable_metrics: true,
            plugin_repositories: vec![repo("A", "u1", true), repo("B", "u2", false)],
            trickplay_options: TrickplayOptions {
                enable_hw_acceleration: false,
                enable_hw_encoding: true,
            },
        }
    }

    #[test]
    fn test_equal_repos_unordered() {
        let a = vec![repo("A", "u1", true), repo("B", "u2", false)];
        let b = vec![repo("B", "u2", false), repo("A", "u1", true)];
        let c = vec![repo("A", "u1", false)];
        assert!(equal_repos_unordered(&a, &b));
        assert!(!equal_repos_unordered(&a, &c));
    }

    #[test]
    fn test_equal_repos_unordered_counts_duplicates() {
        let a = vec![repo("A", "u1", true), repo("A", "u1", true)];
        let b = vec![repo("A", "u1", true), repo("B", "u2", true)];
        assert!(!equal_repos_unordered(&a, &b));
        assert!(equal_repos_unordered(&a, &a.clone()));
    }

    #[test]
    fn test_equal_repos_unordered_enabled_is_significant() {
        let a = vec![repo("A", "u1", true)];
        let b = vec![repo("A", "u1", false)];
        assert!(!equal_repos_unordered(&a, &b));
    }

    #[test]
    fn test_equal_repos_unordered_leaves_inputs_unsorted() {
        let a = vec![repo("B", "u2", false), repo("A", "u1", true)];
        let b = a.clone();
        equal_repos_unordered(&a, &b);
        assert_eq!(a[0].name, "B");
    }

    #[test]
    fn test_absent_fields_never_differ() {
        let diff = SystemDiff::between(&state(), &SystemSpec::default());
        assert_eq!(diff, SystemDiff::default());
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_enable_metrics_changed() {
        let desired = SystemSpec {
            enable_metrics: Some(false),
            ..Default::default()
        };
        assert!(enable_metrics_changed(&state(), &desired));
        let desired = SystemSpec {
            enable_metrics: Some(true),
            ..Default::default()
        };
        assert!(!enable_metrics_changed(&state(), &desired));
    }

    #[test]
    fn test_empty_repository_list_is_compared_literally() {
        let desired = SystemSpec {
            plugin_repositories: Some(vec![]),
            ..Default::default()
        };
        assert!(plugin_repositories_changed(&state(), &desired));
        assert!(!plugin_repositories_changed(&SystemState::default(), &desired));
    }

    #[test]
    fn test_plugin_repositories_permutation_is_unchanged() {
        let desired = SystemSpec {
            plugin_repositories: Some(vec![repo("B", "u2", false), repo("A", "u1", true)]),
            ..Default::default()
        };
        assert!(!plugin_repositories_changed(&state(), &desired));
    }

    #[test]
    fn test_trickplay_options_changed() {
        let desired = SystemSpec {
            trickplay_options: Some(TrickplayOptionsSpec {
                enable_hw_acceleration: Some(true),
                enable_hw_encoding: None,
            }),
            ..Default::default()
        };
        assert!(trickplay_options_changed(&state(), &desired));
        assert!(!trickplay_options_changed(&state().merged_with(&desired), &desired));
    }

    #[test]
    fn test_empty_trickplay_options_never_differ() {
        let desired = SystemSpec {
            trickplay_options: Some(TrickplayOptionsSpec::default()),
            ..Default::default()
        };
        let mut current = state();
        current.trickplay_options.enable_hw_acceleration = true;
        assert!(!trickplay_options_changed(&current, &desired));
        current.trickplay_options.enable_hw_acceleration = false;
        assert!(!trickplay_options_changed(&current, &desired));
    }

    #[test]
    fn test_trickplay_options_only_compare_present_sub_fields() {
        let desired = SystemSpec {
            trickplay_options: Some(TrickplayOptionsSpec {
                enable_hw_acceleration: None,
                enable_hw_encoding: Some(true),
            }),
            ..Default::default()
        };
        assert!(!trickplay_options_changed(&state(), &desired));

        let mut current = state();
        current.trickplay_options.enable_hw_encoding = false;
        assert!(trickplay_options_changed(&current, &desired));
    }

    #[test]
    fn test_changed_fields() {
        let diff = SystemDiff {
            enable_metrics: true,
            plugin_repositories: false,
            trickplay_options: true,
        };
        assert!(diff.has_changes());
        assert_eq!(diff.changed_fields(), vec!["enableMetrics", "trickplayOptions"]);
    }
}
