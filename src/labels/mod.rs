pub mod detect;
pub mod palette;
pub mod reconcile;

use crate::github::IssueTracker;
use crate::settings::{SettingsKeys, SettingsStore};

/// Label literally applied to issues about sample code.
pub const SAMPLES_LABEL: &str = "samples";

/// Collaborators shared by every reconciliation in one event.
pub struct LabelContext<'a> {
    pub tracker: &'a dyn IssueTracker,
    pub settings: &'a dyn SettingsStore,
    pub keys: &'a SettingsKeys,
}
