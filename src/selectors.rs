//! Selector configuration for the notebook UI flavors the harness can drive.
//!
//! Different notebook UI generations expose different DOM hooks. Rather than
//! hardcoding them per code path, each flavor is a [`SelectorSet`] value: a
//! named, immutable mapping from semantic role to selector, passed in at
//! session construction. A new UI variant is a new value, not new code. The
//! set is serde-(de)serializable so variants can live in fixture files.

use serde::{Deserialize, Serialize};

/// DOM hooks for one notebook UI flavor.
///
/// Selectors are opaque strings with no uniqueness guarantee; a role's
/// selector may match zero, one, or many elements at any given time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Tag naming the UI flavor this set targets, e.g. `"notebook-classic"`.
    pub flavor: String,
    /// The dangerous-action confirmation button inside a modal dialog.
    pub confirm_button: String,
    /// The "Kernel" menu dropdown toggle.
    pub kernel_menu: String,
    /// The "Restart & Clear Output" menu action.
    pub restart_clear_action: String,
    /// The "Restart & Run All" menu action.
    pub restart_run_action: String,
    /// The "File" menu dropdown toggle.
    pub file_menu: String,
    /// The "Close and Halt" menu action.
    pub close_action: String,
    /// The container holding the notebook's cells and outputs.
    pub output_container: String,
    /// The notification area reflecting live kernel status text.
    pub notification_area: String,
}

impl SelectorSet {
    /// The classic (nbclassic-style) notebook UI.
    pub fn classic() -> Self {
        Self {
            flavor: "notebook-classic".to_string(),
            confirm_button: "div.modal-dialog button.btn-danger".to_string(),
            kernel_menu: "#kernellink".to_string(),
            restart_clear_action: "#restart_clear_output a".to_string(),
            restart_run_action: "#restart_run_all a".to_string(),
            file_menu: "#filelink".to_string(),
            close_action: "#close_and_halt a".to_string(),
            output_container: "#notebook-container".to_string(),
            notification_area: "#notification_kernel".to_string(),
        }
    }
}
