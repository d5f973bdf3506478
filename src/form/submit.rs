use std::mem;

/// Submit-control state. Disabling it while a submission is in flight is the
/// only guard against a second submission from the same form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: String,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }
}

/// Scoped lock on the submit control. Disables the button and swaps in a
/// busy label; restores both when dropped, on every exit path.
pub struct BusyGuard<'a> {
    button: &'a mut SubmitButton,
    restore_label: String,
}

impl<'a> BusyGuard<'a> {
    pub fn hold(button: &'a mut SubmitButton, busy_label: &str) -> Self {
        button.enabled = false;
        let restore_label = mem::replace(&mut button.label, busy_label.to_string());
        Self {
            button,
            restore_label,
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.button.enabled = true;
        self.button.label = mem::take(&mut self.restore_label);
    }
}
