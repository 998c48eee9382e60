use crate::intent::{Extra, Intent, IntentFilter};

/// One launch request. Borrowed by strategies for the duration of an attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    pub intent: Intent,
    /// Declared intent filters; empty unless the component declares any.
    pub filters: Vec<IntentFilter>,
    pub extras: Vec<Extra>,
}

impl LaunchArgs {
    /// Extras are also put on the intent so binder calls deliver them.
    pub fn new(mut intent: Intent, filters: Vec<IntentFilter>, extras: Vec<Extra>) -> Self {
        for extra in &extras {
            intent.put_extra(extra.clone());
        }
        Self {
            intent,
            filters,
            extras,
        }
    }

    /// Appends action, extras and categories as `am` arguments.
    pub fn add_to_command(&self, command: &mut String) {
        if let Some(action) = &self.intent.action {
            command.push_str(&format!(" -a {action}"));
        }

        for extra in &self.extras {
            command.push_str(&format!(
                " --{} \"{}\" \"{}\"",
                extra.safe_kind().shell_arg_name(),
                extra.key,
                extra.value
            ));
        }

        for category in &self.intent.categories {
            command.push_str(&format!(" -c \"{category}\""));
        }
    }
}
