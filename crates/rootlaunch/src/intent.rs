//! Intent model consumed by every launch strategy.
//!
//! These types mirror the subset of `android.content.Intent` and
//! `android.content.IntentFilter` the launcher needs: enough to address a
//! component, describe a synthesized intent, and render it as `am` arguments.

use serde::{Deserialize, Serialize};

pub const ACTION_MAIN: &str = "android.intent.action.MAIN";
pub const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";

pub const FLAG_ACTIVITY_NEW_TASK: u32 = 0x1000_0000;

/// Fully qualified component identity (`package/class`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    pub fn flatten(&self) -> String {
        format!("{}/{}", self.package, self.class)
    }

    /// Parses `package/class`. A class starting with `.` is relative to the package.
    pub fn unflatten(value: &str) -> Option<Self> {
        let (package, class) = value.split_once('/')?;
        if package.is_empty() || class.is_empty() {
            return None;
        }
        let class = if class.starts_with('.') {
            format!("{package}{class}")
        } else {
            class.to_string()
        };
        Some(Self::new(package, class))
    }
}

/// Type tag of a user-supplied extra, with the `am` flag it renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraType {
    String,
    Integer,
    Long,
    Float,
    Boolean,
    Uri,
    ComponentName,
    IntArray,
    LongArray,
    FloatArray,
    StringArray,
    NullString,
}

impl ExtraType {
    pub fn shell_arg_name(self) -> &'static str {
        match self {
            ExtraType::String => "es",
            ExtraType::Integer => "ei",
            ExtraType::Long => "el",
            ExtraType::Float => "ef",
            ExtraType::Boolean => "ez",
            ExtraType::Uri => "eu",
            ExtraType::ComponentName => "ecn",
            ExtraType::IntArray => "eia",
            ExtraType::LongArray => "ela",
            ExtraType::FloatArray => "efa",
            ExtraType::StringArray => "esa",
            ExtraType::NullString => "esn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub key: String,
    pub value: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExtraType>,
}

impl Extra {
    pub fn new(key: impl Into<String>, kind: ExtraType, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: Some(kind),
        }
    }

    /// Untagged extras are delivered as strings.
    pub fn safe_kind(&self) -> ExtraType {
        self.kind.unwrap_or(ExtraType::String)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: Option<String>,
    pub component: Option<ComponentName>,
    pub categories: Vec<String>,
    pub data: Option<String>,
    pub flags: u32,
    pub extras: Vec<Extra>,
}

impl Intent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_component(component: ComponentName) -> Self {
        Self {
            component: Some(component),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.add_category(category);
        self
    }

    pub fn add_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    pub fn add_flags(&mut self, flags: u32) {
        self.flags |= flags;
    }

    /// Replaces an extra with the same key, keeping its original position.
    pub fn put_extra(&mut self, extra: Extra) {
        match self.extras.iter_mut().find(|existing| existing.key == extra.key) {
            Some(existing) => *existing = extra,
            None => self.extras.push(extra),
        }
    }
}

/// Manifest-declared intent filter, already resolved by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentFilter {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub data_schemes: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl IntentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.data_schemes.push(scheme.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn first_action(&self) -> Option<&str> {
        self.actions.first().map(String::as_str)
    }

    pub fn first_scheme(&self) -> Option<&str> {
        self.data_schemes.first().map(String::as_str)
    }
}
