//! Version-banded call shapes for the activity manager.
//!
//! The activity manager's start methods changed signature across releases.
//! Each band below is one contiguous SDK range sharing a single shape; the
//! band is picked once from the running SDK when a call target is built and
//! the matching variant is handed to [`ActivityManager`](super::ActivityManager).

use crate::intent::Intent;

use super::types::{SdkVersion, OP_NONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityBand {
    /// `startActivityWithFeature`, R and later.
    WithFeature,
    /// `startActivity`, deprecated but still served before R.
    Legacy,
}

impl ActivityBand {
    pub fn for_sdk(sdk: SdkVersion) -> Self {
        if sdk.at_least(SdkVersion::R) {
            ActivityBand::WithFeature
        } else {
            ActivityBand::Legacy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartActivityCall {
    WithFeature {
        calling_package: Option<String>,
        calling_feature_id: Option<String>,
        intent: Intent,
        start_flags: i32,
    },
    Legacy {
        calling_package: Option<String>,
        intent: Intent,
        start_flags: i32,
    },
}

impl StartActivityCall {
    pub fn new(band: ActivityBand, calling_package: Option<String>, intent: Intent) -> Self {
        match band {
            ActivityBand::WithFeature => StartActivityCall::WithFeature {
                calling_package,
                calling_feature_id: None,
                intent,
                start_flags: 0,
            },
            ActivityBand::Legacy => StartActivityCall::Legacy {
                calling_package,
                intent,
                start_flags: 0,
            },
        }
    }

    pub fn band(&self) -> ActivityBand {
        match self {
            StartActivityCall::WithFeature { .. } => ActivityBand::WithFeature,
            StartActivityCall::Legacy { .. } => ActivityBand::Legacy,
        }
    }

    pub fn intent(&self) -> &Intent {
        match self {
            StartActivityCall::WithFeature { intent, .. } | StartActivityCall::Legacy { intent, .. } => {
                intent
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceBand {
    /// R and later: typed `startService` with a calling feature id.
    R,
    /// O..R: adds the `requireForeground` flag.
    O,
    /// M..O: adds the calling package.
    M,
    /// Before M: intent, resolved type and user only.
    Legacy,
}

impl ServiceBand {
    pub fn for_sdk(sdk: SdkVersion) -> Self {
        if sdk.at_least(SdkVersion::R) {
            ServiceBand::R
        } else if sdk.at_least(SdkVersion::O) {
            ServiceBand::O
        } else if sdk.at_least(SdkVersion::M) {
            ServiceBand::M
        } else {
            ServiceBand::Legacy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartServiceCall {
    R {
        intent: Intent,
        require_foreground: bool,
        calling_package: Option<String>,
        calling_feature_id: Option<String>,
        user_id: u32,
    },
    O {
        intent: Intent,
        require_foreground: bool,
        calling_package: Option<String>,
        user_id: u32,
    },
    M {
        intent: Intent,
        calling_package: Option<String>,
        user_id: u32,
    },
    Legacy {
        intent: Intent,
        user_id: u32,
    },
}

impl StartServiceCall {
    pub fn new(
        band: ServiceBand,
        intent: Intent,
        calling_package: Option<String>,
        user_id: u32,
    ) -> Self {
        match band {
            ServiceBand::R => StartServiceCall::R {
                intent,
                require_foreground: false,
                calling_package,
                calling_feature_id: None,
                user_id,
            },
            ServiceBand::O => StartServiceCall::O {
                intent,
                require_foreground: false,
                calling_package,
                user_id,
            },
            ServiceBand::M => StartServiceCall::M {
                intent,
                calling_package,
                user_id,
            },
            ServiceBand::Legacy => StartServiceCall::Legacy { intent, user_id },
        }
    }

    pub fn band(&self) -> ServiceBand {
        match self {
            StartServiceCall::R { .. } => ServiceBand::R,
            StartServiceCall::O { .. } => ServiceBand::O,
            StartServiceCall::M { .. } => ServiceBand::M,
            StartServiceCall::Legacy { .. } => ServiceBand::Legacy,
        }
    }

    pub fn intent(&self) -> &Intent {
        match self {
            StartServiceCall::R { intent, .. }
            | StartServiceCall::O { intent, .. }
            | StartServiceCall::M { intent, .. }
            | StartServiceCall::Legacy { intent, .. } => intent,
        }
    }

    pub fn user_id(&self) -> u32 {
        match self {
            StartServiceCall::R { user_id, .. }
            | StartServiceCall::O { user_id, .. }
            | StartServiceCall::M { user_id, .. }
            | StartServiceCall::Legacy { user_id, .. } => *user_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastBand {
    /// `broadcastIntentWithFeature`, R and later.
    WithFeature,
    /// `broadcastIntent` before R.
    Legacy,
}

impl BroadcastBand {
    pub fn for_sdk(sdk: SdkVersion) -> Self {
        if sdk.at_least(SdkVersion::R) {
            BroadcastBand::WithFeature
        } else {
            BroadcastBand::Legacy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastCall {
    WithFeature {
        intent: Intent,
        calling_feature_id: Option<String>,
        app_op: i32,
        serialized: bool,
        sticky: bool,
        user_id: u32,
    },
    Legacy {
        intent: Intent,
        app_op: i32,
        serialized: bool,
        sticky: bool,
        user_id: u32,
    },
}

impl BroadcastCall {
    /// Unordered, non-sticky broadcast to user 0 with no app op attached.
    pub fn new(band: BroadcastBand, intent: Intent) -> Self {
        match band {
            BroadcastBand::WithFeature => BroadcastCall::WithFeature {
                intent,
                calling_feature_id: None,
                app_op: OP_NONE,
                serialized: false,
                sticky: false,
                user_id: 0,
            },
            BroadcastBand::Legacy => BroadcastCall::Legacy {
                intent,
                app_op: OP_NONE,
                serialized: false,
                sticky: false,
                user_id: 0,
            },
        }
    }

    pub fn band(&self) -> BroadcastBand {
        match self {
            BroadcastCall::WithFeature { .. } => BroadcastBand::WithFeature,
            BroadcastCall::Legacy { .. } => BroadcastBand::Legacy,
        }
    }

    pub fn intent(&self) -> &Intent {
        match self {
            BroadcastCall::WithFeature { intent, .. } | BroadcastCall::Legacy { intent, .. } => intent,
        }
    }
}
