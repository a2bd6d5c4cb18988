//! Output settings for rendered instances.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Indent JSON output instead of printing it compactly.
    #[serde(default)]
    pub pretty: bool,
}
