use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    UvLight,
    Flashlight,
}

/// At most one tool is lit at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    #[default]
    None,
    Uv,
    Flashlight,
}

impl ActiveTool {
    /// Flips `tool`: turns it off if it is the lit one, otherwise lights it
    /// and puts out whatever else was on.
    pub fn toggled(self, tool: Tool) -> ActiveTool {
        match (self, tool) {
            (ActiveTool::Uv, Tool::UvLight) | (ActiveTool::Flashlight, Tool::Flashlight) => {
                ActiveTool::None
            }
            (_, Tool::UvLight) => ActiveTool::Uv,
            (_, Tool::Flashlight) => ActiveTool::Flashlight,
        }
    }

    pub fn is_active(self, tool: Tool) -> bool {
        matches!(
            (self, tool),
            (ActiveTool::Uv, Tool::UvLight) | (ActiveTool::Flashlight, Tool::Flashlight)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveTool::None => "none",
            ActiveTool::Uv => "UV light",
            ActiveTool::Flashlight => "flashlight",
        }
    }
}
