use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

impl Position {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Position::Left),
            "right" => Some(Position::Right),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBarLayout {
    pub hidden: bool,
    pub position: Position,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLayout {
    pub hidden: bool,
}

/// Visibility and placement of the workbench's structural regions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutState {
    pub side_bar: SideBarLayout,
    pub menu_bar: RegionLayout,
    pub status_bar: RegionLayout,
    pub activity_bar: RegionLayout,
}
