//! Split-view window placement

use serde::{Deserialize, Serialize};

/// Available screen area reported by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Half of the screen the selected tab moves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    Right,
    Left,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLayout {
    /// Where the window currently holding the tab ends up
    pub current: WindowBounds,
    /// Where the new window holding the tab goes
    pub detached: WindowBounds,
}

pub fn split_layout(screen: ScreenGeometry, direction: SplitDirection) -> SplitLayout {
    let full = WindowBounds {
        left: 0,
        top: 0,
        width: screen.width,
        height: screen.height,
    };

    match direction {
        SplitDirection::Right | SplitDirection::Left => {
            let half = screen.width / 2;
            let near = WindowBounds { width: half, ..full };
            let far = WindowBounds {
                left: half,
                width: half,
                ..full
            };
            if direction == SplitDirection::Right {
                SplitLayout {
                    current: near,
                    detached: far,
                }
            } else {
                SplitLayout {
                    current: far,
                    detached: near,
                }
            }
        }
        SplitDirection::Top | SplitDirection::Bottom => {
            let half = screen.height / 2;
            let near = WindowBounds {
                height: half,
                ..full
            };
            let far = WindowBounds {
                top: half,
                height: half,
                ..full
            };
            if direction == SplitDirection::Bottom {
                SplitLayout {
                    current: near,
                    detached: far,
                }
            } else {
                SplitLayout {
                    current: far,
                    detached: near,
                }
            }
        }
    }
}
