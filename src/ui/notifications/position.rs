// SPDX-License-Identifier: MPL-2.0
//! Toast placement.
//!
//! Pure functions mapping an anchor, an item size and a stack slot to the
//! item's top-left corner inside the available area. The area is the screen
//! (or parent surface) shrunk by the screen margin on every side.
//!
//! Top anchors and `Center` stack downward, bottom anchors stack upward.
//! Results are clamped horizontally into the area; vertical overflow is
//! allowed so that deep stacks never overlap each other.

use iced::{Point, Rectangle, Size};
use serde::{Deserialize, Serialize};

/// Screen region a toast is stacked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    Center,
}

/// Direction in which later toasts are placed relative to earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackDirection {
    Down,
    Up,
}

impl Anchor {
    /// Every anchor, in declaration order.
    pub const ALL: [Anchor; 7] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    /// Returns the stacking direction of this anchor.
    #[must_use]
    pub fn direction(self) -> StackDirection {
        match self {
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => StackDirection::Up,
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight | Anchor::Center => {
                StackDirection::Down
            }
        }
    }

    /// Returns the offset a sliding toast enters from, relative to its slot.
    ///
    /// Side anchors slide in horizontally from their edge, centered anchors
    /// vertically. `Center` has no natural edge and does not slide.
    #[must_use]
    pub fn entrance_offset(self, item: Size) -> (f32, f32) {
        match self {
            Anchor::TopLeft | Anchor::BottomLeft => (-item.width, 0.0),
            Anchor::TopRight | Anchor::BottomRight => (item.width, 0.0),
            Anchor::TopCenter => (0.0, -item.height),
            Anchor::BottomCenter => (0.0, item.height),
            Anchor::Center => (0.0, 0.0),
        }
    }
}

/// How stack offsets account for item heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackLayout {
    /// Each slot is offset by the real heights of the items before it.
    #[default]
    Cumulative,
    /// Each slot is offset by `index * (own height + spacing)`, assuming
    /// every item in the stack has the placed item's height.
    Uniform,
}

/// Shrinks `screen` by `margin` on all sides, never below zero size.
#[must_use]
pub fn available_area(screen: Rectangle, margin: f32) -> Rectangle {
    let width = (screen.width - 2.0 * margin).max(0.0);
    let height = (screen.height - 2.0 * margin).max(0.0);
    Rectangle {
        x: screen.x + margin,
        y: screen.y + margin,
        width,
        height,
    }
}

/// Returns the unstacked top-left corner for an item at `anchor`.
#[must_use]
pub fn base_point(anchor: Anchor, item: Size, area: Rectangle) -> Point {
    let left = area.x;
    let top = area.y;
    let right = area.x + area.width;
    let bottom = area.y + area.height;
    let center = area.center();

    match anchor {
        Anchor::TopLeft => Point::new(left, top),
        Anchor::TopCenter => Point::new(center.x - item.width / 2.0, top),
        Anchor::TopRight => Point::new(right - item.width, top),
        Anchor::BottomLeft => Point::new(left, bottom - item.height),
        Anchor::BottomCenter => Point::new(center.x - item.width / 2.0, bottom - item.height),
        Anchor::BottomRight => Point::new(right - item.width, bottom - item.height),
        Anchor::Center => Point::new(
            center.x - item.width / 2.0,
            center.y - item.height / 2.0,
        ),
    }
}

/// Places an item whose slot lies `offset` pixels along the anchor's
/// stacking direction.
#[must_use]
pub fn position_at_offset(anchor: Anchor, item: Size, offset: f32, area: Rectangle) -> Point {
    let base = base_point(anchor, item, area);
    let y = match anchor.direction() {
        StackDirection::Down => base.y + offset,
        StackDirection::Up => base.y - offset,
    };
    Point::new(clamp_x(base.x, item.width, area), y)
}

/// Places the item at `stack_index`, assuming uniform slot height.
#[must_use]
pub fn position(
    anchor: Anchor,
    item: Size,
    stack_index: usize,
    area: Rectangle,
    spacing: f32,
) -> Point {
    let offset = stack_index as f32 * (item.height + spacing);
    position_at_offset(anchor, item, offset, area)
}

/// Returns the stacking offset of every item in `sizes`, in stack order.
#[must_use]
pub fn stack_offsets(layout: StackLayout, sizes: &[Size], spacing: f32) -> Vec<f32> {
    match layout {
        StackLayout::Uniform => sizes
            .iter()
            .enumerate()
            .map(|(index, size)| index as f32 * (size.height + spacing))
            .collect(),
        StackLayout::Cumulative => {
            let mut offset = 0.0;
            sizes
                .iter()
                .map(|size| {
                    let current = offset;
                    offset += size.height + spacing;
                    current
                })
                .collect()
        }
    }
}

/// Computes the slot rectangle of every item in `sizes` at `anchor`.
#[must_use]
pub fn layout_stack(
    anchor: Anchor,
    sizes: &[Size],
    area: Rectangle,
    spacing: f32,
    layout: StackLayout,
) -> Vec<Rectangle> {
    stack_offsets(layout, sizes, spacing)
        .into_iter()
        .zip(sizes)
        .map(|(offset, size)| Rectangle::new(position_at_offset(anchor, *size, offset, area), *size))
        .collect()
}

fn clamp_x(x: f32, width: f32, area: Rectangle) -> f32 {
    let max_x = (area.x + area.width - width).max(area.x);
    x.clamp(area.x, max_x)
}
