//! Overlay Layout - Taffy placement of the field's text layers
//!
//! The field is a taffy root sized to its bounds with a border. Overlays are
//! absolutely positioned children:
//!
//! ```text
//! ╭──────────────────╮
//! │placeholder ......│   inset 0 on all sides: fills the content box
//! │..................│
//! ╰─────────────── 25╯   right 0, bottom -border: sits on the bottom edge
//! ```
//!
//! Frames are widget-local (0,0 = top-left corner of the border) and do not
//! include scrolling; the field adds the scroll offset afterwards.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, LengthPercentage, LengthPercentageAuto,
    NodeId, Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::error::{FieldError, Result};
use crate::types::ClipRect;

/// Computed overlay frames for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFrames {
    pub placeholder: ClipRect,
    pub counter: Option<ClipRect>,
}

fn length(v: u16) -> LengthPercentageAuto {
    LengthPercentageAuto::Length(v as f32)
}

fn layout_error(err: impl std::fmt::Display) -> FieldError {
    FieldError::Layout(err.to_string())
}

fn frame_of(tree: &TaffyTree<()>, node: NodeId) -> Result<ClipRect> {
    let layout = tree.layout(node).map_err(layout_error)?;
    Ok(ClipRect::new(
        layout.location.x.round().max(0.0) as u16,
        layout.location.y.round().max(0.0) as u16,
        layout.size.width.round().max(0.0) as u16,
        layout.size.height.round().max(0.0) as u16,
    ))
}

/// Place the placeholder and (optionally) the counter inside a widget of
/// `width` x `height` cells with a `border` of the given thickness.
///
/// `counter_width` is the counter's text width; `None` means no counter.
pub fn compute_overlay_frames(
    width: u16,
    height: u16,
    border: u16,
    counter_width: Option<u16>,
) -> Result<OverlayFrames> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let border_len = LengthPercentage::Length(border as f32);
    let root_style = Style {
        size: Size {
            width: TaffyDimension::Length(width as f32),
            height: TaffyDimension::Length(height as f32),
        },
        border: Rect {
            top: border_len,
            right: border_len,
            bottom: border_len,
            left: border_len,
        },
        ..Default::default()
    };

    let placeholder = tree
        .new_leaf(Style {
            position: TaffyPosition::Absolute,
            inset: Rect {
                top: length(0),
                right: length(0),
                bottom: length(0),
                left: length(0),
            },
            ..Default::default()
        })
        .map_err(layout_error)?;

    let mut children = vec![placeholder];

    let counter = match counter_width {
        Some(counter_width) => {
            let node = tree
                .new_leaf(Style {
                    position: TaffyPosition::Absolute,
                    size: Size {
                        width: TaffyDimension::Length(counter_width as f32),
                        height: TaffyDimension::Length(1.0),
                    },
                    inset: Rect {
                        top: LengthPercentageAuto::Auto,
                        right: length(0),
                        bottom: LengthPercentageAuto::Length(-(border as f32)),
                        left: LengthPercentageAuto::Auto,
                    },
                    ..Default::default()
                })
                .map_err(layout_error)?;
            children.push(node);
            Some(node)
        }
        None => None,
    };

    let root = tree
        .new_with_children(root_style, &children)
        .map_err(layout_error)?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::Definite(height as f32),
        },
    )
    .map_err(layout_error)?;

    Ok(OverlayFrames {
        placeholder: frame_of(&tree, placeholder)?,
        counter: counter.map(|node| frame_of(&tree, node)).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_fills_content_box() {
        let frames = compute_overlay_frames(20, 5, 1, None).unwrap();
        assert_eq!(frames.placeholder, ClipRect::new(1, 1, 18, 3));
        assert!(frames.counter.is_none());
    }

    #[test]
    fn test_counter_sits_bottom_right_on_border() {
        let frames = compute_overlay_frames(20, 5, 1, Some(2)).unwrap();
        assert_eq!(frames.counter, Some(ClipRect::new(17, 4, 2, 1)));
    }

    #[test]
    fn test_borderless_counter() {
        let frames = compute_overlay_frames(10, 3, 0, Some(3)).unwrap();
        assert_eq!(frames.placeholder, ClipRect::new(0, 0, 10, 3));
        assert_eq!(frames.counter, Some(ClipRect::new(7, 2, 3, 1)));
    }

    #[test]
    fn test_same_input_same_frames() {
        let a = compute_overlay_frames(30, 6, 1, Some(2)).unwrap();
        let b = compute_overlay_frames(30, 6, 1, Some(2)).unwrap();
        assert_eq!(a, b);
    }
}
