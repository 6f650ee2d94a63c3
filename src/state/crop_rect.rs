//! Crop rectangle state and pointer interaction.
//!
//! Coordinates are in the preview container's space: pixels offset from its
//! top-left corner. Every mutation keeps the rectangle inside the container.

use crate::constants::{
    CROP_DEFAULT_HEIGHT, CROP_DEFAULT_WIDTH, CROP_DEFAULT_X, CROP_DEFAULT_Y, CROP_HANDLE_HIT_SIZE,
    CROP_MAX_SCALE, CROP_MIN_SCALE, CROP_MIN_SIZE,
};

/// Size of the preview container the rectangle lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A pointer position in container space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Corner handle drawn on the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub fn cursor(&self) -> &'static str {
        match self {
            Handle::TopLeft => "nw-resize",
            Handle::TopRight => "ne-resize",
            Handle::BottomLeft => "sw-resize",
            Handle::BottomRight => "se-resize",
        }
    }
}

/// What a pointer-down started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize(Handle),
}

/// User-adjustable crop region plus the drawing transform applied on export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Zoom multiplier, 0.5 to 2.0
    pub scale: f32,
    /// Rotation in degrees, 0 to 360
    pub rotation: i32,
}

impl Default for CropRect {
    fn default() -> Self {
        Self {
            x: CROP_DEFAULT_X,
            y: CROP_DEFAULT_Y,
            width: CROP_DEFAULT_WIDTH,
            height: CROP_DEFAULT_HEIGHT,
            scale: 1.0,
            rotation: 0,
        }
    }
}

impl CropRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn corner(&self, handle: Handle) -> Point {
        match handle {
            Handle::TopLeft => Point::new(self.x, self.y),
            Handle::TopRight => Point::new(self.right(), self.y),
            Handle::BottomLeft => Point::new(self.x, self.bottom()),
            Handle::BottomRight => Point::new(self.right(), self.bottom()),
        }
    }

    /// Which drag a pointer-down at `point` would start. Handles win over the body.
    pub fn hit_test(&self, point: Point) -> Option<DragMode> {
        let half = CROP_HANDLE_HIT_SIZE / 2.0;
        for handle in Handle::ALL {
            let c = self.corner(handle);
            if (point.x - c.x).abs() <= half && (point.y - c.y).abs() <= half {
                return Some(DragMode::Resize(handle));
            }
        }
        if self.contains(point) {
            return Some(DragMode::Move);
        }
        None
    }

    /// Pull the rectangle back inside `container`, shrinking it if it cannot fit.
    pub fn clamp_into(&mut self, container: ContainerSize) {
        if container.width > 0.0 {
            self.width = self.width.min(container.width);
        }
        if container.height > 0.0 {
            self.height = self.height.min(container.height);
        }
        self.x = self.x.min(container.width - self.width).max(0.0);
        self.y = self.y.min(container.height - self.height).max(0.0);
    }

    pub fn set_width(&mut self, width: f32, container: ContainerSize) {
        self.width = width.max(CROP_MIN_SIZE);
        self.clamp_into(container);
    }

    pub fn set_height(&mut self, height: f32, container: ContainerSize) {
        self.height = height.max(CROP_MIN_SIZE);
        self.clamp_into(container);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(CROP_MIN_SCALE, CROP_MAX_SCALE);
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation = degrees.clamp(0, 360);
    }

    /// Quarter turn clockwise, wrapping at 360.
    pub fn rotate_quarter(&mut self) {
        self.rotation = (self.rotation + 90) % 360;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    mode: DragMode,
    /// Pointer offset from the grabbed point (top-left for moves, the handle corner for resizes)
    offset: Point,
    start: CropRect,
}

/// Crop rectangle plus the in-flight pointer drag, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CropEditor {
    pub rect: CropRect,
    drag: Option<ActiveDrag>,
}

impl CropEditor {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|drag| drag.mode)
    }

    /// Start a drag if `point` hits the rectangle or one of its handles.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let Some(mode) = self.rect.hit_test(point) else {
            return false;
        };
        let anchor = match mode {
            DragMode::Move => Point::new(self.rect.x, self.rect.y),
            DragMode::Resize(handle) => self.rect.corner(handle),
        };
        self.drag = Some(ActiveDrag {
            mode,
            offset: Point::new(point.x - anchor.x, point.y - anchor.y),
            start: self.rect,
        });
        true
    }

    pub fn pointer_move(&mut self, point: Point, container: ContainerSize) {
        let Some(drag) = self.drag else {
            return;
        };
        let target = Point::new(point.x - drag.offset.x, point.y - drag.offset.y);
        match drag.mode {
            DragMode::Move => {
                self.rect.x = target.x;
                self.rect.y = target.y;
                self.rect.clamp_into(container);
            }
            DragMode::Resize(handle) => {
                self.rect = resize_from(drag.start, handle, target, container);
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Fit the rectangle into a newly measured container.
    pub fn fit_into(&mut self, container: ContainerSize) {
        self.rect.clamp_into(container);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Move `handle` of `start` to `corner`, keeping the opposite corner fixed.
fn resize_from(start: CropRect, handle: Handle, corner: Point, container: ContainerSize) -> CropRect {
    let mut rect = start;
    let (left, right) = match handle {
        Handle::TopLeft | Handle::BottomLeft => {
            let right = start.right();
            (corner.x.min(right - CROP_MIN_SIZE).max(0.0), right)
        }
        Handle::TopRight | Handle::BottomRight => {
            let left = start.x;
            (left, corner.x.max(left + CROP_MIN_SIZE).min(container.width))
        }
    };
    let (top, bottom) = match handle {
        Handle::TopLeft | Handle::TopRight => {
            let bottom = start.bottom();
            (corner.y.min(bottom - CROP_MIN_SIZE).max(0.0), bottom)
        }
        Handle::BottomLeft | Handle::BottomRight => {
            let top = start.y;
            (top, corner.y.max(top + CROP_MIN_SIZE).min(container.height))
        }
    };
    rect.x = left;
    rect.y = top;
    rect.width = right - left;
    rect.height = bottom - top;
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: ContainerSize = ContainerSize {
        width: 600.0,
        height: 400.0,
    };

    fn assert_inside(rect: &CropRect, container: ContainerSize) {
        assert!(rect.x >= 0.0, "x below zero: {}", rect.x);
        assert!(rect.y >= 0.0, "y below zero: {}", rect.y);
        assert!(rect.x <= container.width - rect.width + 0.001, "x too large: {:?}", rect);
        assert!(rect.y <= container.height - rect.height + 0.001, "y too large: {:?}", rect);
    }

    #[test]
    fn test_default_rect() {
        let rect = CropRect::default();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (50.0, 50.0, 200.0, 200.0));
        assert_eq!(rect.scale, 1.0);
        assert_eq!(rect.rotation, 0);
    }

    #[test]
    fn test_move_keeps_pointer_offset() {
        let mut editor = CropEditor::default();
        assert!(editor.pointer_down(Point::new(100.0, 120.0)));
        assert_eq!(editor.drag_mode(), Some(DragMode::Move));
        editor.pointer_move(Point::new(150.0, 130.0), CONTAINER);
        assert_eq!((editor.rect.x, editor.rect.y), (100.0, 60.0));
        editor.pointer_up();
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_pointer_down_outside_does_not_drag() {
        let mut editor = CropEditor::default();
        assert!(!editor.pointer_down(Point::new(500.0, 390.0)));
        editor.pointer_move(Point::new(10.0, 10.0), CONTAINER);
        assert_eq!(editor.rect, CropRect::default());
    }

    #[test]
    fn test_drag_moves_stay_in_container() {
        let mut editor = CropEditor::default();
        editor.pointer_down(Point::new(150.0, 150.0));
        let moves = [
            (-500.0, -500.0),
            (10_000.0, 20.0),
            (300.0, 9_000.0),
            (599.0, 399.0),
            (0.0, 0.0),
            (320.5, 210.25),
        ];
        for (x, y) in moves {
            editor.pointer_move(Point::new(x, y), CONTAINER);
            assert_inside(&editor.rect, CONTAINER);
        }
    }

    #[test]
    fn test_drag_in_small_container_shrinks_rect() {
        let small = ContainerSize::new(180.0, 150.0);
        let mut editor = CropEditor::default();
        assert!(editor.pointer_down(Point::new(100.0, 100.0)));
        editor.pointer_move(Point::new(120.0, 110.0), small);
        assert_eq!((editor.rect.width, editor.rect.height), (180.0, 150.0));
        assert_eq!((editor.rect.x, editor.rect.y), (0.0, 0.0));
        assert_inside(&editor.rect, small);
        editor.pointer_move(Point::new(400.0, -300.0), small);
        assert_inside(&editor.rect, small);
    }

    #[test]
    fn test_fit_into_measured_container() {
        let mut editor = CropEditor::default();
        editor.fit_into(ContainerSize::new(220.0, 120.0));
        assert_eq!((editor.rect.width, editor.rect.height), (200.0, 120.0));
        assert_eq!((editor.rect.x, editor.rect.y), (20.0, 0.0));
        editor.fit_into(CONTAINER);
        assert_eq!(editor.rect.width, 200.0);
        assert_inside(&editor.rect, CONTAINER);
    }

    #[test]
    fn test_move_after_release_is_ignored() {
        let mut editor = CropEditor::default();
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_up();
        editor.pointer_move(Point::new(300.0, 300.0), CONTAINER);
        assert_eq!(editor.rect, CropRect::default());
    }

    #[test]
    fn test_handle_hit_beats_body() {
        let rect = CropRect::default();
        assert_eq!(
            rect.hit_test(Point::new(52.0, 52.0)),
            Some(DragMode::Resize(Handle::TopLeft))
        );
        assert_eq!(
            rect.hit_test(Point::new(250.0, 250.0)),
            Some(DragMode::Resize(Handle::BottomRight))
        );
        assert_eq!(rect.hit_test(Point::new(150.0, 150.0)), Some(DragMode::Move));
    }

    #[test]
    fn test_resize_bottom_right_keeps_origin() {
        let mut editor = CropEditor::default();
        editor.pointer_down(Point::new(250.0, 250.0));
        editor.pointer_move(Point::new(350.0, 300.0), CONTAINER);
        let rect = editor.rect;
        assert_eq!((rect.x, rect.y), (50.0, 50.0));
        assert_eq!((rect.width, rect.height), (300.0, 250.0));
    }

    #[test]
    fn test_resize_top_left_keeps_opposite_corner() {
        let mut editor = CropEditor::default();
        editor.pointer_down(Point::new(50.0, 50.0));
        editor.pointer_move(Point::new(-40.0, 100.0), CONTAINER);
        let rect = editor.rect;
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 100.0);
        assert_eq!(rect.right(), 250.0);
        assert_eq!(rect.bottom(), 250.0);
    }

    #[test]
    fn test_resize_respects_minimum_and_bounds() {
        let mut editor = CropEditor::default();
        editor.pointer_down(Point::new(250.0, 250.0));
        editor.pointer_move(Point::new(0.0, 0.0), CONTAINER);
        assert_eq!(editor.rect.width, CROP_MIN_SIZE);
        assert_eq!(editor.rect.height, CROP_MIN_SIZE);
        editor.pointer_move(Point::new(5_000.0, 5_000.0), CONTAINER);
        assert_eq!(editor.rect.right(), CONTAINER.width);
        assert_eq!(editor.rect.bottom(), CONTAINER.height);
        assert_inside(&editor.rect, CONTAINER);
    }

    #[test]
    fn test_width_change_reclamps_origin() {
        let mut rect = CropRect {
            x: 400.0,
            ..CropRect::default()
        };
        rect.set_width(400.0, CONTAINER);
        assert_eq!(rect.width, 400.0);
        assert_eq!(rect.x, 200.0);
        rect.set_height(300.0, ContainerSize::new(600.0, 200.0));
        assert_eq!(rect.height, 200.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_scale_and_rotation_limits() {
        let mut rect = CropRect::default();
        rect.set_scale(5.0);
        assert_eq!(rect.scale, 2.0);
        rect.set_scale(0.1);
        assert_eq!(rect.scale, 0.5);
        rect.set_rotation(270);
        rect.rotate_quarter();
        assert_eq!(rect.rotation, 0);
        rect.set_rotation(400);
        assert_eq!(rect.rotation, 360);
        rect.rotate_quarter();
        assert_eq!(rect.rotation, 90);
    }

    #[test]
    fn test_reset_clears_drag() {
        let mut editor = CropEditor::default();
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_move(Point::new(200.0, 200.0), CONTAINER);
        editor.rect.set_scale(1.5);
        editor.reset();
        assert_eq!(editor.rect, CropRect::default());
        assert!(!editor.is_dragging());
    }
}
