//! Layout calculation: preset + tab count to ordered tab rectangles.

use mosaic_common::types::{Rect, MAX_TABS};

use super::{LayoutEngine, LayoutPreset};

/// Grid dimensions `(cols, rows)` used by the auto preset.
pub fn auto_grid(count: usize) -> (usize, usize) {
    match count {
        0 | 1 => (1, 1),
        2 => (2, 1),
        3 | 4 => (2, 2),
        5 | 6 => (3, 2),
        7..=9 => (3, 3),
        _ => (4, 3),
    }
}

/// Compute tab rectangles for `count` tabs in a `width` x `height`
/// container, in container-local coordinates.
pub fn compute_bounds(width: f64, height: f64, count: usize, preset: LayoutPreset) -> Vec<Rect> {
    let area = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
    let count = count.clamp(1, MAX_TABS);
    let odd_engaged = count >= 3 && count % 2 == 1;

    match preset {
        LayoutPreset::Auto => {
            let (cols, rows) = auto_grid(count);
            grid(area, count, cols, rows)
        }
        LayoutPreset::Columns2 => fixed_columns(area, count, 2),
        LayoutPreset::Columns3 => fixed_columns(area, count, 3),
        LayoutPreset::Columns4 => fixed_columns(area, count, 4),
        LayoutPreset::OneBigLeft => one_big(area, count, Side::Left),
        LayoutPreset::OneBigRight => one_big(area, count, Side::Right),
        LayoutPreset::OddSecondTall if odd_engaged => odd_second_tall(area, count),
        LayoutPreset::OddLastWide if odd_engaged => odd_last_wide(area, count),
        LayoutPreset::FirstWideTop => first_wide_top(area, count),
        // Odd-only presets with an even or small count fall through silently.
        LayoutPreset::OddSecondTall | LayoutPreset::OddLastWide => {
            compute_bounds(width, height, count, LayoutPreset::Auto)
        }
    }
}

/// Row-major grid over `area`. When the final row is under-filled its
/// last cell stretches to the right edge, so the cells always partition
/// the area.
fn grid(area: Rect, count: usize, cols: usize, rows: usize) -> Vec<Rect> {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let cell_w = area.width / cols as f64;
    let cell_h = area.height / rows as f64;
    let in_last_row = count.saturating_sub(cols * (rows - 1));

    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            let x = area.x + col as f64 * cell_w;
            let y = area.y + row as f64 * cell_h;
            let is_last = i == count - 1;
            if is_last && row == rows - 1 && in_last_row < cols {
                Rect::new(x, y, area.right() - x, cell_h)
            } else {
                Rect::new(x, y, cell_w, cell_h)
            }
        })
        .collect()
}

fn fixed_columns(area: Rect, count: usize, cols: usize) -> Vec<Rect> {
    let cols = cols.min(count).max(1);
    let rows = count.div_ceil(cols).max(1);
    grid(area, count, cols, rows)
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn one_big(area: Rect, count: usize, big: Side) -> Vec<Rect> {
    let half = area.width / 2.0;
    if count == 1 {
        return vec![area];
    }
    let left = Rect::new(area.x, area.y, half, area.height);
    let right = Rect::new(area.x + half, area.y, area.width - half, area.height);

    match big {
        Side::Left => {
            let mut out = vec![left];
            out.extend(fixed_columns(right, count - 1, 2));
            out
        }
        Side::Right => {
            let mut out = fixed_columns(left, count - 1, 2);
            out.push(right);
            out
        }
    }
}

fn odd_second_tall(area: Rect, count: usize) -> Vec<Rect> {
    let half = area.width / 2.0;
    let stacked = count - 1;
    let cell_h = area.height / stacked as f64;

    let mut out = Vec::with_capacity(count);
    let mut row = 0;
    for i in 0..count {
        if i == 1 {
            out.push(Rect::new(
                area.x + half,
                area.y,
                area.width - half,
                area.height,
            ));
        } else {
            out.push(Rect::new(
                area.x,
                area.y + row as f64 * cell_h,
                half,
                cell_h,
            ));
            row += 1;
        }
    }
    out
}

fn odd_last_wide(area: Rect, count: usize) -> Vec<Rect> {
    let bottom_h = area.height / 3.0;
    let top_h = area.height - bottom_h;
    let top = Rect::new(area.x, area.y, area.width, top_h);

    let mut out = fixed_columns(top, count - 1, 2);
    out.push(Rect::new(area.x, area.y + top_h, area.width, bottom_h));
    out
}

fn first_wide_top(area: Rect, count: usize) -> Vec<Rect> {
    if count == 1 {
        return vec![area];
    }
    let top_h = area.height / 3.0;
    let below = Rect::new(area.x, area.y + top_h, area.width, area.height - top_h);

    let mut out = vec![Rect::new(area.x, area.y, area.width, top_h)];
    out.extend(fixed_columns(below, count - 1, 2));
    out
}

impl LayoutEngine {
    pub fn new(preset: LayoutPreset, header_height: f64) -> Self {
        Self {
            preset,
            header_height,
        }
    }

    /// Vertical offset of the content area: the header height, or 0 while
    /// the window is fullscreen.
    pub fn content_offset(&self, fullscreen: bool) -> f64 {
        if fullscreen {
            0.0
        } else {
            self.header_height
        }
    }

    /// The content area of a window with the given inner size, in
    /// window-content coordinates.
    pub fn content_area(&self, width: f64, height: f64, fullscreen: bool) -> Rect {
        let top = self.content_offset(fullscreen);
        Rect::new(0.0, top, width.max(0.0), (height - top).max(0.0))
    }

    /// Header bounds. In fullscreen the header is parked just above the
    /// visible area rather than destroyed.
    pub fn header_bounds(&self, width: f64, fullscreen: bool) -> Rect {
        let y = if fullscreen { -self.header_height } else { 0.0 };
        Rect::new(0.0, y, width.max(0.0), self.header_height)
    }

    /// Container-local tab rectangles for this engine's preset.
    pub fn compute(&self, width: f64, height: f64, count: usize) -> Vec<Rect> {
        compute_bounds(width, height, count, self.preset)
    }

    /// Tab rectangles in window-content coordinates, offset below the header.
    pub fn tab_bounds(&self, width: f64, height: f64, count: usize, fullscreen: bool) -> Vec<Rect> {
        let area = self.content_area(width, height, fullscreen);
        self.compute(area.width, area.height, count)
            .into_iter()
            .map(|r| r.offset(area.x, area.y))
            .collect()
    }
}
