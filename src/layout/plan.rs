use rand::Rng;

/// Width of the fixed per-glyph cell, independent of real glyph metrics.
pub const CELL_WIDTH: i32 = 35;
/// Height of the fixed per-glyph cell.
pub const CELL_HEIGHT: i32 = 45;
/// Rotation bound in degrees; glyphs turn by at most this much either way.
pub const MAX_ROTATION_DEG: f64 = 20.0;
/// Extra horizontal margin kept clear at both canvas edges.
pub const EDGE_MARGIN: i32 = 10;

/// Spacing between consecutive glyph origins: `base ± variation` pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacingProfile {
    /// Nominal spacing.
    pub base: i32,
    /// Maximum random deviation from `base`.
    pub variation: i32,
}

impl SpacingProfile {
    /// Profile used when the code fits comfortably.
    pub const DEFAULT: Self = Self {
        base: 25,
        variation: 5,
    };
    /// Profile used when the default worst case overflows the canvas.
    pub const REDUCED: Self = Self {
        base: 20,
        variation: 3,
    };
    /// Profile forced once the look-ahead check sees the next glyph overflowing.
    pub const LOOK_AHEAD: Self = Self {
        base: 15,
        variation: 2,
    };

    /// Largest spacing this profile can produce.
    pub fn max_spacing(self) -> i32 {
        self.base + self.variation
    }
}

/// Worst-case pixel displacement of a rotated cell's corner.
pub fn max_rotation_offset() -> i32 {
    let diagonal = f64::from(CELL_WIDTH).hypot(f64::from(CELL_HEIGHT));
    (diagonal * MAX_ROTATION_DEG.to_radians().sin()).ceil() as i32
}

/// Worst-case width of `glyph_count` glyphs under `profile`, rotation slack included.
pub fn worst_case_width(glyph_count: usize, profile: SpacingProfile, rotation_offset: i32) -> i32 {
    let n = i32::try_from(glyph_count).unwrap_or(i32::MAX);
    let text = n
        .saturating_mul(CELL_WIDTH)
        .saturating_add((n - 1).max(0).saturating_mul(profile.max_spacing()));
    text.saturating_add(2 * rotation_offset)
}

/// Placement parameters shared by every glyph of one generation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Canvas width the plan was computed for.
    pub canvas_width: i32,
    /// Canvas height the plan was computed for.
    pub canvas_height: i32,
    /// Cell width ([`CELL_WIDTH`]).
    pub cell_width: i32,
    /// Cell height ([`CELL_HEIGHT`]).
    pub cell_height: i32,
    /// See [`max_rotation_offset`].
    pub rotation_offset: i32,
    /// Left edge of the text block.
    pub start_x: i32,
    /// Vertical center line of the glyphs.
    pub center_y: i32,
    /// Spacing profile selected for the code.
    pub profile: SpacingProfile,
    /// Worst-case block width under `profile`, rotation slack included.
    pub worst_case_width: i32,
}

impl LayoutPlan {
    /// Fit `glyph_count` glyphs onto a `canvas_width × canvas_height` canvas.
    ///
    /// Never fails: when even the reduced profile cannot fit, the plan is returned as computed
    /// and the compositor's safety margin drops whatever falls outside.
    pub fn compute(canvas_width: u32, canvas_height: u32, glyph_count: usize) -> Self {
        let width = i32::try_from(canvas_width).unwrap_or(i32::MAX);
        let height = i32::try_from(canvas_height).unwrap_or(i32::MAX);
        let rotation_offset = max_rotation_offset();
        let min_start = rotation_offset + EDGE_MARGIN;

        let mut profile = SpacingProfile::DEFAULT;
        let mut total = worst_case_width(glyph_count, profile, rotation_offset);
        let mut start_x = centered_start(width, total, min_start);

        if start_x.saturating_add(total) > width - EDGE_MARGIN {
            start_x = width.saturating_sub(total).saturating_sub(EDGE_MARGIN);
            if start_x < min_start {
                profile = SpacingProfile::REDUCED;
                total = worst_case_width(glyph_count, profile, rotation_offset);
                start_x = centered_start(width, total, min_start);
                tracing::debug!(
                    glyph_count,
                    canvas_width,
                    worst_case_width = total,
                    "layout falls back to reduced spacing"
                );
            }
        }

        let min_y = CELL_HEIGHT / 2 + rotation_offset;
        let max_y = height - CELL_HEIGHT / 2 - rotation_offset;
        let mut center_y = height / 2;
        if center_y < min_y {
            center_y = min_y;
        } else if center_y > max_y {
            center_y = max_y;
        }

        Self {
            canvas_width: width,
            canvas_height: height,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            rotation_offset,
            start_x,
            center_y,
            profile,
            worst_case_width: total,
        }
    }

    /// Left edge of the cell for glyph `index` at the current `spacing`.
    pub fn glyph_x(&self, index: usize, spacing: i32) -> i32 {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.start_x
            .saturating_add(self.rotation_offset)
            .saturating_add(index.saturating_mul(spacing))
    }

    /// Whether a glyph following one at `pos_x` would cross the right margin.
    pub fn next_glyph_overflows(&self, pos_x: i32, spacing: i32) -> bool {
        let next_x = pos_x
            .saturating_add(self.cell_width)
            .saturating_add(spacing);
        next_x
            .saturating_add(self.cell_width)
            .saturating_add(self.rotation_offset)
            > self.canvas_width - EDGE_MARGIN
    }
}

fn centered_start(width: i32, total: i32, min_start: i32) -> i32 {
    let start = width.saturating_sub(total) / 2;
    start.max(min_start)
}

/// Per-glyph spacing carried from one glyph to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacingState {
    spacing: i32,
    profile: SpacingProfile,
}

impl SpacingState {
    /// Start at the plan's nominal spacing.
    pub fn new(plan: &LayoutPlan) -> Self {
        Self {
            spacing: plan.profile.base,
            profile: plan.profile,
        }
    }

    /// Spacing to use for the next glyph.
    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Profile currently in effect.
    pub fn profile(&self) -> SpacingProfile {
        self.profile
    }

    /// Redraw the spacing after the glyph at `pos_x` was placed.
    ///
    /// When another glyph follows and would overflow, the look-ahead profile takes over for
    /// every remaining glyph.
    pub fn advance<R: Rng>(&mut self, plan: &LayoutPlan, pos_x: i32, has_next: bool, rng: &mut R) {
        let v = self.profile.variation;
        self.spacing = self.profile.base + rng.random_range(-v..=v);

        if has_next && plan.next_glyph_overflows(pos_x, self.spacing) {
            if self.profile != SpacingProfile::LOOK_AHEAD {
                tracing::debug!(pos_x, "look-ahead tightens spacing for remaining glyphs");
            }
            self.profile = SpacingProfile::LOOK_AHEAD;
            self.spacing = SpacingProfile::LOOK_AHEAD.base;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
