//! From a trace step to painted rectangles.
//!
//! Two stages: [`map_step_to_bar_states`] decides what each position *means*
//! (neutral, compared, modified, completed), then [`render_bars_frame`] lays
//! bars out and hands rectangles to a [`Surface`]. Any drawing backend that
//! can fill a rectangle can implement `Surface`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::playback::PlaybackStatus;
use crate::trace::{Operation, SortStep, SortValue};
use crate::transition::{RenderTransition, TransitionFrame};

// ---------------------------------------------------------------------------
// Visual state
// ---------------------------------------------------------------------------

/// Semantic state of one bar, ordered by precedence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BarVisualState {
    #[default]
    Neutral,
    Compared,
    Modified,
    Completed,
}

impl BarVisualState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Compared => "compared",
            Self::Modified => "modified",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BarVisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Higher precedence wins: completed > modified > compared > neutral.
pub fn resolve_visual_state(current: BarVisualState, incoming: BarVisualState) -> BarVisualState {
    current.max(incoming)
}

/// One state per position of `step`'s snapshot.
///
/// A finished playback or a `sorted` step marks everything completed.
/// Out-of-range indices are skipped.
pub fn map_step_to_bar_states<T>(step: &SortStep<T>, status: PlaybackStatus) -> Vec<BarVisualState> {
    let len = step.snapshot.len();
    if status == PlaybackStatus::Finished || step.operation() == Some(Operation::Sorted) {
        return vec![BarVisualState::Completed; len];
    }

    let mut states = vec![BarVisualState::Neutral; len];
    let marks = step
        .compared_indices
        .iter()
        .map(|&i| (i, BarVisualState::Compared))
        .chain(
            step.modified_indices
                .iter()
                .map(|&i| (i, BarVisualState::Modified)),
        );
    for (index, incoming) in marks {
        if let Some(state) = states.get_mut(index) {
            *state = resolve_visual_state(*state, incoming);
        }
    }
    states
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Background plus one colour per bar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualSemantics {
    pub background: Rgb,
    pub neutral: Rgb,
    pub compared: Rgb,
    pub modified: Rgb,
    pub completed: Rgb,
}

impl Default for VisualSemantics {
    fn default() -> Self {
        Self {
            background: Rgb::new(0xf1, 0xf5, 0xf9),
            neutral: Rgb::new(0x64, 0x74, 0x8b),
            compared: Rgb::new(0x0e, 0xa5, 0xe9),
            modified: Rgb::new(0xf9, 0x73, 0x16),
            completed: Rgb::new(0x16, 0xa3, 0x4a),
        }
    }
}

impl VisualSemantics {
    pub fn color_for(&self, state: BarVisualState) -> Rgb {
        match state {
            BarVisualState::Neutral => self.neutral,
            BarVisualState::Compared => self.compared,
            BarVisualState::Modified => self.modified,
            BarVisualState::Completed => self.completed,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

const HORIZONTAL_PADDING: f64 = 12.0;
const VERTICAL_PADDING: f64 = 12.0;
const BAR_GAP: f64 = 2.0;
const MIN_BAR_HEIGHT: f64 = 1.0;

/// Logical drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceDimensions {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 420.0,
        }
    }
}

impl SurfaceDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn drawable_width(&self) -> f64 {
        (self.width - HORIZONTAL_PADDING * 2.0).max(0.0)
    }

    fn drawable_height(&self) -> f64 {
        (self.height - VERTICAL_PADDING * 2.0).max(0.0)
    }

    /// Horizontal space per bar when `count` bars share the width.
    pub fn slot_width(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            self.drawable_width() / count as f64
        }
    }
}

/// A laid-out bar, in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarDescriptor {
    pub index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub state: BarVisualState,
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        1.0
    } else {
        (value - min) / (max - min)
    }
}

/// Lay out one bar per value. `offsets` shift bars sideways in slot units;
/// missing states default to neutral.
pub fn create_bar_descriptors(
    values: &[f64],
    states: &[BarVisualState],
    dimensions: SurfaceDimensions,
    offsets: Option<&[f64]>,
) -> Vec<BarDescriptor> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let drawable_height = dimensions.drawable_height();
    let slot = dimensions.slot_width(values.len());
    let width = (slot - BAR_GAP).max(1.0);

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let height = (normalize(value, min, max) * drawable_height).max(MIN_BAR_HEIGHT);
            let shift = offsets.and_then(|o| o.get(index)).copied().unwrap_or(0.0) * slot;
            BarDescriptor {
                index,
                value,
                x: HORIZONTAL_PADDING + index as f64 * slot + BAR_GAP / 2.0 + shift,
                y: dimensions.height - VERTICAL_PADDING - height,
                width,
                height,
                state: states.get(index).copied().unwrap_or_default(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Something bars can be painted onto.
pub trait Surface {
    fn dimensions(&self) -> SurfaceDimensions;
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb);
}

/// A surface plus the sizing it was configured with.
#[derive(Debug)]
pub struct ConfiguredSurface<S> {
    pub surface: S,
    pub logical: SurfaceDimensions,
    pub physical: SurfaceDimensions,
    pub pixel_ratio: f64,
}

fn clamp_size(value: f64) -> f64 {
    if value.is_finite() {
        value.floor().max(1.0)
    } else {
        1.0
    }
}

/// Size a drawing surface. Fails only when there is nothing to draw on.
pub fn configure_surface<S: Surface>(
    surface: Option<S>,
    dimensions: SurfaceDimensions,
    pixel_ratio: Option<f64>,
) -> Result<ConfiguredSurface<S>> {
    let surface = surface.ok_or_else(|| VizError::SurfaceUnavailable {
        reason: "no drawing context available".to_string(),
    })?;

    let pixel_ratio = match pixel_ratio {
        Some(ratio) if ratio > 0.0 => ratio,
        _ => 1.0,
    };
    let logical = SurfaceDimensions::new(clamp_size(dimensions.width), clamp_size(dimensions.height));
    let physical = SurfaceDimensions::new(
        clamp_size(logical.width * pixel_ratio),
        clamp_size(logical.height * pixel_ratio),
    );

    Ok(ConfiguredSurface {
        surface,
        logical,
        physical,
        pixel_ratio,
    })
}

/// What to draw for the current step.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a, T> {
    pub snapshot: &'a [T],
    pub states: &'a [BarVisualState],
    /// Original index per position. Accepted but not drawn.
    pub labels: Option<&'a [usize]>,
}

/// Paint `frame`, animated by `transition` when given. Returns the bars as
/// drawn.
pub fn render_bars_frame<T: SortValue, S: Surface + ?Sized>(
    surface: &mut S,
    frame: &RenderFrame<'_, T>,
    semantics: &VisualSemantics,
    transition: Option<&RenderTransition<T>>,
) -> Vec<BarDescriptor> {
    let dimensions = surface.dimensions();
    surface.clear();
    surface.fill_rect(
        0.0,
        0.0,
        dimensions.width,
        dimensions.height,
        semantics.background,
    );

    let TransitionFrame { values, offsets } = match transition {
        Some(transition) => transition.interpolate(frame.snapshot),
        None => TransitionFrame {
            values: frame.snapshot.iter().map(|v| v.as_f64()).collect(),
            offsets: Vec::new(),
        },
    };

    let bars = create_bar_descriptors(&values, frame.states, dimensions, Some(offsets.as_slice()));
    for bar in &bars {
        surface.fill_rect(
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            semantics.color_for(bar.state),
        );
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::StepMetadata;

    #[derive(Debug, Default)]
    struct Recorder {
        cleared: usize,
        rects: Vec<(f64, f64, f64, f64, Rgb)>,
        texts: usize,
    }

    impl Surface for Recorder {
        fn dimensions(&self) -> SurfaceDimensions {
            SurfaceDimensions::new(124.0, 124.0)
        }
        fn clear(&mut self) {
            self.cleared += 1;
        }
        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
            self.rects.push((x, y, width, height, color));
        }
        fn fill_text(&mut self, _text: &str, _x: f64, _y: f64, _color: Rgb) {
            self.texts += 1;
        }
    }

    fn step(len: usize, compared: Vec<usize>, modified: Vec<usize>, op: Operation) -> SortStep<i32> {
        SortStep {
            snapshot: (1..=len as i32).collect(),
            compared_indices: compared,
            modified_indices: modified,
            metadata: Some(StepMetadata::new(op)),
        }
    }

    #[test]
    fn modified_beats_compared() {
        use BarVisualState::*;
        let states = map_step_to_bar_states(
            &step(4, vec![1, 2], vec![2], Operation::Compare),
            PlaybackStatus::Running,
        );
        assert_eq!(states, vec![Neutral, Compared, Modified, Neutral]);
    }

    #[test]
    fn finished_or_sorted_marks_everything_completed() {
        let compare = step(3, vec![0, 1], vec![1], Operation::Compare);
        let states = map_step_to_bar_states(&compare, PlaybackStatus::Finished);
        assert_eq!(states, vec![BarVisualState::Completed; 3]);

        let sorted = step(3, vec![0], vec![], Operation::Sorted);
        let states = map_step_to_bar_states(&sorted, PlaybackStatus::Running);
        assert_eq!(states, vec![BarVisualState::Completed; 3]);
    }

    #[test]
    fn stray_indices_are_ignored() {
        let states = map_step_to_bar_states(
            &step(2, vec![0, 5], vec![99], Operation::Compare),
            PlaybackStatus::Paused,
        );
        assert_eq!(states, vec![BarVisualState::Compared, BarVisualState::Neutral]);
    }

    #[test]
    fn precedence_is_order_independent() {
        use BarVisualState::*;
        assert_eq!(resolve_visual_state(Modified, Compared), Modified);
        assert_eq!(resolve_visual_state(Compared, Modified), Modified);
        assert_eq!(resolve_visual_state(Completed, Neutral), Completed);
    }

    #[test]
    fn default_colours() {
        let semantics = VisualSemantics::default();
        assert_eq!(semantics.background.to_string(), "#f1f5f9");
        assert_eq!(semantics.color_for(BarVisualState::Neutral).to_string(), "#64748b");
        assert_eq!(semantics.color_for(BarVisualState::Compared).to_string(), "#0ea5e9");
        assert_eq!(semantics.color_for(BarVisualState::Modified).to_string(), "#f97316");
        assert_eq!(semantics.color_for(BarVisualState::Completed).to_string(), "#16a34a");
    }

    #[test]
    fn layout_geometry() {
        // 100 px drawable in each direction, four 25 px slots.
        let dims = SurfaceDimensions::new(124.0, 124.0);
        let bars = create_bar_descriptors(&[1.0, 2.0, 3.0, 5.0], &[], dims, None);
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].x, 13.0);
        assert_eq!(bars[1].x, 38.0);
        assert_eq!(bars[0].width, 23.0);
        assert_eq!(bars[0].height, 1.0);
        assert_eq!(bars[3].height, 100.0);
        assert_eq!(bars[3].y, 12.0);
        assert_eq!(bars[2].height, 50.0);
        assert!(bars.iter().all(|b| b.state == BarVisualState::Neutral));
    }

    #[test]
    fn equal_values_draw_full_height() {
        let dims = SurfaceDimensions::new(124.0, 124.0);
        let bars = create_bar_descriptors(&[7.0, 7.0], &[], dims, None);
        assert!(bars.iter().all(|b| b.height == 100.0));
    }

    #[test]
    fn offsets_are_in_slots() {
        let dims = SurfaceDimensions::new(124.0, 124.0);
        let bars = create_bar_descriptors(&[1.0, 2.0], &[], dims, Some(&[0.5, -1.0][..]));
        assert_eq!(bars[0].x, 13.0 + 25.0);
        assert_eq!(bars[1].x, 63.0 - 50.0);
    }

    #[test]
    fn narrow_slots_keep_one_pixel_bars() {
        let dims = SurfaceDimensions::new(30.0, 50.0);
        let bars = create_bar_descriptors(&[1.0; 10], &[], dims, None);
        assert!(bars.iter().all(|b| b.width == 1.0));
    }

    #[test]
    fn render_paints_background_then_bars_without_text() {
        let mut surface = Recorder::default();
        let snapshot = [3, 1, 2];
        let states = [BarVisualState::Compared];
        let labels = [2, 0, 1];
        let frame = RenderFrame {
            snapshot: &snapshot,
            states: &states,
            labels: Some(&labels[..]),
        };
        let semantics = VisualSemantics::default();
        let bars = render_bars_frame(&mut surface, &frame, &semantics, None);

        assert_eq!(surface.cleared, 1);
        assert_eq!(surface.rects.len(), 4);
        assert_eq!(surface.rects[0], (0.0, 0.0, 124.0, 124.0, semantics.background));
        assert_eq!(surface.rects[1].4, semantics.compared);
        assert_eq!(surface.rects[2].4, semantics.neutral);
        assert_eq!(surface.texts, 0);
        assert_eq!(bars.len(), 3);
    }

    #[test]
    fn render_applies_transition_offsets() {
        let from = step(2, vec![], vec![], Operation::Compare);
        let mut to = step(2, vec![0, 1], vec![0, 1], Operation::Swap);
        to.snapshot = vec![2, 1];
        let transition = RenderTransition::between(&from, &to).at(0.5);
        let mut surface = Recorder::default();
        let states = map_step_to_bar_states(&to, PlaybackStatus::Running);
        let frame = RenderFrame {
            snapshot: &to.snapshot,
            states: &states,
            labels: None,
        };
        let bars = render_bars_frame(&mut surface, &frame, &VisualSemantics::default(), Some(&transition));
        // Source heights, halfway across: slot is 50 px.
        assert_eq!(bars[0].value, 1.0);
        assert_eq!(bars[0].x, 13.0 + 25.0);
        assert_eq!(bars[1].x, 63.0 - 25.0);
    }

    #[test]
    fn configure_clamps_sizes_and_ratio() {
        let configured = configure_surface(
            Some(Recorder::default()),
            SurfaceDimensions::new(0.4, f64::NAN),
            Some(-2.0),
        )
        .unwrap();
        assert_eq!(configured.logical, SurfaceDimensions::new(1.0, 1.0));
        assert_eq!(configured.pixel_ratio, 1.0);

        let configured = configure_surface(
            Some(Recorder::default()),
            SurfaceDimensions::new(900.7, 420.0),
            Some(2.0),
        )
        .unwrap();
        assert_eq!(configured.logical.width, 900.0);
        assert_eq!(configured.physical, SurfaceDimensions::new(1800.0, 840.0));
    }

    #[test]
    fn configure_without_context_fails() {
        let err = configure_surface::<Recorder>(None, SurfaceDimensions::default(), None).unwrap_err();
        assert!(matches!(err, VizError::SurfaceUnavailable { .. }));
    }
}
