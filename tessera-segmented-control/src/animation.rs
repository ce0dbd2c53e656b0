//! Animation timing for the segmented control.
//!
//! ## Usage
//!
//! Every gesture step maps to a [`Transition`], which names the step and the
//! [`AnimationSpec`] its visual commands run with. Animated view
//! properties are stored as [`Animated`] values and sampled against the
//! control's clock when a snapshot is taken.
//!
//! Retargeting a property mid-flight never queues: with
//! [`AnimationSpec::begin_from_current_state`] the new animation starts from
//! the value currently on screen, otherwise from the previous target.

use std::time::Duration;

use crate::rect::{Point, Rect, ScaleTransform, Size};

/// Natural frequency multiplier that lets a spring settle within its
/// duration.
const SPRING_SETTLE_FACTOR: f32 = 8.0;

/// Parameters of a spring-driven animation curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Damping ratio; `1.0` is critically damped, lower values overshoot.
    pub damping_ratio: f32,
    /// Initial velocity, in multiples of the full distance per second.
    pub initial_velocity: f32,
}

/// Timing curve of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Standard ease-in-out, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// A damped spring.
    Spring(SpringParams),
}

/// Duration, curve and retargeting behaviour of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Total duration.
    pub duration: Duration,
    /// Timing curve.
    pub curve: Curve,
    /// Start from the currently displayed value instead of the previous
    /// target when interrupting a running animation.
    pub begin_from_current_state: bool,
}

impl AnimationSpec {
    /// An ease-in-out animation.
    pub const fn ease_in_out(duration: Duration) -> Self {
        Self {
            duration,
            curve: Curve::EaseInOut,
            begin_from_current_state: false,
        }
    }

    /// A spring animation.
    pub const fn spring(duration: Duration, damping_ratio: f32, initial_velocity: f32) -> Self {
        Self {
            duration,
            curve: Curve::Spring(SpringParams {
                damping_ratio,
                initial_velocity,
            }),
            begin_from_current_state: false,
        }
    }

    /// Returns the same spec, starting interrupted animations from the
    /// displayed value.
    pub const fn from_current_state(mut self) -> Self {
        self.begin_from_current_state = true;
        self
    }

    /// Eased progress after `elapsed`, `0.0` at the start and exactly `1.0`
    /// once the duration has passed. Springs may overshoot in between.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        match self.curve {
            Curve::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Curve::Spring(params) => spring_progress(params, self.duration, elapsed),
        }
    }
}

/// Progress along a unit cubic bezier timing curve at time fraction `t`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let bezier = |p1: f32, p2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };

    // The x component is monotonic for valid timing curves.
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    let mut s = t;
    for _ in 0..24 {
        let x = bezier(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) * 0.5;
    }
    bezier(y1, y2, s)
}

fn spring_progress(params: SpringParams, duration: Duration, elapsed: Duration) -> f32 {
    let omega = SPRING_SETTLE_FACTOR / duration.as_secs_f32();
    let zeta = params.damping_ratio.max(0.0);
    let v0 = params.initial_velocity;
    let t = elapsed.as_secs_f32();

    // Remaining displacement, starting at 1 and moving towards 0 with
    // velocity `v0` at t = 0.
    let displacement = if zeta < 1.0 {
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        (-zeta * omega * t).exp()
            * ((damped * t).cos() + ((zeta * omega - v0) / damped) * (damped * t).sin())
    } else {
        (1.0 + (omega - v0) * t) * (-omega * t).exp()
    };
    1.0 - displacement
}

/// A step of a gesture that changes the control's visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Touch went down on an unselected segment.
    PressSegment,
    /// Touch went down on the selected segment.
    PressThumb,
    /// A drag moved the preview to another unselected segment.
    FocusSegment,
    /// A drag carried the thumb to another segment.
    DragThumb,
    /// The touch left the control while previewing.
    ExitBounds,
    /// The touch re-entered the control while previewing.
    EnterBounds,
    /// Touch went up after previewing; the thumb moves to the selection.
    CommitSegment,
    /// Touch went up after pressing the thumb.
    CommitThumb,
}

impl Transition {
    /// Timing of the transition.
    pub fn spec(self) -> AnimationSpec {
        match self {
            Transition::PressSegment => AnimationSpec::ease_in_out(Duration::from_millis(350)),
            Transition::PressThumb | Transition::CommitThumb => {
                AnimationSpec::spring(Duration::from_millis(300), 1.0, 0.1).from_current_state()
            }
            Transition::FocusSegment => {
                AnimationSpec::ease_in_out(Duration::from_millis(300)).from_current_state()
            }
            Transition::DragThumb => {
                AnimationSpec::spring(Duration::from_millis(450), 1.0, 1.0).from_current_state()
            }
            Transition::ExitBounds | Transition::EnterBounds => {
                AnimationSpec::ease_in_out(Duration::from_millis(450)).from_current_state()
            }
            Transition::CommitSegment => {
                AnimationSpec::spring(Duration::from_millis(450), 1.0, 2.0).from_current_state()
            }
        }
    }
}

/// Values that can be interpolated by an animation.
pub trait Interpolate: Copy + PartialEq {
    /// Value at fraction `t` between `self` and `to`; `t` may leave
    /// `[0, 1]` for overshooting curves.
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    fn lerp(self, to: Self, t: f32) -> Self {
        Point::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

impl Interpolate for Size {
    fn lerp(self, to: Self, t: f32) -> Self {
        Size::new(self.width.lerp(to.width, t), self.height.lerp(to.height, t))
    }
}

impl Interpolate for Rect {
    fn lerp(self, to: Self, t: f32) -> Self {
        Rect::from_origin_size(
            self.origin().lerp(to.origin(), t),
            self.size().lerp(to.size(), t),
        )
    }
}

impl Interpolate for ScaleTransform {
    fn lerp(self, to: Self, t: f32) -> Self {
        ScaleTransform {
            scale: self.scale.lerp(to.scale, t),
            translation: self.translation.lerp(to.translation, t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Timeline<T> {
    from: T,
    start: Duration,
    spec: AnimationSpec,
}

/// A view property that may be animating towards its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated<T> {
    target: T,
    timeline: Option<Timeline<T>>,
}

impl<T: Interpolate> Animated<T> {
    /// A property resting at `value`.
    pub fn new(value: T) -> Self {
        Self {
            target: value,
            timeline: None,
        }
    }

    /// The value the property is heading to.
    pub fn target(&self) -> T {
        self.target
    }

    /// The value displayed at `now`.
    pub fn value_at(&self, now: Duration) -> T {
        match &self.timeline {
            Some(timeline) => {
                let elapsed = now.saturating_sub(timeline.start);
                timeline
                    .from
                    .lerp(self.target, timeline.spec.progress(elapsed))
            }
            None => self.target,
        }
    }

    /// Jumps to `value`, cancelling any running animation.
    pub fn set(&mut self, value: T) {
        self.target = value;
        self.timeline = None;
    }

    /// Animates from the current state to `target`.
    ///
    /// Re-requesting the current target leaves a running animation alone.
    pub fn animate_to(&mut self, target: T, spec: &AnimationSpec, now: Duration) {
        if target == self.target {
            return;
        }

        let from = if spec.begin_from_current_state {
            self.value_at(now)
        } else {
            self.target
        };
        self.target = target;
        self.timeline = (from != target).then_some(Timeline {
            from,
            start: now,
            spec: *spec,
        });
    }

    /// Applies `target`, animated when `spec` is given.
    pub fn update(&mut self, target: T, spec: Option<&AnimationSpec>, now: Duration) {
        match spec {
            Some(spec) => self.animate_to(target, spec, now),
            None => self.set(target),
        }
    }

    /// Whether an animation is still running at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.timeline
            .as_ref()
            .is_some_and(|timeline| now.saturating_sub(timeline.start) < timeline.spec.duration)
    }

    /// Spec of the running animation, if any.
    pub fn running_spec(&self, now: Duration) -> Option<AnimationSpec> {
        if self.is_animating(now) {
            self.timeline.as_ref().map(|timeline| timeline.spec)
        } else {
            None
        }
    }

    /// Drops a finished animation.
    pub fn settle(&mut self, now: Duration) {
        if !self.is_animating(now) {
            self.timeline = None;
        }
    }
}

impl<T: Interpolate + Default> Default for Animated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_transition_timings() {
        assert_eq!(Transition::PressSegment.spec().duration, ms(350));
        assert!(!Transition::PressSegment.spec().begin_from_current_state);
        assert_eq!(Transition::FocusSegment.spec().duration, ms(300));
        assert_eq!(Transition::ExitBounds.spec().duration, ms(450));
        assert_eq!(Transition::EnterBounds.spec().duration, ms(450));
        assert_eq!(Transition::PressThumb.spec().duration, ms(300));

        let commit = Transition::CommitSegment.spec();
        assert_eq!(commit.duration, ms(450));
        assert_eq!(
            commit.curve,
            Curve::Spring(SpringParams {
                damping_ratio: 1.0,
                initial_velocity: 2.0
            })
        );
        assert!(commit.begin_from_current_state);

        let drag = Transition::DragThumb.spec();
        assert_eq!(
            drag.curve,
            Curve::Spring(SpringParams {
                damping_ratio: 1.0,
                initial_velocity: 1.0
            })
        );
    }

    #[test]
    fn test_progress_endpoints() {
        for spec in [
            Transition::PressSegment.spec(),
            Transition::CommitSegment.spec(),
            AnimationSpec::spring(ms(400), 0.5, 0.0),
        ] {
            assert!(spec.progress(Duration::ZERO).abs() < 1e-4);
            assert_eq!(spec.progress(spec.duration), 1.0);
            assert_eq!(spec.progress(spec.duration * 2), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let spec = AnimationSpec::ease_in_out(ms(1000));
        assert!((spec.progress(ms(500)) - 0.5).abs() < 1e-3);
        assert!(spec.progress(ms(100)) < 0.1);
        assert!(spec.progress(ms(900)) > 0.9);
    }

    #[test]
    fn test_critically_damped_spring_does_not_overshoot() {
        let spec = AnimationSpec::spring(ms(450), 1.0, 2.0);
        let mut last = 0.0;
        for step in 0..=45 {
            let progress = spec.progress(ms(step * 10));
            assert!(progress <= 1.0 + 1e-4, "overshoot at {step}: {progress}");
            assert!(progress >= last - 1e-4);
            last = progress;
        }
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let spec = AnimationSpec::spring(ms(1000), 0.3, 0.0);
        let peak = (0..100)
            .map(|step| spec.progress(ms(step * 10)))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_animated_value_interpolates() {
        let mut value = Animated::new(0.0_f32);
        let spec = AnimationSpec::ease_in_out(ms(100));
        value.animate_to(10.0, &spec, Duration::ZERO);
        assert_eq!(value.target(), 10.0);
        assert_eq!(value.value_at(Duration::ZERO), 0.0);
        let mid = value.value_at(ms(50));
        assert!(mid > 0.0 && mid < 10.0);
        assert!(value.is_animating(ms(50)));
        assert_eq!(value.value_at(ms(100)), 10.0);
        assert!(!value.is_animating(ms(100)));
    }

    #[test]
    fn test_interruption_begins_from_current_state() {
        let spec = AnimationSpec::ease_in_out(ms(100)).from_current_state();
        let mut value = Animated::new(0.0_f32);
        value.animate_to(10.0, &spec, Duration::ZERO);
        let on_screen = value.value_at(ms(50));

        value.animate_to(0.0, &spec, ms(50));
        assert!((value.value_at(ms(50)) - on_screen).abs() < 1e-5);
    }

    #[test]
    fn test_interruption_without_current_state_restarts_from_target() {
        let spec = AnimationSpec::ease_in_out(ms(100));
        let mut value = Animated::new(0.0_f32);
        value.animate_to(10.0, &spec, Duration::ZERO);
        value.animate_to(20.0, &spec, ms(50));
        assert_eq!(value.value_at(ms(50)), 10.0);
    }

    #[test]
    fn test_set_cancels_animation() {
        let mut value = Animated::new(Rect::ZERO);
        let target = Rect::new(10.0, 0.0, 20.0, 20.0);
        value.animate_to(target, &AnimationSpec::ease_in_out(ms(100)), Duration::ZERO);
        value.set(Rect::ZERO);
        assert!(!value.is_animating(ms(10)));
        assert_eq!(value.value_at(ms(10)), Rect::ZERO);
    }

    #[test]
    fn test_retargeting_same_value_keeps_running_animation() {
        let spec = AnimationSpec::ease_in_out(ms(100)).from_current_state();
        let mut value = Animated::new(0.0_f32);
        value.animate_to(10.0, &spec, Duration::ZERO);
        value.animate_to(10.0, &spec, ms(50));
        assert!(value.value_at(ms(50)) < 10.0);
        assert_eq!(value.running_spec(ms(50)), Some(spec));
    }
}
