//! Fade-in / fade-out transitions for page elements.
//!
//! Elements hidden by a fade carry a marker class (Bootstrap's `d-none` by
//! default) so stylesheet rules agree with the inline `display: none`.
//! Opacity is stepped on a fixed frame interval with jQuery's default
//! "swing" easing; the inline opacity is cleared again once a fade finishes.
//!
//! Fades started on the same element run one after another through a
//! [`FadeQueue`], the way jQuery chains effects on its `fx` queue; fades on
//! different elements still overlap freely.

#[cfg(test)]
#[path = "fade_test.rs"]
mod fade_test;

use std::cell::RefCell;
use std::f64::consts::PI;
use std::future::Future;
use std::rc::Rc;

use futures::lock::Mutex;
use serde::{Deserialize, Serialize};

use super::dom::DomError;

pub const DEFAULT_FADE_DURATION_MS: u32 = 100;
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 13;
pub const FORCE_HIDDEN_CLASS: &str = "d-none";
/// Longest fade a config may ask for.
pub const MAX_FADE_DURATION_MS: u32 = 60_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    Linear,
    #[default]
    Swing,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the eased curve.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::Swing => 0.5 - (p * PI).cos() / 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    pub duration_ms: u32,
    pub frame_interval_ms: u32,
    /// Class that force-hides an element while it is faded out.
    pub marker_class: String,
    pub easing: Easing,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_FADE_DURATION_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            marker_class: FORCE_HIDDEN_CLASS.to_owned(),
            easing: Easing::Swing,
        }
    }
}

/// Element operations a fade needs. DOM handles mutate through `&self`.
pub trait FadeElement {
    /// Clear the inline `display: none`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the style update is rejected.
    fn show(&self) -> Result<(), DomError>;

    /// Set inline `display: none`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the style update is rejected.
    fn hide(&self) -> Result<(), DomError>;

    /// Set the inline opacity, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the style update is rejected.
    fn set_opacity(&self, opacity: Option<f64>) -> Result<(), DomError>;

    /// # Errors
    ///
    /// Returns a [`DomError`] if the class list rejects `class`.
    fn add_class(&self, class: &str) -> Result<(), DomError>;

    /// # Errors
    ///
    /// Returns a [`DomError`] if the class list rejects `class`.
    fn remove_class(&self, class: &str) -> Result<(), DomError>;
}

/// Waits between animation frames.
#[async_trait::async_trait(?Send)]
pub trait FrameTimer {
    async fn sleep(&self, ms: u32);
}

/// One animation step: wait `delay_ms`, then render at `progress`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeFrame {
    pub delay_ms: u32,
    pub progress: f64,
}

/// Split `duration_ms` into frames of at most `frame_interval_ms`, lazily.
///
/// Delays sum to the duration and the last frame is always at progress 1.0.
/// A zero duration (or interval) renders the end state immediately.
pub fn frames(duration_ms: u32, frame_interval_ms: u32) -> impl Iterator<Item = FadeFrame> {
    let count = if duration_ms == 0 || frame_interval_ms == 0 {
        1
    } else {
        duration_ms.div_ceil(frame_interval_ms)
    };
    let mut elapsed = 0;
    (0..count).map(move |_| {
        if duration_ms == 0 || frame_interval_ms == 0 {
            return FadeFrame { delay_ms: 0, progress: 1.0 };
        }
        let delay_ms = frame_interval_ms.min(duration_ms - elapsed);
        elapsed += delay_ms;
        FadeFrame { delay_ms, progress: f64::from(elapsed) / f64::from(duration_ms) }
    })
}

/// Collected [`frames`].
#[must_use]
pub fn plan_frames(duration_ms: u32, frame_interval_ms: u32) -> Vec<FadeFrame> {
    frames(duration_ms, frame_interval_ms).collect()
}

async fn animate_opacity<E, T>(el: &E, timer: &T, config: &FadeConfig, from: f64, to: f64) -> Result<(), DomError>
where
    E: FadeElement + ?Sized,
    T: FrameTimer + ?Sized,
{
    for frame in frames(config.duration_ms, config.frame_interval_ms) {
        if frame.delay_ms > 0 {
            timer.sleep(frame.delay_ms).await;
        }
        el.set_opacity(Some(from + (to - from) * config.easing.apply(frame.progress)))?;
    }
    Ok(())
}

/// Reveal a hidden element: drop the marker class, then fade opacity 0 → 1.
///
/// # Errors
///
/// Returns the first [`DomError`] raised by the element.
pub async fn fade_in<E, T>(el: &E, timer: &T, config: &FadeConfig) -> Result<(), DomError>
where
    E: FadeElement + ?Sized,
    T: FrameTimer + ?Sized,
{
    el.hide()?;
    el.remove_class(&config.marker_class)?;
    el.set_opacity(Some(0.0))?;
    el.show()?;
    animate_opacity(el, timer, config, 0.0, 1.0).await?;
    el.set_opacity(None)
}

/// Fade opacity 1 → 0, then hide the element and add the marker class.
///
/// # Errors
///
/// Returns the first [`DomError`] raised by the element.
pub async fn fade_out<E, T>(el: &E, timer: &T, config: &FadeConfig) -> Result<(), DomError>
where
    E: FadeElement + ?Sized,
    T: FrameTimer + ?Sized,
{
    animate_opacity(el, timer, config, 1.0, 0.0).await?;
    el.hide()?;
    el.set_opacity(None)?;
    el.add_class(&config.marker_class)
}

/// [`fade_in`], then run `done` once the element is fully visible.
///
/// # Errors
///
/// Returns the first [`DomError`]; `done` is not run in that case.
pub async fn fade_in_then<E, T, F>(el: &E, timer: &T, config: &FadeConfig, done: F) -> Result<(), DomError>
where
    E: FadeElement + ?Sized,
    T: FrameTimer + ?Sized,
    F: FnOnce(),
{
    fade_in(el, timer, config).await?;
    done();
    Ok(())
}

/// [`fade_out`], then run `done` once the element is hidden and marked.
///
/// # Errors
///
/// Returns the first [`DomError`]; `done` is not run in that case.
pub async fn fade_out_then<E, T, F>(el: &E, timer: &T, config: &FadeConfig, done: F) -> Result<(), DomError>
where
    E: FadeElement + ?Sized,
    T: FrameTimer + ?Sized,
    F: FnOnce(),
{
    fade_out(el, timer, config).await?;
    done();
    Ok(())
}

// =============================================================================
// QUEUE
// =============================================================================

/// Per-element lanes that run fades strictly one after another.
///
/// A lane exists only while a fade for its key is running or waiting.
pub struct FadeQueue<K> {
    lanes: RefCell<Vec<(K, Rc<Mutex<()>>)>>,
}

impl<K> Default for FadeQueue<K> {
    fn default() -> Self {
        Self { lanes: RefCell::new(Vec::new()) }
    }
}

impl<K: PartialEq + Clone> FadeQueue<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Await `fade` once every fade queued earlier for `key` has settled.
    pub async fn run<F: Future>(&self, key: &K, fade: F) -> F::Output {
        let lane = self.lane(key);
        let output = {
            let _turn = lane.lock().await;
            fade.await
        };
        drop(lane);
        self.prune();
        output
    }

    /// Keys with a fade running or waiting.
    #[must_use]
    pub fn active_lanes(&self) -> usize {
        self.lanes.borrow().len()
    }

    fn lane(&self, key: &K) -> Rc<Mutex<()>> {
        let mut lanes = self.lanes.borrow_mut();
        if let Some((_, lane)) = lanes.iter().find(|(k, _)| k == key) {
            return Rc::clone(lane);
        }
        let lane = Rc::new(Mutex::new(()));
        lanes.push((key.clone(), Rc::clone(&lane)));
        lane
    }

    fn prune(&self) {
        self.lanes.borrow_mut().retain(|(_, lane)| Rc::strong_count(lane) > 1);
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "browser")]
impl FadeElement for web_sys::HtmlElement {
    fn show(&self) -> Result<(), DomError> {
        self.style().remove_property("display")?;
        Ok(())
    }

    fn hide(&self) -> Result<(), DomError> {
        self.style().set_property("display", "none")?;
        Ok(())
    }

    fn set_opacity(&self, opacity: Option<f64>) -> Result<(), DomError> {
        match opacity {
            Some(value) => self.style().set_property("opacity", &value.to_string())?,
            None => {
                self.style().remove_property("opacity")?;
            }
        }
        Ok(())
    }

    fn add_class(&self, class: &str) -> Result<(), DomError> {
        self.class_list().add_1(class)?;
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<(), DomError> {
        self.class_list().remove_1(class)?;
        Ok(())
    }
}

/// `setTimeout`-backed frame timer.
#[cfg(feature = "browser")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

#[cfg(feature = "browser")]
#[async_trait::async_trait(?Send)]
impl FrameTimer for BrowserTimer {
    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
