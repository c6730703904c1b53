//! Loading intro: a 2D starfield flight drawn behind the progress bar while
//! textures load, plus the typewriter poem and the dismiss/skip handling.
//!
//! All page effects go through [`IntroHost`]; [`dom::DomIntroHost`] is the
//! browser implementation.

pub mod field;
pub mod host;
pub mod particles;
pub mod typewriter;
pub mod dom;

use cosmo_engine::Rng;

pub use field::Starfield;
pub use host::{DrawOp, IntroElement, IntroFrame, IntroHost, ScreenState};
pub use typewriter::Typewriter;

pub const STATUSES: [&str; 9] = [
    "Entering galactic plane...",
    "Passing star clusters...",
    "Crossing spiral arms...",
    "Approaching galactic core...",
    "Dense stellar region...",
    "Stabilizing near core...",
    "Outer spiral transit...",
    "Leaving the galaxy...",
    "Journey complete!",
];
pub const COMPLETE_STATUS: &str = "Journey complete!";
/// Shown once loading finishes, pointing at the dismiss affordance.
pub const DISMISS_PROMPT: &str = "Click anywhere to enter the system.";
pub const WELCOME_BACK: &str = "Welcome back.";
/// Galaxy crossing distance shown at 100%, in kly.
pub const JOURNEY_KLY: f32 = 105.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroState {
    /// Not initialized, or no canvas.
    Idle,
    Running,
    AwaitingDismiss,
    Dismissed,
    Skipped,
}

// ── Progress mapping ─────────────────────────────────────────────────

/// Status line for a progress percentage.
pub fn status_index(percent: f32) -> usize {
    ((percent / 100.0 * STATUSES.len() as f32).floor() as usize).min(STATUSES.len() - 1)
}

/// Cruise speed of the particle stream: accelerate, weave through the
/// core, then slow down on the way out.
pub fn target_speed(percent: f32) -> f32 {
    if percent < 20.0 {
        12.0 + percent * 0.4
    } else if percent < 80.0 {
        22.0 + (percent * 0.12).sin() * 5.0
    } else {
        (30.0 - (percent - 80.0)).max(10.0)
    }
}

pub fn distance_text(percent: f32) -> String {
    format!("{:.1} kly", percent / 100.0 * JOURNEY_KLY)
}

// ── Intro field ──────────────────────────────────────────────────────

pub struct IntroField<H: IntroHost> {
    host: H,
    rng: Rng,
    state: IntroState,
    starfield: Option<Starfield>,
    typewriter: Typewriter,
    progress: f32,
    status_override: Option<String>,
    width: f32,
    height: f32,
}

impl<H: IntroHost> IntroField<H> {
    pub fn new(host: H, seed: u64) -> Self {
        Self {
            host,
            rng: Rng::new(seed),
            state: IntroState::Idle,
            starfield: None,
            typewriter: Typewriter::new(),
            progress: 0.0,
            status_override: None,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> IntroState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    /// Size the canvas, seed the populations and start the animation and
    /// the typewriter. Without a canvas the intro stays idle.
    pub fn initialize(&mut self) {
        let Some((width, height)) = self.host.fit_canvas() else {
            log::warn!("intro: no loading canvas, skipping animation");
            return;
        };
        self.width = width;
        self.height = height;

        self.host.set_screen(ScreenState::Loading);
        self.host.set_cta_enabled(false);
        for line in [IntroElement::PoemZh, IntroElement::PoemEn] {
            self.host.set_text(line, "");
            self.host.set_typing(line, false);
        }
        self.typewriter.reset();
        self.host.cancel_typewriter();
        self.host.listen_resize(true);

        self.starfield = Some(Starfield::build(&mut self.rng, width, height));
        self.progress = 0.0;
        self.status_override = None;
        self.state = IntroState::Running;
        log::info!("intro: started at {width}x{height}");

        self.frame();
        self.host.schedule_typewriter(typewriter::FIRST_DELAY_MS);
    }

    /// Pin the status line. `None` or an empty string returns control to
    /// the progress-driven statuses.
    pub fn set_status(&mut self, text: Option<&str>) {
        if !self.is_live() {
            return;
        }
        self.status_override = text.filter(|t| !t.is_empty()).map(str::to_string);
        if let Some(text) = &self.status_override {
            self.host.set_text(IntroElement::StatusText, text);
        }
    }

    /// Ignored unless the loading screen is showing.
    pub fn update_progress(&mut self, percent: f32, status: Option<&str>) {
        if !self.is_live() {
            return;
        }
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        self.progress = percent;

        self.host.set_progress_width(percent);
        self.host.set_text(IntroElement::ProgressText, &format!("{}%", percent.floor() as u32));
        if status.is_some() {
            self.set_status(status);
        } else if self.status_override.is_none() {
            self.host.set_text(IntroElement::StatusText, STATUSES[status_index(percent)]);
        }
        self.host.set_text(IntroElement::MessageDisplay, &distance_text(percent));

        if let Some(field) = &mut self.starfield {
            field.target_speed = target_speed(percent);
        }
    }

    /// Loading finished: show 100% and wait for the user to dismiss.
    pub fn mark_complete(&mut self) {
        if self.state != IntroState::Running {
            return;
        }
        self.update_progress(100.0, Some(COMPLETE_STATUS));
        self.host.set_screen(ScreenState::Ready);
        self.host.set_cta_enabled(true);
        self.state = IntroState::AwaitingDismiss;
        self.set_status(Some(DISMISS_PROMPT));
    }

    /// The loading screen is up and still owns its readouts.
    fn is_live(&self) -> bool {
        matches!(self.state, IntroState::Running | IntroState::AwaitingDismiss)
    }

    /// Hide the screen and stop every callback. Only valid after
    /// [`mark_complete`](Self::mark_complete).
    pub fn dismiss(&mut self) -> bool {
        if self.state != IntroState::AwaitingDismiss {
            return false;
        }
        self.host.set_screen(ScreenState::Hidden);
        self.host.set_cta_enabled(false);
        self.stop();
        self.state = IntroState::Dismissed;
        log::info!("intro: dismissed");
        true
    }

    /// Back/forward navigation skips the intro entirely.
    pub fn skip_if_returning(&mut self, nav_type: &str) -> bool {
        if nav_type != "back_forward" {
            return false;
        }
        self.host.set_screen(ScreenState::Hidden);
        self.stop();
        self.host.set_progress_width(100.0);
        self.host.set_text(IntroElement::ProgressText, "100%");
        self.host.set_text(IntroElement::StatusText, WELCOME_BACK);
        self.host.set_text(IntroElement::MessageDisplay, "Ready");
        self.progress = 100.0;
        self.state = IntroState::Skipped;
        true
    }

    fn stop(&mut self) {
        self.host.cancel_frame();
        self.host.listen_resize(false);
        self.host.cancel_typewriter();
        let full = self.typewriter.finish();
        self.show_lines(&full);
    }

    fn show_lines(&mut self, tick: &typewriter::TypewriterTick) {
        self.host.set_text(IntroElement::PoemZh, &tick.zh.text);
        self.host.set_typing(IntroElement::PoemZh, tick.zh.typing);
        self.host.set_text(IntroElement::PoemEn, &tick.en.text);
        self.host.set_typing(IntroElement::PoemEn, tick.en.typing);
    }

    /// One animation-frame callback.
    pub fn frame(&mut self) {
        if !self.is_live() {
            return;
        }
        let Some(field) = &mut self.starfield else { return };
        self.host.request_frame();
        let frame = field.frame(&mut self.rng, self.width, self.height);
        self.host.draw(&frame);
    }

    /// One typewriter timer callback.
    pub fn typewriter_tick(&mut self) {
        if !self.is_live() {
            return;
        }
        if !self.host.has_element(IntroElement::PoemZh) || !self.host.has_element(IntroElement::PoemEn) {
            return;
        }
        let tick = self.typewriter.tick();
        self.show_lines(&tick);
        if !tick.done {
            self.host.schedule_typewriter(typewriter::STEP_DELAY_MS);
        }
    }

    /// Window resized: refit the canvas. Particles keep their positions.
    pub fn resize(&mut self) {
        if let Some((width, height)) = self.host.fit_canvas() {
            self.width = width;
            self.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::host::recording::RecordingHost;
    use super::*;

    fn running() -> IntroField<RecordingHost> {
        let mut intro = IntroField::new(RecordingHost::with_canvas(800.0, 600.0), 9);
        intro.initialize();
        intro
    }

    #[test]
    fn progress_mapping() {
        assert_eq!(status_index(0.0), 0);
        assert_eq!(status_index(50.0), 4);
        assert_eq!(status_index(100.0), 8);
        assert_eq!(target_speed(10.0), 16.0);
        assert!((target_speed(50.0) - (22.0 + 6.0f32.sin() * 5.0)).abs() < 1e-4);
        assert_eq!(target_speed(90.0), 20.0);
        assert_eq!(target_speed(100.0), 10.0);
        assert_eq!(distance_text(50.0), "52.5 kly");
    }

    #[test]
    fn initialize_without_canvas_stays_idle() {
        let mut intro = IntroField::new(RecordingHost::default(), 1);
        intro.initialize();
        assert_eq!(intro.state(), IntroState::Idle);
        intro.update_progress(50.0, None);
        assert_eq!(intro.host().progress_width, None);
        assert_eq!(intro.host().draws, 0);
    }

    #[test]
    fn initialize_starts_animation_and_typewriter() {
        let intro = running();
        let host = intro.host();
        assert_eq!(intro.state(), IntroState::Running);
        assert_eq!(host.screen, Some(ScreenState::Loading));
        assert!(!host.cta_enabled);
        assert!(host.frame_pending);
        assert_eq!(host.draws, 1);
        assert!(host.resize_listening);
        assert_eq!(host.typewriter_delay, Some(typewriter::FIRST_DELAY_MS));
        assert_eq!(host.text(IntroElement::PoemZh), "");
    }

    #[test]
    fn progress_updates_readouts() {
        let mut intro = running();
        intro.update_progress(47.6, None);
        let host = intro.host();
        assert_eq!(host.progress_width, Some(47.6));
        assert_eq!(host.text(IntroElement::ProgressText), "47%");
        assert_eq!(host.text(IntroElement::StatusText), "Dense stellar region...");
        assert_eq!(host.text(IntroElement::MessageDisplay), "50.0 kly");
        let target = intro.starfield().map(|f| f.target_speed);
        assert_eq!(target, Some(target_speed(47.6)));
    }

    #[test]
    fn progress_is_clamped() {
        let mut intro = running();
        intro.update_progress(150.0, None);
        assert_eq!(intro.host().text(IntroElement::ProgressText), "100%");
        intro.update_progress(f32::NAN, None);
        assert_eq!(intro.progress(), 0.0);
        intro.update_progress(-4.0, None);
        assert_eq!(intro.host().progress_width, Some(0.0));
    }

    #[test]
    fn status_override_wins_until_cleared() {
        let mut intro = running();
        intro.set_status(Some("Failed to load textures/sun.jpg"));
        intro.update_progress(90.0, None);
        assert_eq!(intro.host().text(IntroElement::StatusText), "Failed to load textures/sun.jpg");

        intro.set_status(Some(""));
        intro.update_progress(85.0, None);
        assert_eq!(intro.host().text(IntroElement::StatusText), "Leaving the galaxy...");
    }

    #[test]
    fn complete_then_dismiss() {
        let mut intro = running();
        assert!(!intro.dismiss());

        intro.mark_complete();
        assert_eq!(intro.state(), IntroState::AwaitingDismiss);
        assert_eq!(intro.host().screen, Some(ScreenState::Ready));
        assert!(intro.host().cta_enabled);
        assert_eq!(intro.host().text(IntroElement::StatusText), DISMISS_PROMPT);
        assert_eq!(intro.host().text(IntroElement::ProgressText), "100%");

        // a late progress report keeps the prompt
        intro.update_progress(100.0, None);
        assert_eq!(intro.host().text(IntroElement::StatusText), DISMISS_PROMPT);

        // animation keeps running behind the ready screen
        intro.frame();
        assert_eq!(intro.host().draws, 2);

        assert!(intro.dismiss());
        let host = intro.host();
        assert_eq!(host.screen, Some(ScreenState::Hidden));
        assert!(!host.frame_pending);
        assert!(!host.resize_listening);
        assert_eq!(host.typewriter_delay, None);
        assert_eq!(host.text(IntroElement::PoemEn), typewriter::POEM_EN);
        assert_eq!(host.typing.get(&IntroElement::PoemEn), Some(&false));

        intro.frame();
        assert_eq!(intro.host().draws, 2);
        assert!(!intro.dismiss());
    }

    #[test]
    fn skip_only_on_back_forward() {
        let mut intro = running();
        assert!(!intro.skip_if_returning("navigate"));
        assert!(!intro.skip_if_returning("reload"));
        assert_eq!(intro.state(), IntroState::Running);

        assert!(intro.skip_if_returning("back_forward"));
        let host = intro.host();
        assert_eq!(intro.state(), IntroState::Skipped);
        assert_eq!(host.screen, Some(ScreenState::Hidden));
        assert_eq!(host.text(IntroElement::ProgressText), "100%");
        assert_eq!(host.text(IntroElement::StatusText), WELCOME_BACK);
        assert_eq!(host.text(IntroElement::MessageDisplay), "Ready");
        assert_eq!(host.text(IntroElement::PoemZh), typewriter::POEM_ZH);
        assert!(!intro.dismiss());
    }

    #[test]
    fn loading_reports_after_skip_leave_the_page_alone() {
        let mut intro = running();
        assert!(intro.skip_if_returning("back_forward"));
        intro.update_progress(30.0, None);
        intro.set_status(Some("Failed to load textures/mars.jpg"));
        intro.mark_complete();

        let host = intro.host();
        assert_eq!(host.text(IntroElement::StatusText), WELCOME_BACK);
        assert_eq!(host.text(IntroElement::ProgressText), "100%");
        assert_eq!(host.text(IntroElement::MessageDisplay), "Ready");
        assert_eq!(host.progress_width, Some(100.0));
        assert_eq!(intro.progress(), 100.0);
        assert_eq!(intro.state(), IntroState::Skipped);
    }

    #[test]
    fn loading_reports_after_dismiss_are_ignored() {
        let mut intro = running();
        intro.mark_complete();
        assert!(intro.dismiss());
        intro.update_progress(40.0, None);
        intro.set_status(Some("Failed to load textures/venus.jpg"));
        assert_eq!(intro.host().text(IntroElement::ProgressText), "100%");
        assert_eq!(intro.host().text(IntroElement::StatusText), DISMISS_PROMPT);
    }

    #[test]
    fn typewriter_ticks_reschedule_until_done() {
        let mut intro = running();
        intro.typewriter_tick();
        assert_eq!(intro.host().text(IntroElement::PoemZh), "你");
        assert_eq!(intro.host().text(IntroElement::PoemEn), "I");
        assert_eq!(intro.host().typewriter_delay, Some(typewriter::STEP_DELAY_MS));

        let longest = typewriter::POEM_EN.chars().count();
        for _ in 0..longest {
            intro.typewriter_tick();
        }
        assert_eq!(intro.host().text(IntroElement::PoemEn), typewriter::POEM_EN);
        assert_eq!(intro.host().typing.get(&IntroElement::PoemZh), Some(&false));
    }

    #[test]
    fn typewriter_stops_without_poem_elements() {
        let mut host = RecordingHost::with_canvas(800.0, 600.0);
        host.missing.push(IntroElement::PoemEn);
        let mut intro = IntroField::new(host, 2);
        intro.initialize();
        intro.host_mut().typewriter_delay = None;
        intro.typewriter_tick();
        assert_eq!(intro.host().typewriter_delay, None);
        assert_eq!(intro.host().text(IntroElement::PoemZh), "");
    }

    #[test]
    fn resize_refits_canvas() {
        let mut intro = running();
        intro.host_mut().canvas = Some((1024.0, 768.0));
        intro.resize();
        intro.frame();
        let band = intro.host().last_frame.as_ref().map(|f| f.ops[1].clone());
        assert!(matches!(band, Some(DrawOp::Band { to, .. }) if to == [1024.0, 768.0 * 0.7]));
    }
}
