//! Everything the intro needs from the page: element text, classes, timers
//! and a 2D canvas. The browser implementation lives in `dom`.

/// Page elements the intro writes to. Missing elements are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroElement {
    ProgressText,
    StatusText,
    /// Distance readout.
    MessageDisplay,
    PoemZh,
    PoemEn,
}

impl IntroElement {
    pub fn dom_id(self) -> &'static str {
        match self {
            IntroElement::ProgressText => "progressText",
            IntroElement::StatusText => "statusText",
            IntroElement::MessageDisplay => "messageDisplay",
            IntroElement::PoemZh => "poemLineZh",
            IntroElement::PoemEn => "poemLineEn",
        }
    }
}

/// Visual state of the loading screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Loading,
    /// Loading done; the dismiss affordance is showing.
    Ready,
    Hidden,
}

/// RGBA with straight alpha, channels in [0, 1].
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Translucent fill over the whole canvas; leaves motion trails.
    Fade { color: Rgba },
    /// Full-canvas fill with a linear gradient from `from` to `to`.
    Band { from: [f32; 2], to: [f32; 2], stops: Vec<(f32, Rgba)> },
    Rect { x: f32, y: f32, w: f32, h: f32, color: Rgba },
    Circle { x: f32, y: f32, r: f32, color: Rgba },
    /// Round-capped stroke.
    Line { from: [f32; 2], to: [f32; 2], width: f32, color: Rgba },
}

/// Draw list for one animation frame, in painter's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntroFrame {
    pub ops: Vec<DrawOp>,
}

impl IntroFrame {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { ops: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

pub trait IntroHost {
    /// Size the canvas to the window. `None` when there is no usable canvas.
    fn fit_canvas(&mut self) -> Option<(f32, f32)>;
    fn has_element(&self, element: IntroElement) -> bool;
    fn set_text(&mut self, element: IntroElement, text: &str);
    /// Toggle the blinking-caret class on a poem line.
    fn set_typing(&mut self, element: IntroElement, active: bool);
    fn set_progress_width(&mut self, percent: f32);
    fn set_screen(&mut self, state: ScreenState);
    /// Whether the dismiss button takes pointer events.
    fn set_cta_enabled(&mut self, enabled: bool);

    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
    fn schedule_typewriter(&mut self, delay_ms: u32);
    fn cancel_typewriter(&mut self);
    fn listen_resize(&mut self, listen: bool);

    fn draw(&mut self, frame: &IntroFrame);
}

/// Host that records every call, for tests.
#[cfg(test)]
pub mod recording {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub canvas: Option<(f32, f32)>,
        pub missing: Vec<IntroElement>,
        pub texts: HashMap<IntroElement, String>,
        pub typing: HashMap<IntroElement, bool>,
        pub progress_width: Option<f32>,
        pub screen: Option<ScreenState>,
        pub cta_enabled: bool,
        pub frame_pending: bool,
        pub frames_requested: usize,
        pub typewriter_delay: Option<u32>,
        pub resize_listening: bool,
        pub draws: usize,
        pub last_frame: Option<IntroFrame>,
    }

    impl RecordingHost {
        pub fn with_canvas(w: f32, h: f32) -> Self {
            Self { canvas: Some((w, h)), ..Self::default() }
        }

        pub fn text(&self, element: IntroElement) -> &str {
            self.texts.get(&element).map_or("", String::as_str)
        }
    }

    impl IntroHost for RecordingHost {
        fn fit_canvas(&mut self) -> Option<(f32, f32)> {
            self.canvas
        }

        fn has_element(&self, element: IntroElement) -> bool {
            !self.missing.contains(&element)
        }

        fn set_text(&mut self, element: IntroElement, text: &str) {
            if self.has_element(element) {
                self.texts.insert(element, text.to_string());
            }
        }

        fn set_typing(&mut self, element: IntroElement, active: bool) {
            self.typing.insert(element, active);
        }

        fn set_progress_width(&mut self, percent: f32) {
            self.progress_width = Some(percent);
        }

        fn set_screen(&mut self, state: ScreenState) {
            self.screen = Some(state);
        }

        fn set_cta_enabled(&mut self, enabled: bool) {
            self.cta_enabled = enabled;
        }

        fn request_frame(&mut self) {
            self.frame_pending = true;
            self.frames_requested += 1;
        }

        fn cancel_frame(&mut self) {
            self.frame_pending = false;
        }

        fn schedule_typewriter(&mut self, delay_ms: u32) {
            self.typewriter_delay = Some(delay_ms);
        }

        fn cancel_typewriter(&mut self) {
            self.typewriter_delay = None;
        }

        fn listen_resize(&mut self, listen: bool) {
            self.resize_listening = listen;
        }

        fn draw(&mut self, frame: &IntroFrame) {
            self.draws += 1;
            self.last_frame = Some(frame.clone());
        }
    }
}
