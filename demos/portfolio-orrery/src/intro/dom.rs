//! Browser implementation of [`IntroHost`] on top of `web-sys`.

use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use super::host::{DrawOp, IntroElement, IntroFrame, IntroHost, Rgba, ScreenState};

const CANVAS_ID: &str = "loadingCanvas";
const SCREEN_ID: &str = "loadingScreen";
const CTA_ID: &str = "loadingCta";
const PROGRESS_BAR_ID: &str = "progressBar";
const TYPING_CLASS: &str = "typing-active";

fn css(color: Rgba) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({},{},{},{:.3})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}

/// Navigation type of the current page load (`navigate`, `reload`,
/// `back_forward`), if the browser reports one.
pub fn navigation_type() -> Option<String> {
    let performance = web_sys::window()?.performance()?;
    let entry = performance.get_entries_by_type("navigation").get(0);
    if entry.is_undefined() {
        return None;
    }
    js_sys::Reflect::get(&entry, &JsValue::from_str("type")).ok()?.as_string()
}

pub struct DomIntroHost {
    window: Window,
    document: Document,
    canvas: Option<HtmlCanvasElement>,
    context: Option<CanvasRenderingContext2d>,
    on_frame: Closure<dyn FnMut(f64)>,
    on_typewriter: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
    frame_handle: Option<i32>,
    typewriter_handle: Option<i32>,
    resize_listening: bool,
}

impl DomIntroHost {
    /// `None` outside a browser document.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let context = canvas
            .as_ref()
            .and_then(|c| c.get_context("2d").ok().flatten())
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());

        let on_frame = Closure::wrap(Box::new(move |_timestamp: f64| {
            crate::with_intro(|intro| intro.frame());
        }) as Box<dyn FnMut(f64)>);
        let on_typewriter = Closure::wrap(Box::new(move || {
            crate::with_intro(|intro| intro.typewriter_tick());
        }) as Box<dyn FnMut()>);
        let on_resize = Closure::wrap(Box::new(move || {
            crate::with_intro(|intro| intro.resize());
        }) as Box<dyn FnMut()>);

        Some(Self {
            window,
            document,
            canvas,
            context,
            on_frame,
            on_typewriter,
            on_resize,
            frame_handle: None,
            typewriter_handle: None,
            resize_listening: false,
        })
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.element(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn fill_style(ctx: &CanvasRenderingContext2d, color: Rgba) {
        ctx.set_fill_style_str(&css(color));
    }

    fn paint(ctx: &CanvasRenderingContext2d, op: &DrawOp, width: f64, height: f64) {
        match op {
            DrawOp::Fade { color } => {
                Self::fill_style(ctx, *color);
                ctx.fill_rect(0.0, 0.0, width, height);
            }
            DrawOp::Band { from, to, stops } => {
                let gradient = ctx.create_linear_gradient(
                    from[0] as f64,
                    from[1] as f64,
                    to[0] as f64,
                    to[1] as f64,
                );
                for (offset, color) in stops {
                    if gradient.add_color_stop(*offset, &css(*color)).is_err() {
                        log::warn!("intro: bad gradient stop {offset}");
                    }
                }
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, width, height);
            }
            DrawOp::Rect { x, y, w, h, color } => {
                Self::fill_style(ctx, *color);
                ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
            }
            DrawOp::Circle { x, y, r, color } => {
                if *r <= 0.0 {
                    return;
                }
                Self::fill_style(ctx, *color);
                ctx.begin_path();
                if ctx.arc(*x as f64, *y as f64, *r as f64, 0.0, TAU).is_ok() {
                    ctx.fill();
                }
            }
            DrawOp::Line { from, to, width: line_width, color } => {
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(*line_width as f64);
                ctx.set_line_cap("round");
                ctx.begin_path();
                ctx.move_to(from[0] as f64, from[1] as f64);
                ctx.line_to(to[0] as f64, to[1] as f64);
                ctx.stroke();
            }
        }
    }
}

impl IntroHost for DomIntroHost {
    fn fit_canvas(&mut self) -> Option<(f32, f32)> {
        self.context.as_ref()?;
        let canvas = self.canvas.as_ref()?;
        let width = self.window.inner_width().ok()?.as_f64()?;
        let height = self.window.inner_height().ok()?.as_f64()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        Some((width as f32, height as f32))
    }

    fn has_element(&self, element: IntroElement) -> bool {
        self.element(element.dom_id()).is_some()
    }

    fn set_text(&mut self, element: IntroElement, text: &str) {
        if let Some(el) = self.element(element.dom_id()) {
            el.set_text_content(Some(text));
        }
    }

    fn set_typing(&mut self, element: IntroElement, active: bool) {
        if let Some(el) = self.element(element.dom_id()) {
            let _ = el.class_list().toggle_with_force(TYPING_CLASS, active);
        }
    }

    fn set_progress_width(&mut self, percent: f32) {
        if let Some(bar) = self.html_element(PROGRESS_BAR_ID) {
            let _ = bar.style().set_property("width", &format!("{percent}%"));
        }
    }

    fn set_screen(&mut self, state: ScreenState) {
        let Some(screen) = self.element(SCREEN_ID) else { return };
        let classes = screen.class_list();
        let result = match state {
            ScreenState::Loading => classes.remove_2("hidden", "ready"),
            ScreenState::Ready => classes.add_1("ready"),
            ScreenState::Hidden => classes.add_1("hidden").and_then(|_| classes.remove_1("ready")),
        };
        if result.is_err() {
            log::warn!("intro: could not update loading screen classes");
        }
    }

    fn set_cta_enabled(&mut self, enabled: bool) {
        if let Some(cta) = self.html_element(CTA_ID) {
            let value = if enabled { "auto" } else { "none" };
            let _ = cta.style().set_property("pointer-events", value);
        }
    }

    fn request_frame(&mut self) {
        match self.window.request_animation_frame(self.on_frame.as_ref().unchecked_ref()) {
            Ok(handle) => self.frame_handle = Some(handle),
            Err(_) => log::warn!("intro: requestAnimationFrame failed"),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    fn schedule_typewriter(&mut self, delay_ms: u32) {
        self.cancel_typewriter();
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.on_typewriter.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(handle) => self.typewriter_handle = Some(handle),
            Err(_) => log::warn!("intro: setTimeout failed"),
        }
    }

    fn cancel_typewriter(&mut self) {
        if let Some(handle) = self.typewriter_handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn listen_resize(&mut self, listen: bool) {
        if listen == self.resize_listening {
            return;
        }
        let callback = self.on_resize.as_ref().unchecked_ref();
        let result = if listen {
            self.window.add_event_listener_with_callback("resize", callback)
        } else {
            self.window.remove_event_listener_with_callback("resize", callback)
        };
        match result {
            Ok(()) => self.resize_listening = listen,
            Err(_) => log::warn!("intro: could not update resize listener"),
        }
    }

    fn draw(&mut self, frame: &IntroFrame) {
        let (Some(ctx), Some(canvas)) = (&self.context, &self.canvas) else { return };
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        for op in &frame.ops {
            Self::paint(ctx, op, width, height);
        }
    }
}
