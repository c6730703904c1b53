use wasm_bindgen::prelude::*;
use cosmo_engine::*;

// Static tables
mod assets;
mod bodies;
mod projects;

// Scene construction and per-frame update
mod body;
mod builder;
mod color;
mod geometry;
mod materials;
mod meteor;
mod orbit;
mod update;

// Interaction and host-facing UI
mod interaction;
mod ui;

// Loading screen
pub mod intro;

// Main game controller
mod game;

use game::PortfolioOrrery;
use intro::dom::{navigation_type, DomIntroHost};
use intro::IntroField;

cosmo_web::export_game!(PortfolioOrrery, "portfolio-orrery", vectors);

// ── Loading intro ────────────────────────────────────────────────────

thread_local! {
    static INTRO: RefCell<Option<IntroField<DomIntroHost>>> = RefCell::new(None);
}

/// Run `f` against the intro if one exists. `None` when the intro was never
/// created or is already borrowed further up the stack.
pub(crate) fn with_intro<R>(f: impl FnOnce(&mut IntroField<DomIntroHost>) -> R) -> Option<R> {
    INTRO.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

fn ensure_intro() -> bool {
    if with_intro(|_| ()).is_some() {
        return true;
    }
    let Some(host) = DomIntroHost::new() else {
        log::warn!("intro: no browser document");
        return false;
    };
    let intro = IntroField::new(host, js_sys::Date::now() as u64);
    INTRO.with(|cell| *cell.borrow_mut() = Some(intro));
    true
}

#[wasm_bindgen]
pub fn intro_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if ensure_intro() {
        with_intro(|intro| intro.initialize());
    }
}

#[wasm_bindgen]
pub fn intro_set_status(text: Option<String>) {
    with_intro(|intro| intro.set_status(text.as_deref()));
}

#[wasm_bindgen]
pub fn intro_update_progress(percent: f32, status: Option<String>) {
    with_intro(|intro| intro.update_progress(percent, status.as_deref()));
}

#[wasm_bindgen]
pub fn intro_mark_complete() {
    with_intro(|intro| intro.mark_complete());
}

#[wasm_bindgen]
pub fn intro_dismiss() -> bool {
    with_intro(|intro| intro.dismiss()).unwrap_or(false)
}

/// Skip the intro on back/forward navigation. Returns whether it skipped.
#[wasm_bindgen]
pub fn intro_skip_if_returning() -> bool {
    let Some(nav) = navigation_type() else { return false };
    if nav != "back_forward" || !ensure_intro() {
        return false;
    }
    with_intro(|intro| intro.skip_if_returning(&nav)).unwrap_or(false)
}
