//! Messages for the host UI, drained once per frame as a JSON array.

use cosmo_engine::TextureId;
use serde::Serialize;

use crate::projects::ProjectRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiMessage {
    /// New planet list entry, placed before `insert_before` (or appended).
    PlanetListEntry(PlanetListEntry),
    /// Highlighted list entry; `None` clears the highlight.
    ActiveItem { key: Option<String> },
    InfoPanel(InfoPanel),
    InfoPanelClosed,
    /// Empty message clears the feedback line.
    SearchFeedback { message: String },
    PauseState { paused: bool, label: String },
    SpeedLabel { label: String },
    TimeDisplay { text: String },
    LayerToggles { orbits: bool, atmospheres: bool, bloom: bool },
    LensFlare(LensFlare),
}

impl UiMessage {
    pub fn pause_state(paused: bool) -> Self {
        let label = if paused { "Resume" } else { "Pause" };
        UiMessage::PauseState { paused, label: label.to_string() }
    }

    pub fn speed_label(speed: f32) -> Self {
        UiMessage::SpeedLabel { label: format!("{speed:.1}x") }
    }

    /// `floor(t·10)` simulated days.
    pub fn time_display(days: i64) -> Self {
        UiMessage::TimeDisplay { text: format!("{days} days") }
    }
}

/// Whole simulated days shown for `elapsed` simulated seconds.
pub fn elapsed_days(elapsed: f32) -> i64 {
    (elapsed * 10.0).floor() as i64
}

// ── Planet list ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetListEntry {
    pub key: String,
    /// Upper-case body name.
    pub label: String,
    /// Tooltip: the project title.
    pub title: String,
    /// Label color (`#rrggbb`).
    pub color: String,
    pub order: i32,
    pub insert_before: Option<String>,
}

/// Ordering model of the host's planet list: each new entry goes before the
/// first existing entry with a lower order, so higher orders come first.
#[derive(Debug, Clone, Default)]
pub struct PlanetList {
    entries: Vec<(String, i32)>,
}

impl PlanetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`. Returns the key it was placed before (`Some(None)` when
    /// appended), or `None` if the key is already listed.
    pub fn insert(&mut self, key: &str, order: i32) -> Option<Option<String>> {
        if self.entries.iter().any(|(k, _)| k == key) {
            return None;
        }
        match self.entries.iter().position(|(_, o)| *o < order) {
            Some(i) => {
                let before = self.entries[i].0.clone();
                self.entries.insert(i, (key.to_string(), order));
                Some(Some(before))
            }
            None => {
                self.entries.push((key.to_string(), order));
                Some(None)
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Info panel ───────────────────────────────────────────────────────

pub const GENERIC_QUOTE: &str = "Each planet represents a journey through my academic universe";
pub const UNDOCUMENTED_NOTE: &str = "This project is still being documented.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

impl Stat {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self { label: label.to_string(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectLink {
    pub href: String,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub key: String,
    pub title: String,
    pub stats: Vec<Stat>,
    pub summary: Option<String>,
    pub contributions: Vec<String>,
    pub technologies: Option<String>,
    pub link: Option<ProjectLink>,
    /// Shown in place of the description when there is nothing else to say.
    pub note: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl InfoPanel {
    pub fn for_project(key: &str, project: &ProjectRecord) -> Self {
        let mut stats: Vec<Stat> = [
            ("Term", project.term),
            ("Focus", project.focus),
            ("Role", project.role),
            ("Team", project.team),
        ]
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(l, v)| Stat::new(l, *v))
        .collect();
        if stats.is_empty() {
            stats.push(Stat::new("Term", "—"));
        }

        let link = non_empty(project.page).map(|href| ProjectLink {
            href,
            label: project.button_label.unwrap_or("Open").to_string(),
            icon: project.button_icon.unwrap_or("🔗").to_string(),
        });
        let summary = non_empty(project.summary);
        let technologies = non_empty(project.technologies);
        let contributions: Vec<String> = project.contributions.iter().map(|c| c.to_string()).collect();
        let note = if summary.is_none() && contributions.is_empty() && technologies.is_none() && link.is_none() {
            Some(UNDOCUMENTED_NOTE.to_string())
        } else {
            None
        };

        Self {
            key: key.to_string(),
            title: project.title.to_string(),
            stats,
            summary,
            contributions,
            technologies,
            link,
            note,
        }
    }

    /// Plain body stats for bodies without a project. `distance` is only
    /// known for bodies circling the sun.
    pub fn generic(key: &str, name: &str, radius: f32, distance: Option<f32>) -> Self {
        let mut stats = vec![Stat::new("Radius (relative to Earth)", format!("{radius:.2}"))];
        if let Some(d) = distance {
            stats.push(Stat::new("Distance (sim units)", format!("{d:.2}")));
        }
        Self {
            key: key.to_string(),
            title: if name.is_empty() { "Unknown".to_string() } else { name.to_string() },
            stats,
            summary: None,
            contributions: Vec::new(),
            technologies: None,
            link: None,
            note: Some(GENERIC_QUOTE.to_string()),
        }
    }
}

// ── Lens flare ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlareElement {
    pub texture: u32,
    /// Sprite size in pixels.
    pub size: f32,
    /// Position along the sun-to-center line (0 = at the sun).
    pub distance: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensFlare {
    pub elements: Vec<FlareElement>,
}

impl LensFlare {
    /// One warm main flare plus four ghosts along the axis.
    pub fn new(main: TextureId, ghost: TextureId) -> Self {
        let mut elements = vec![FlareElement {
            texture: main.0,
            size: 500.0,
            distance: 0.0,
            color: [1.0, 0.85, 0.6],
        }];
        for (size, distance) in [(50.0, 0.4), (70.0, 0.6), (90.0, 0.8), (110.0, 0.95)] {
            elements.push(FlareElement { texture: ghost.0, size, distance, color: [1.0, 1.0, 1.0] });
        }
        Self { elements }
    }
}
