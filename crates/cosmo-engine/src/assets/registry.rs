use glam::Vec2;
use serde::Serialize;
use crate::assets::manifest::{AssetManifest, TextureDescriptor};
use crate::assets::placeholder::{self, DEFAULT_PLACEHOLDER, PLACEHOLDER_SIZE};
use crate::components::material::TextureId;

/// Load state of one texture.
///
/// `Pending { source } → Loaded { source }` on success,
/// `Pending { source } → Pending { source + 1 }` on failure while sources
/// remain, `→ Placeholder` once they run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    /// Waiting for `sources[source]`.
    Pending { source: usize },
    /// `sources[source]` loaded.
    Loaded { source: usize },
    /// Pixels come from Rust: a fallback gradient or a generated sprite.
    Placeholder,
}

/// Work item for the host's texture fetcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TextureRequest {
    /// Fetch `url` and report back with `mark_loaded` / `mark_failed`.
    Fetch { key: String, id: u32, url: String, srgb: bool },
    /// Upload the pixels from `placeholder_pixels(key)`.
    Placeholder { key: String, id: u32, size: u32 },
}

struct TextureEntry {
    desc: TextureDescriptor,
    id: TextureId,
    status: TextureStatus,
    /// Whether the current status has been handed to the host.
    dispatched: bool,
    generated: Option<(u32, Vec<u8>)>,
}

struct ScrollEntry {
    id: TextureId,
    speed: Vec2,
}

/// Registry of textures in priority order with their fallback state,
/// plus per-texture UV scroll offsets.
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    failures: Vec<String>,
    scrolls: Vec<ScrollEntry>,
    /// Two floats (u, v) per texture id.
    offsets: Vec<f32>,
    /// Bumped whenever a texture settles.
    epoch: u32,
    /// Ids are baked into materials; the manifest can no longer change.
    frozen: bool,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            failures: Vec::new(),
            scrolls: Vec::new(),
            offsets: Vec::new(),
            epoch: 0,
            frozen: false,
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut reg = Self::new();
        reg.load_manifest(manifest);
        reg
    }

    /// Replace every entry with the manifest's textures. Duplicate keys keep
    /// their first occurrence. Returns false, changing nothing, once the
    /// registry is frozen.
    pub fn load_manifest(&mut self, manifest: &AssetManifest) -> bool {
        if self.frozen {
            log::warn!("texture ids are in use; ignoring manifest with {} textures", manifest.textures.len());
            return false;
        }
        self.entries.clear();
        self.failures.clear();
        self.scrolls.clear();
        self.offsets.clear();
        for desc in &manifest.textures {
            if self.index_of(&desc.key).is_some() {
                log::warn!("duplicate texture key {:?} ignored", desc.key);
                continue;
            }
            let status = if desc.sources.is_empty() {
                log::warn!("no texture source provided for {}; using placeholder", desc.key);
                TextureStatus::Placeholder
            } else {
                TextureStatus::Pending { source: 0 }
            };
            self.push_entry(desc.clone(), status, None);
        }
        self.epoch = self.epoch.wrapping_add(1);
        true
    }

    /// Keep every id stable from here on. Generated textures can still be
    /// added; manifest replacement is refused.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Register a texture whose pixels are generated in code.
    pub fn add_generated(&mut self, key: &str, size: u32, pixels: Vec<u8>) -> TextureId {
        if let Some(i) = self.index_of(key) {
            let entry = &mut self.entries[i];
            entry.status = TextureStatus::Placeholder;
            entry.generated = Some((size, pixels));
            entry.dispatched = false;
            return entry.id;
        }
        self.push_entry(TextureDescriptor::new(key), TextureStatus::Placeholder, Some((size, pixels)))
    }

    fn push_entry(
        &mut self,
        desc: TextureDescriptor,
        status: TextureStatus,
        generated: Option<(u32, Vec<u8>)>,
    ) -> TextureId {
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(TextureEntry { desc, id, status, dispatched: false, generated });
        self.offsets.resize(self.entries.len() * 2, 0.0);
        id
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.desc.key == key)
    }

    fn entry(&self, key: &str) -> Option<&TextureEntry> {
        self.entries.iter().find(|e| e.desc.key == key)
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn id(&self, key: &str) -> Option<TextureId> {
        self.entry(key).map(|e| e.id)
    }

    pub fn status(&self, key: &str) -> Option<TextureStatus> {
        self.entry(key).map(|e| e.status)
    }

    /// True only when one of the texture's own sources loaded.
    pub fn is_loaded(&self, key: &str) -> bool {
        matches!(self.status(key), Some(TextureStatus::Loaded { .. }))
    }

    /// True when the texture can be sampled: loaded or placeholder.
    pub fn is_available(&self, key: &str) -> bool {
        matches!(
            self.status(key),
            Some(TextureStatus::Loaded { .. } | TextureStatus::Placeholder)
        )
    }

    /// Id of the texture when it can be sampled.
    pub fn available(&self, key: &str) -> Option<TextureId> {
        self.entry(key)
            .filter(|e| !matches!(e.status, TextureStatus::Pending { .. }))
            .map(|e| e.id)
    }

    /// Id of the texture when it really loaded.
    pub fn loaded(&self, key: &str) -> Option<TextureId> {
        self.entry(key)
            .filter(|e| matches!(e.status, TextureStatus::Loaded { .. }))
            .map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn settled_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !matches!(e.status, TextureStatus::Pending { .. }))
            .count()
    }

    /// Every texture is loaded or replaced by a placeholder.
    pub fn is_settled(&self) -> bool {
        self.settled_count() == self.entries.len()
    }

    /// Settled share in whole percent; an empty registry reports 100.
    pub fn progress_percent(&self) -> f32 {
        if self.entries.is_empty() {
            return 100.0;
        }
        (self.settled_count() as f32 / self.entries.len() as f32 * 100.0).round()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    // ── Host callbacks ──────────────────────────────────────────────

    /// Undispatched work, in priority order.
    pub fn take_requests(&mut self) -> Vec<TextureRequest> {
        let mut out = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| !e.dispatched) {
            entry.dispatched = true;
            match entry.status {
                TextureStatus::Pending { source } => out.push(TextureRequest::Fetch {
                    key: entry.desc.key.clone(),
                    id: entry.id.0,
                    url: entry.desc.sources[source].clone(),
                    srgb: entry.desc.srgb,
                }),
                TextureStatus::Placeholder => out.push(TextureRequest::Placeholder {
                    key: entry.desc.key.clone(),
                    id: entry.id.0,
                    size: entry.generated.as_ref().map_or(PLACEHOLDER_SIZE, |(size, _)| *size),
                }),
                TextureStatus::Loaded { .. } => {}
            }
        }
        out
    }

    /// The current source of `key` loaded. Returns the new progress.
    pub fn mark_loaded(&mut self, key: &str) -> f32 {
        match self.index_of(key) {
            Some(i) => {
                let entry = &mut self.entries[i];
                if let TextureStatus::Pending { source } = entry.status {
                    log::debug!("texture loaded: {} ({})", key, entry.desc.sources[source]);
                    entry.status = TextureStatus::Loaded { source };
                    entry.dispatched = true;
                    self.epoch = self.epoch.wrapping_add(1);
                }
            }
            None => log::warn!("load reported for unknown texture {:?}", key),
        }
        self.progress_percent()
    }

    /// The current source of `key` failed. Returns the next URL to try, or
    /// `None` once the texture fell back to its placeholder.
    pub fn mark_failed(&mut self, key: &str) -> Option<String> {
        let Some(i) = self.index_of(key) else {
            log::warn!("failure reported for unknown texture {:?}", key);
            return None;
        };
        let entry = &mut self.entries[i];
        let TextureStatus::Pending { source } = entry.status else {
            return None;
        };
        let url = entry.desc.sources[source].clone();
        log::warn!("texture failed to load {} ({})", key, url);
        self.failures.push(url);

        let next = source + 1;
        entry.dispatched = true;
        if next < entry.desc.sources.len() {
            entry.status = TextureStatus::Pending { source: next };
            Some(entry.desc.sources[next].clone())
        } else {
            log::warn!("all sources failed for {}; using placeholder", key);
            entry.status = TextureStatus::Placeholder;
            self.epoch = self.epoch.wrapping_add(1);
            None
        }
    }

    /// URLs that failed since the last call.
    pub fn take_failures(&mut self) -> Vec<String> {
        std::mem::take(&mut self.failures)
    }

    /// RGBA8 pixels for a texture in `Placeholder` state.
    pub fn placeholder_pixels(&self, key: &str) -> Option<Vec<u8>> {
        let entry = self.entry(key)?;
        if entry.status != TextureStatus::Placeholder {
            return None;
        }
        if let Some((_, pixels)) = &entry.generated {
            return Some(pixels.clone());
        }
        let [inner, outer] = match &entry.desc.placeholder {
            Some([a, b]) => [a.as_str(), b.as_str()],
            None => DEFAULT_PLACEHOLDER,
        };
        Some(placeholder::placeholder_gradient(PLACEHOLDER_SIZE, inner, outer))
    }

    // ── UV scrolling ────────────────────────────────────────────────

    /// Scroll `key`'s UVs by `speed` per simulated second. Near-zero speeds,
    /// unknown keys and already-registered textures are ignored.
    pub fn register_scroll(&mut self, key: &str, speed: Vec2) -> bool {
        if speed.x.abs() < 1e-6 && speed.y.abs() < 1e-6 {
            return false;
        }
        let Some(id) = self.id(key) else { return false };
        if self.scrolls.iter().any(|s| s.id == id) {
            return false;
        }
        self.scrolls.push(ScrollEntry { id, speed });
        true
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls.len()
    }

    /// Advance every registered offset, wrapping into [0, 1).
    pub fn scroll(&mut self, sim_dt: f32) {
        for s in &self.scrolls {
            let i = s.id.0 as usize * 2;
            let u = self.offsets[i] + s.speed.x * sim_dt;
            let v = self.offsets[i + 1] + s.speed.y * sim_dt;
            self.offsets[i] = u - u.floor();
            self.offsets[i + 1] = v - v.floor();
        }
    }

    pub fn offset(&self, id: TextureId) -> Vec2 {
        let i = id.0 as usize * 2;
        match self.offsets.get(i..i + 2) {
            Some(uv) => Vec2::new(uv[0], uv[1]),
            None => Vec2::ZERO,
        }
    }

    /// Flat (u, v) pairs indexed by texture id.
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> AssetManifest {
        let mut m = AssetManifest::default();
        m.push(TextureDescriptor::new("sun").with_source("local/sun.jpg").with_source("https://cdn/sun.jpg"));
        m.push(TextureDescriptor::new("earth_day").with_source("https://cdn/earth.jpg"));
        m.push(TextureDescriptor::new("stars").with_placeholder("#000000", "#111111"));
        m
    }

    #[test]
    fn empty_sources_start_as_placeholder() {
        let reg = TextureRegistry::from_manifest(&manifest());
        assert_eq!(reg.status("stars"), Some(TextureStatus::Placeholder));
        assert_eq!(reg.status("sun"), Some(TextureStatus::Pending { source: 0 }));
        assert!(reg.is_available("stars"));
        assert!(!reg.is_loaded("stars"));
        assert_eq!(reg.progress_percent(), 33.0);
    }

    #[test]
    fn requests_are_dispatched_once_in_priority_order() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        let reqs = reg.take_requests();
        assert_eq!(reqs.len(), 3);
        assert_eq!(
            reqs[0],
            TextureRequest::Fetch { key: "sun".into(), id: 0, url: "local/sun.jpg".into(), srgb: true }
        );
        assert!(matches!(reqs[2], TextureRequest::Placeholder { size: PLACEHOLDER_SIZE, .. }));
        assert!(reg.take_requests().is_empty());
    }

    #[test]
    fn failure_walks_the_fallback_chain() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        reg.take_requests();

        assert_eq!(reg.mark_failed("sun"), Some("https://cdn/sun.jpg".to_string()));
        assert_eq!(reg.status("sun"), Some(TextureStatus::Pending { source: 1 }));
        assert_eq!(reg.mark_failed("sun"), None);
        assert_eq!(reg.status("sun"), Some(TextureStatus::Placeholder));
        assert!(reg.is_available("sun"));
        assert!(!reg.is_loaded("sun"));

        assert_eq!(reg.take_failures(), vec!["local/sun.jpg".to_string(), "https://cdn/sun.jpg".to_string()]);
        assert!(reg.take_failures().is_empty());
        assert!(reg.placeholder_pixels("sun").is_some());
        assert!(reg.placeholder_pixels("earth_day").is_none());
    }

    #[test]
    fn settles_when_every_texture_resolves() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        assert!(!reg.is_settled());
        assert_eq!(reg.mark_loaded("earth_day"), 67.0);
        reg.mark_failed("sun");
        assert!(!reg.is_settled());
        assert_eq!(reg.mark_loaded("sun"), 100.0);
        assert!(reg.is_settled());
        assert_eq!(reg.status("sun"), Some(TextureStatus::Loaded { source: 1 }));
    }

    #[test]
    fn late_reports_do_not_change_settled_state() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        reg.mark_loaded("earth_day");
        assert_eq!(reg.mark_failed("earth_day"), None);
        assert!(reg.is_loaded("earth_day"));
        reg.mark_loaded("pluto");
    }

    #[test]
    fn empty_registry_is_settled() {
        let reg = TextureRegistry::new();
        assert!(reg.is_settled());
        assert_eq!(reg.progress_percent(), 100.0);
    }

    #[test]
    fn generated_textures_serve_their_pixels() {
        let mut reg = TextureRegistry::new();
        let id = reg.add_generated("star_sprite", 2, vec![255; 16]);
        assert_eq!(reg.available("star_sprite"), Some(id));
        assert_eq!(reg.placeholder_pixels("star_sprite"), Some(vec![255; 16]));
        assert_eq!(
            reg.take_requests(),
            vec![TextureRequest::Placeholder { key: "star_sprite".into(), id: id.0, size: 2 }]
        );
    }

    #[test]
    fn scroll_registration_rules() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        assert!(!reg.register_scroll("sun", Vec2::new(1e-7, 0.0)));
        assert!(!reg.register_scroll("pluto", Vec2::new(0.1, 0.0)));
        assert!(reg.register_scroll("sun", Vec2::new(0.1, 0.0)));
        assert!(!reg.register_scroll("sun", Vec2::new(0.2, 0.0)));
        assert_eq!(reg.scroll_count(), 1);
    }

    #[test]
    fn scroll_wraps_into_unit_interval() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        reg.register_scroll("earth_day", Vec2::new(0.3, -0.25));
        let id = reg.id("earth_day").unwrap();
        for _ in 0..10 {
            reg.scroll(1.0);
        }
        let uv = reg.offset(id);
        assert!((uv.x - 0.0).abs() < 1e-4 || (uv.x - 1.0).abs() < 1e-4);
        assert!((0.0..1.0).contains(&uv.y));
        assert!((uv.y - 0.5).abs() < 1e-4);
        assert_eq!(reg.offset(reg.id("sun").unwrap()), Vec2::ZERO);
    }

    #[test]
    fn reloading_the_manifest_resets_scroll_offsets() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        assert!(reg.register_scroll("sun", Vec2::new(0.3, 0.0)));
        reg.scroll(1.0);

        let mut next = AssetManifest::default();
        next.push(TextureDescriptor::new("moon").with_source("local/moon.jpg"));
        assert!(reg.load_manifest(&next));
        let moon = reg.id("moon").unwrap();
        assert_eq!(moon, TextureId(0));
        assert_eq!(reg.offset(moon), Vec2::ZERO);
        assert_eq!(reg.offsets().len(), 2);
        assert_eq!(reg.scroll_count(), 0);
    }

    #[test]
    fn frozen_registry_keeps_its_textures() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        let sprite = reg.add_generated("star_sprite", 2, vec![255; 16]);
        reg.freeze();

        let mut next = AssetManifest::default();
        next.push(TextureDescriptor::new("moon").with_source("local/moon.jpg"));
        assert!(!reg.load_manifest(&next));
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.id("star_sprite"), Some(sprite));
        assert_eq!(reg.id("moon"), None);
    }
}
