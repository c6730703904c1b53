use serde::{Deserialize, Serialize};

/// Asset manifest describing every texture a game wants, in load-priority order.
/// Loaded from JSON at runtime or built in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures, highest priority first.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
}

/// Describes a single texture and where to fetch it from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Lookup key (e.g., "earth_day").
    pub key: String,
    /// Candidate URLs, tried in order until one loads.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Inner/outer `#RRGGBB` colors of the gradient used when every source fails.
    #[serde(default)]
    pub placeholder: Option<[String; 2]>,
    /// Color data (sRGB). False for normal and specular maps.
    #[serde(default = "default_srgb")]
    pub srgb: bool,
}

fn default_srgb() -> bool {
    true
}

impl TextureDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sources: Vec::new(),
            placeholder: None,
            srgb: true,
        }
    }

    /// Append a candidate URL. Empty strings are skipped.
    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.sources.push(url);
        }
        self
    }

    pub fn with_placeholder(mut self, inner: impl Into<String>, outer: impl Into<String>) -> Self {
        self.placeholder = Some([inner.into(), outer.into()]);
        self
    }

    pub fn with_srgb(mut self, srgb: bool) -> Self {
        self.srgb = srgb;
        self
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn push(&mut self, texture: TextureDescriptor) {
        self.textures.push(texture);
    }

    pub fn get(&self, key: &str) -> Option<&TextureDescriptor> {
        self.textures.iter().find(|t| t.key == key)
    }

    /// Move the named textures to the front, keeping the given order.
    /// Unknown keys are ignored.
    pub fn prioritize(&mut self, keys: &[&str]) {
        let mut front = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(i) = self.textures.iter().position(|t| t.key == *key) {
                front.push(self.textures.remove(i));
            }
        }
        front.append(&mut self.textures);
        self.textures = front;
    }
}
