use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// Streaming platforms that availability can be resolved to.
///
/// Each variant knows its catalog provider id, display metadata and how to
/// render both a direct title link and a site-search link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Netflix,
    Prime,
    Hotstar,
    Zee5,
    SonyLiv,
    MxPlayer,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Netflix,
        Platform::Prime,
        Platform::Hotstar,
        Platform::Zee5,
        Platform::SonyLiv,
        Platform::MxPlayer,
    ];

    /// Registry lookup by the catalog's numeric provider id
    pub fn from_provider_id(provider_id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.provider_id() == provider_id)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn provider_id(self) -> u32 {
        match self {
            Platform::Netflix => 8,
            Platform::Prime => 9,
            Platform::Hotstar => 122,
            Platform::Zee5 => 58,
            Platform::SonyLiv => 67,
            Platform::MxPlayer => 190,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Platform::Netflix => "netflix",
            Platform::Prime => "prime",
            Platform::Hotstar => "hotstar",
            Platform::Zee5 => "zee5",
            Platform::SonyLiv => "sonyliv",
            Platform::MxPlayer => "mxplayer",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Netflix => "Netflix",
            Platform::Prime => "Prime Video",
            Platform::Hotstar => "Disney+ Hotstar",
            Platform::Zee5 => "Zee5",
            Platform::SonyLiv => "SonyLIV",
            Platform::MxPlayer => "MX Player",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Platform::Netflix => "https://upload.wikimedia.org/wikipedia/commons/0/08/Netflix_2015_logo.svg",
            Platform::Prime => "https://upload.wikimedia.org/wikipedia/commons/f/f1/Prime_Video.svg",
            Platform::Hotstar => "https://upload.wikimedia.org/wikipedia/commons/1/1b/Disney%2B_Hotstar_logo.svg",
            Platform::Zee5 => "https://upload.wikimedia.org/wikipedia/commons/5/5a/ZEE5_logo.svg",
            Platform::SonyLiv => "https://upload.wikimedia.org/wikipedia/commons/5/5a/SonyLIV_logo.svg",
            Platform::MxPlayer => "https://upload.wikimedia.org/wikipedia/commons/9/9c/MX_Player_logo.svg",
        }
    }

    /// Hover colour used when rendering the platform as a card link
    pub fn color_hint(self) -> &'static str {
        match self {
            Platform::Netflix | Platform::SonyLiv => "hover:bg-red-900/20",
            Platform::Prime | Platform::Hotstar => "hover:bg-blue-900/20",
            Platform::Zee5 => "hover:bg-indigo-900/20",
            Platform::MxPlayer => "hover:bg-yellow-900/20",
        }
    }

    /// Terminal accent for the platform name, in the same colour family as `color_hint`
    pub fn accent_rgb(self) -> (u8, u8, u8) {
        match self {
            Platform::Netflix => (229, 9, 20),
            Platform::SonyLiv => (204, 32, 39),
            Platform::Prime => (0, 168, 225),
            Platform::Hotstar => (31, 128, 224),
            Platform::Zee5 => (99, 102, 241),
            Platform::MxPlayer => (234, 179, 8),
        }
    }

    /// Override document field holding this platform's identifier
    pub fn override_field(self) -> String {
        format!("{}_id", self.key())
    }

    /// Link to the title page on the platform, given the platform's own id
    pub fn direct_url(self, title: &str, platform_id: &str) -> String {
        match self {
            Platform::Netflix => format!("https://www.netflix.com/title/{}", platform_id),
            Platform::Prime => format!("https://www.primevideo.com/detail/{}", platform_id),
            Platform::Hotstar => format!(
                "https://www.hotstar.com/in/movies/{}/{}",
                slugify(title),
                platform_id
            ),
            Platform::Zee5 => format!(
                "https://www.zee5.com/movies/details/{}/{}",
                slugify(title),
                platform_id
            ),
            Platform::SonyLiv => format!(
                "https://www.sonyliv.com/movies/{}-{}",
                slugify(title),
                platform_id
            ),
            Platform::MxPlayer => format!(
                "https://www.mxplayer.in/movie/{}/{}",
                platform_id,
                slugify(title)
            ),
        }
    }

    /// Platform search page pre-filled with the raw title
    pub fn search_url(self, title: &str) -> String {
        let title = urlencoding::encode(title);
        match self {
            Platform::Netflix => format!("https://www.netflix.com/search?q={}", title),
            Platform::Prime => format!("https://www.primevideo.com/search?k={}", title),
            Platform::Hotstar => format!("https://www.hotstar.com/in/search?q={}", title),
            Platform::Zee5 => format!("https://www.zee5.com/search?q={}", title),
            Platform::SonyLiv => format!("https://www.sonyliv.com/search?q={}", title),
            Platform::MxPlayer => format!("https://www.mxplayer.in/search?q={}", title),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
