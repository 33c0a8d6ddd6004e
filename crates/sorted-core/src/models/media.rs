use serde::{Deserialize, Serialize};

/// The kind of media a collection holds. Doubles as the cache section
/// name, so that different media kinds sharing a service never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Videos,
    Posts,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Videos => write!(f, "videos"),
            MediaKind::Posts => write!(f, "posts"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "videos" | "video" => Ok(MediaKind::Videos),
            "posts" | "post" => Ok(MediaKind::Posts),
            _ => Err(format!("unknown media kind: {s}")),
        }
    }
}
