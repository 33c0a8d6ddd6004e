use serde::{Deserialize, Serialize};
use url::Url;

/// An external service whose content this tool can reference and resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Youtube,
    Reddit,
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Youtube => write!(f, "youtube"),
            ServiceKind::Reddit => write!(f, "reddit"),
        }
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok(ServiceKind::Youtube),
            "reddit" => Ok(ServiceKind::Reddit),
            _ => Err(format!("unknown service: {s}")),
        }
    }
}

impl ServiceKind {
    /// Which service a locator belongs to, judged by its host name.
    /// `None` means a generic web reference.
    pub fn detect(locator: &str) -> Option<ServiceKind> {
        let url = parse_locator(locator)?;
        match url.host_str()? {
            "www.youtube.com" | "youtube.com" | "m.youtube.com" | "youtu.be" => {
                Some(ServiceKind::Youtube)
            }
            "www.reddit.com" | "reddit.com" | "old.reddit.com" | "redd.it" => {
                Some(ServiceKind::Reddit)
            }
            _ => None,
        }
    }
}

/// Parse a locator, adding an https scheme when the user left it off.
pub fn parse_locator(locator: &str) -> Option<Url> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        Url::parse(locator).ok()
    } else {
        Url::parse(&format!("https://{locator}")).ok()
    }
}

/// The composite natural key for a piece of service-hosted content:
/// the service plus the service's own identifier for the item. Two
/// entries reference the same content iff these pairs match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceMetadata {
    pub service_name: ServiceKind,
    pub resolvable_id: String,
}

impl ServiceMetadata {
    pub fn new(service_name: ServiceKind, resolvable_id: impl Into<String>) -> Self {
        Self {
            service_name,
            resolvable_id: resolvable_id.into(),
        }
    }
}
