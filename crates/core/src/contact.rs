//! Deep links into external messaging apps.
//!
//! Marketboard never talks to WhatsApp or Instagram itself. A contact action
//! resolves to a URL the client opens, built from whatever the vendor typed
//! into the product's contact fields.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A messaging platform a customer can reach a vendor on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPlatform {
    Whatsapp,
    Instagram,
}

impl ContactPlatform {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Instagram => "instagram",
        }
    }
}

impl fmt::Display for ContactPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`ContactPlatform`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown contact platform: {0}")]
pub struct UnknownPlatform(pub String);

impl std::str::FromStr for ContactPlatform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Ok(Self::Whatsapp),
            "instagram" => Ok(Self::Instagram),
            _ => Err(UnknownPlatform(s.to_owned())),
        }
    }
}

/// Message prefilled into a WhatsApp chat about a product.
#[must_use]
pub fn inquiry_message(product_name: &str) -> String {
    format!("Hi! I'm interested in {product_name}. Can you tell me more about it?")
}

/// Build a WhatsApp chat link with a prefilled inquiry about the product.
///
/// Accepts `wa.me/<number>` links, `api.whatsapp.com/send?phone=<number>`
/// links, or a bare phone number in any formatting. When no digits can be
/// found, the vendor's link is returned unchanged.
///
/// ```
/// use marketboard_core::contact::whatsapp_chat_url;
///
/// let url = whatsapp_chat_url("https://wa.me/+234 912-320", "Lamp");
/// assert!(url.starts_with("https://wa.me/234912320?text=Hi"));
/// ```
#[must_use]
pub fn whatsapp_chat_url(link: &str, product_name: &str) -> String {
    let phone = extract_phone(link);
    if phone.is_empty() {
        return link.to_owned();
    }

    format!(
        "https://wa.me/{phone}?text={}",
        encode_component(&inquiry_message(product_name))
    )
}

/// Percent-encode text the way browsers' `encodeURIComponent` does.
///
/// Unlike `urlencoding::encode`, the marks `! ' ( ) *` stay literal.
fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c) {
            out.push(c);
        } else {
            let mut buf = [0; 4];
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

/// Normalize an Instagram link or handle into a profile URL.
///
/// Full `http(s)` links pass through; `@handle`, `handle` and `/handle/`
/// become `https://instagram.com/handle`.
#[must_use]
pub fn instagram_profile_url(link: &str) -> String {
    if link.starts_with("http") {
        return link.to_owned();
    }

    let handle = link.replacen('@', "", 1);
    format!("https://instagram.com/{}", handle.trim_matches('/'))
}

fn extract_phone(link: &str) -> String {
    let raw = if let Some((_, rest)) = link.split_once("wa.me/") {
        rest.split('?').next().unwrap_or_default().to_owned()
    } else if link.contains("api.whatsapp.com/send") {
        phone_query_param(link).unwrap_or_default()
    } else {
        link.to_owned()
    };

    raw.chars().filter(char::is_ascii_digit).collect()
}

fn phone_query_param(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "phone")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAMP_TEXT: &str = "Hi!%20I'm%20interested%20in%20Lamp.%20Can%20you%20tell%20me%20more%20about%20it%3F";

    #[test]
    fn test_platform_from_str() {
        assert_eq!("whatsapp".parse(), Ok(ContactPlatform::Whatsapp));
        assert_eq!(" Instagram ".parse(), Ok(ContactPlatform::Instagram));
        assert!("telegram".parse::<ContactPlatform>().is_err());
    }

    #[test]
    fn test_wa_me_link() {
        assert_eq!(
            whatsapp_chat_url("https://wa.me/+2349123205081", "Lamp"),
            format!("https://wa.me/2349123205081?text={LAMP_TEXT}")
        );
    }

    #[test]
    fn test_wa_me_link_drops_existing_query() {
        let url = whatsapp_chat_url("https://wa.me/08085035143?text=old", "Lamp");
        assert_eq!(url, format!("https://wa.me/08085035143?text={LAMP_TEXT}"));
    }

    #[test]
    fn test_api_whatsapp_link() {
        let url = whatsapp_chat_url(
            "https://api.whatsapp.com/send?phone=%2B15551234567&text=hello",
            "Lamp",
        );
        assert_eq!(url, format!("https://wa.me/15551234567?text={LAMP_TEXT}"));
    }

    #[test]
    fn test_bare_number() {
        let url = whatsapp_chat_url("+1 (555) 123-4567", "Lamp");
        assert!(url.starts_with("https://wa.me/15551234567?text="));
    }

    #[test]
    fn test_link_without_digits_passes_through() {
        assert_eq!(
            whatsapp_chat_url("https://chat.whatsapp.com/invite", "Lamp"),
            "https://chat.whatsapp.com/invite"
        );
    }

    #[test]
    fn test_instagram_full_url_passes_through() {
        assert_eq!(
            instagram_profile_url("https://instagram.com/techstore"),
            "https://instagram.com/techstore"
        );
    }

    #[test]
    fn test_instagram_handles() {
        assert_eq!(
            instagram_profile_url("@homedecor"),
            "https://instagram.com/homedecor"
        );
        assert_eq!(
            instagram_profile_url("/homedecor/"),
            "https://instagram.com/homedecor"
        );
        assert_eq!(
            instagram_profile_url("homedecor"),
            "https://instagram.com/homedecor"
        );
    }

    #[test]
    fn test_encode_component_keeps_marks() {
        assert_eq!(encode_component("Hi! I'm (here)*"), "Hi!%20I'm%20(here)*");
        assert_eq!(encode_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_component("café ~_-."), "caf%C3%A9%20~_-.");
    }

    #[test]
    fn test_platform_wire_names() {
        assert_eq!(ContactPlatform::Whatsapp.to_string(), "whatsapp");
        assert_eq!(ContactPlatform::Instagram.as_str(), "instagram");
    }
}
