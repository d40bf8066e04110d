//! WhatsApp contact links and canned messages.

use url::Url;
use uuid::Uuid;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Build a `wa.me` click-to-chat link. Non-digits are dropped from `phone`.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    Url::parse_with_params(&format!("{WHATSAPP_BASE}{digits}"), &[("text", message)])
}

/// Message used from a listing card in the browse grid.
pub fn card_message(title: &str) -> String {
    format!("Olá! Tenho interesse em {title}. Gostaria de mais informações.")
}

/// Message used from the listing detail page.
pub fn detail_message(title: &str, id: Uuid) -> String {
    format!(
        "Olá! Tenho interesse em {title} (ID: {id}). Gostaria de mais informações sobre disponibilidade e valores."
    )
}

pub fn share_text(title: &str) -> String {
    format!("Confira este lugar incrível: {title}")
}
