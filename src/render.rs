// Plain-text cards for the terminal.
use crate::model::Listing;
use crate::state::AppState;

const UNTITLED: &str = "Sin título";

pub fn render_card(listing: &Listing) -> String {
    let mut lines = Vec::new();

    let badges: Vec<String> = [&listing.type_label, &listing.status]
        .into_iter()
        .filter(|b| !b.is_empty())
        .map(|b| format!("[{}]", b))
        .collect();
    if !badges.is_empty() {
        lines.push(badges.join(" "));
    }

    let title = if listing.title.is_empty() { UNTITLED } else { listing.title.as_str() };
    lines.push(format!("🏠 {}", title));

    for field in [&listing.price, &listing.summary, &listing.address, &listing.description] {
        if !field.is_empty() {
            lines.push(format!("   {}", field));
        }
    }

    if let Some(image) = listing.hero_image() {
        lines.push(format!("   📷 {}", image.primary));
        lines.push(format!("      fallback: {}", image.fallback));
    }
    if !listing.whatsapp.is_empty() {
        lines.push(format!("   WhatsApp: {}", listing.whatsapp));
    }
    if !listing.mailto.is_empty() {
        lines.push(format!("   Email: {}", listing.mailto));
    }
    if !listing.contact_name.is_empty() {
        lines.push(format!("   Contacto: {}", listing.contact_name));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Every visible card followed by the status line.
pub fn render_page(state: &AppState) -> String {
    let mut out = String::new();
    for listing in state.visible() {
        out.push_str(&render_card(listing));
        out.push('\n');
    }
    out.push_str(state.status());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisplayImage;

    #[test]
    fn card_shows_present_fields_only() {
        let listing = Listing {
            title: "Casa".into(),
            type_label: "Venta".into(),
            price: "100.000,00\u{a0}€".into(),
            images: vec![DisplayImage { primary: "https://img/a".into(), fallback: "https://proxy/?url=a".into() }],
            whatsapp: "https://wa.me/34600".into(),
            ..Listing::default()
        };
        let card = render_card(&listing);
        assert!(card.starts_with("[Venta]\n🏠 Casa\n"));
        assert!(card.contains("📷 https://img/a"));
        assert!(card.contains("fallback: https://proxy/?url=a"));
        assert!(card.contains("WhatsApp: https://wa.me/34600"));
        assert!(!card.contains("Email:"));
        assert!(!card.contains("Contacto:"));
    }

    #[test]
    fn card_lines_are_in_display_order() {
        let listing = Listing {
            title: "Casa".into(),
            status: "Disponible".into(),
            summary: "3 hab".into(),
            address: "Calle Mayor".into(),
            contact_name: "Ana".into(),
            ..Listing::default()
        };
        assert_eq!(
            render_card(&listing),
            "[Disponible]\n🏠 Casa\n   3 hab\n   Calle Mayor\n   Contacto: Ana\n"
        );
    }

    #[test]
    fn untitled_card() {
        let card = render_card(&Listing::default());
        assert_eq!(card, "🏠 Sin título\n");
    }
}
