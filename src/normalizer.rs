use crate::config::AppConfig;
use crate::images::images_from_record;
use crate::model::{Listing, Record};
use crate::resolver::{fields, resolve};
use crate::utils::{format_price, mailto_link, norm, room_summary, type_label, whatsapp_link};

pub fn normalize_all(records: &[Record], config: &AppConfig) -> Vec<Listing> {
    records.iter().map(|record| build_listing(record, config)).collect()
}

pub fn build_listing(record: &Record, config: &AppConfig) -> Listing {
    let title = resolve(record, &fields::TITLE);
    let raw_type = resolve(record, &fields::OFFER_TYPE);

    let currency = resolve(record, &fields::CURRENCY);
    let currency = if currency.is_empty() { config.default_currency.clone() } else { currency };
    let price = format_price(&resolve(record, &fields::PRICE), &currency, &config.default_currency);

    let summary = room_summary(
        &resolve(record, &fields::ROOMS),
        &resolve(record, &fields::BATHROOMS),
        &resolve(record, &fields::AREA),
    );

    let subject = format!("{}{}", config.mail_subject_prefix, title);

    Listing {
        offer_type: norm(&raw_type),
        type_label: type_label(&raw_type),
        status: resolve(record, &fields::STATUS),
        description: resolve(record, &fields::DESCRIPTION),
        price,
        summary,
        address: resolve(record, &fields::ADDRESS),
        contact_name: resolve(record, &fields::CONTACT_NAME),
        whatsapp: whatsapp_link(&resolve(record, &fields::CONTACT_PHONE)),
        mailto: mailto_link(&resolve(record, &fields::CONTACT_EMAIL), &subject),
        images: images_from_record(record, &config.image_proxy_url),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_every_display_field() {
        let record = json!({
            "Título del anuncio": "Casa con huerto",
            "Tipo de oferta": "VENTA",
            "Estado": "Disponible",
            "Descripción de la vivienda": "Soleada",
            "Precio": "185000",
            "Habitaciones": 4,
            "baños": "2",
            "Metros cuadrados aproximados": "120",
            "Dirección (sin número)": "Calle Mayor",
            "Nombre de la persona de contacto": "Ana",
            "Teléfono de contacto": "600 11 22 33",
            "Correo electrónico": "ana@orea.es",
            "Fotos": "https://drive.google.com/file/d/F1/view, https://example.com/b.jpg",
        });
        let listing = build_listing(record.as_object().unwrap(), &AppConfig::default());

        assert_eq!(listing.title, "Casa con huerto");
        assert_eq!(listing.offer_type, "venta");
        assert_eq!(listing.type_label, "Venta");
        assert_eq!(listing.status, "Disponible");
        assert_eq!(listing.price, "185.000,00\u{a0}€");
        assert_eq!(listing.summary, "4 hab · 2 baños · 120 m²");
        assert_eq!(listing.address, "Calle Mayor");
        assert_eq!(listing.contact_name, "Ana");
        assert_eq!(listing.whatsapp, "https://wa.me/600112233");
        assert!(listing.mailto.starts_with("mailto:ana@orea.es?subject=Vivienda%20en%20Orea%3A%20Casa"));
        assert_eq!(listing.images.len(), 2);
        assert_eq!(listing.hero_image().unwrap().primary, "https://lh3.googleusercontent.com/d/F1");
    }

    #[test]
    fn empty_record_gives_empty_listing() {
        let listing = build_listing(&Record::new(), &AppConfig::default());
        assert_eq!(listing, Listing::default());
    }

    #[test]
    fn record_currency_overrides_default() {
        let record = json!({ "precio": "1200", "moneda": "USD" });
        let listing = build_listing(record.as_object().unwrap(), &AppConfig::default());
        assert_eq!(listing.price, "1200,00\u{a0}US$");
    }
}
