// Candidate catalog for every display field.
use super::{Candidate, FieldQuery};
use std::sync::LazyLock;

fn query(exact: &[&str], patterns: &[&str]) -> FieldQuery {
    let candidates = exact
        .iter()
        .map(|name| Candidate::exact(name))
        .chain(patterns.iter().map(|p| Candidate::pattern(p)))
        .collect();
    FieldQuery::new(candidates)
}

pub static TITLE: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["titulo", "Título del anuncio"], &["t[ií]tulo"]));
pub static OFFER_TYPE: LazyLock<FieldQuery> = LazyLock::new(|| query(&["tipo", "Tipo de oferta"], &[]));
pub static STATUS: LazyLock<FieldQuery> = LazyLock::new(|| query(&["estado", "Estado"], &[]));
pub static DESCRIPTION: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["descripcion", "Descripción de la vivienda"], &["descrip"]));
pub static PRICE: LazyLock<FieldQuery> = LazyLock::new(|| query(&["precio", "Precio"], &[]));
pub static CURRENCY: LazyLock<FieldQuery> = LazyLock::new(|| query(&["moneda", "Moneda"], &[]));
pub static ROOMS: LazyLock<FieldQuery> = LazyLock::new(|| query(&["habitaciones"], &["habit"]));
pub static BATHROOMS: LazyLock<FieldQuery> = LazyLock::new(|| query(&["banos", "baños"], &["bañ"]));
pub static AREA: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["m2", "Metros cuadrados aproximados"], &["metro"]));
pub static ADDRESS: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["direccion_sin_numero", "Dirección (sin número)"], &["direc"]));
pub static CONTACT_NAME: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["contacto_nombre", "Nombre de la persona de contacto"], &["nombre"]));
pub static CONTACT_PHONE: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["contacto_telefono", "Teléfono de contacto"], &["tel"]));
pub static CONTACT_EMAIL: LazyLock<FieldQuery> =
    LazyLock::new(|| query(&["contacto_email", "Correo electrónico"], &["email"]));
pub static PHOTOS: LazyLock<FieldQuery> = LazyLock::new(|| query(&["Fotos"], &["foto|im[aá]gen"]));
