//! Terminal rendering helpers: tables, prices, dates and links.

use chrono::{DateTime, Datelike, Utc};
use comfy_table::{ContentArrangement, Table};
use conecta_core::api::{AdKind, AdStatus};
use url::form_urlencoded;

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Empty table in the house style, ready for `add_row`.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers);
    table
}

/// Formats a price the Brazilian way: `R$ 1.234,56`.
pub fn price_brl(value: f64) -> String {
    let negative = value < 0.0;
    let total_cents = (value.abs() * 100.0).round() as u64;
    let reais = total_cents / 100;
    let cents = total_cents % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents:02}")
}

/// Short pt-BR date, `10/03/2025`.
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Spelled-out pt-BR date, `10 de março de 2025`.
pub fn long_date(date: &DateTime<Utc>) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Resolves a stored image path against the backend's upload root.
/// Absolute URLs pass through untouched.
pub fn image_url(api_base: &str, path: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }
    format!("{}/uploads/{}", api_base.trim_end_matches('/'), path)
}

/// WhatsApp contact link for a seller, prefilled with a greeting that
/// names the ad. `telefone` is the normalized 11-digit number.
pub fn whatsapp_link(telefone: &str, vendedor: &str, titulo: &str) -> String {
    let text = format!("Olá, {vendedor}! \nvi seu anúncio \"{titulo}\" no ConectaNegócios.");
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("phone", &format!("55{telefone}"))
        .append_pair("text", &text)
        .finish();
    format!("https://api.whatsapp.com/send?{query}")
}

/// Wire label of an ad kind, as the backend spells it.
pub fn kind_label(kind: AdKind) -> &'static str {
    match kind {
        AdKind::Produto => "PRODUTO",
        AdKind::Servico => "SERVICO",
    }
}

/// Moderation state label for the own-ads listing.
pub fn status_label(status: AdStatus) -> &'static str {
    match status {
        AdStatus::Ativo => "Ativo",
        AdStatus::Pendente => "Pendente",
        AdStatus::Inativo => "Inativo",
    }
}
