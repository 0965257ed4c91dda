const WA_ME: &str = "https://wa.me/";

/// Garde uniquement les chiffres du numéro ("+223 70-00" -> "2237000")
pub fn normaliser_numero(numero: &str) -> String {
    numero.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Lien de composition WhatsApp vers le livreur.
/// Sans numéro exploitable, renvoie le lien générique (choix du contact côté client).
pub fn lien_whatsapp(numero: Option<&str>) -> String {
    match numero.map(normaliser_numero) {
        Some(chiffres) if !chiffres.is_empty() => format!("{}{}", WA_ME, chiffres),
        _ => WA_ME.to_string(),
    }
}
