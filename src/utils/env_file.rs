/// Remplace la ligne `KEY=...` du contenu d'un fichier .env,
/// ou l'ajoute à la fin si la clé n'existe pas
pub fn set_or_append(content: &str, key: &str, line: &str) -> String {
    let prefix = format!("{}=", key);
    let mut found = false;

    let mut lines: Vec<&str> = content
        .lines()
        .map(|existing| {
            if existing.starts_with(&prefix) {
                found = true;
                line
            } else {
                existing
            }
        })
        .collect();

    if !found {
        lines.push(line);
    }

    let mut result = lines.join("\n");
    result.push('\n');
    result
}
