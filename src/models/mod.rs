// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - admin : Administrateurs stockés en base
//   - vendeur : Vendeurs (actif, date de début / fin)
//   - livreur : Livreurs rattachés à un vendeur
//   - lien_localisation : Liens publics de localisation (token + clicks)
//   - dto : Data Transfer Objects (requêtes et réponses API)
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les relations entre tables sont définies dans chaque modèle
//   - Le JSON est en camelCase (attendu par le front React)
//
// ============================================================================

pub mod health;
pub mod admin;
pub mod vendeur;
pub mod livreur;
pub mod lien_localisation;
pub mod dto;
