pub mod admin_service;
pub mod auth_service;
pub mod lien_service;
pub mod livreur_service;
pub mod public_service;
pub mod vendeur_service;
