pub mod auth;
pub mod health;
pub mod liens;
pub mod livreurs;
pub mod public;
pub mod vendeurs;

use actix_web::web;

/// Les routes sont montées sous /api/admin, /api, /admin et à la racine
/// (le front et les déploiements n'utilisent pas tous le même préfixe)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/admin").configure(admin_routes))
        .service(web::scope("/api").configure(api_routes))
        .service(web::scope("/admin").configure(admin_routes))
        .configure(api_routes);
}

/// Connexion et CRUD admin
fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth::login_routes)
        .configure(vendeurs::vendeurs_routes)
        .configure(livreurs::livreurs_routes)
        .configure(liens::liens_routes);
}

/// Routes admin + session, public, health et diag
fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health_check)
        .service(health::diag)
        .configure(auth::session_routes)
        .configure(public::public_routes)
        .configure(admin_routes);
}
