// connexion BD

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};

use crate::config::AppConfig;
use crate::models::{admin, lien_localisation, livreur, vendeur};

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    Database::connect(&config.database_url).await
}

/// Base SQLite en mémoire avec le schéma (une seule connexion pour garder la même base)
pub async fn memory_database() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// Crée les tables à partir des entités si elles n'existent pas encore.
/// L'ordre respecte les clés étrangères.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, admin::Entity).await?;
    create_table(db, &schema, vendeur::Entity).await?;
    create_table(db, &schema, livreur::Entity).await?;
    create_table(db, &schema, lien_localisation::Entity).await?;

    Ok(())
}

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}
