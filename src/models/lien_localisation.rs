// ============================================================================
// MODÈLE : LIEN DE LOCALISATION
// ============================================================================
//
// Colonnes de la table liens_localisation:
//   - id (INTEGER, PRIMARY KEY)
//   - token (VARCHAR, UNIQUE, NOT NULL) - UUID v4, partie publique du lien
//   - livreur_id (INTEGER, UNIQUE, NOT NULL, FK vers livreurs)
//   - clicks (INTEGER, NOT NULL, DEFAULT 0)
//   - created_at (TIMESTAMP, NOT NULL)
//
// Workflow:
//   1. Admin crée un livreur -> un lien est créé automatiquement
//   2. Le client ouvre le lien public -> GET /api/public/localisation/{token}
//   3. Si le vendeur est disponible, clicks est incrémenté de 1
//   4. POST /livreurs/{id}/regenerate-link supprime le lien et en crée un nouveau
//
// Points d'attention:
//   - livreur_id est UNIQUE : un seul lien par livreur
//   - clicks n'est jamais décrémenté (un nouveau lien repart de 0)
//   - ON DELETE CASCADE: si livreur supprimé, lien supprimé aussi
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "liens_localisation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub token: String,

    #[sea_orm(unique)]
    pub livreur_id: i32,

    pub clicks: i32,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::livreur::Entity",
        from = "Column::LivreurId",
        to = "super::livreur::Column::Id",
        on_delete = "Cascade"
    )]
    Livreur,
}

impl Related<super::livreur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Livreur.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
