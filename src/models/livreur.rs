use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Livreur rattaché à un vendeur, joignable par WhatsApp.
/// Un livreur possède au plus un lien de localisation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "livreurs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nom: String,
    pub prenom: Option<String>,
    #[serde(rename = "numeroWhatsApp")]
    pub numero_whatsapp: Option<String>,
    pub vendeur_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendeur::Entity",
        from = "Column::VendeurId",
        to = "super::vendeur::Column::Id",
        on_delete = "Cascade"
    )]
    Vendeur,

    #[sea_orm(has_one = "super::lien_localisation::Entity")]
    LienLocalisation,
}

impl Related<super::vendeur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendeur.def()
    }
}

impl Related<super::lien_localisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LienLocalisation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
