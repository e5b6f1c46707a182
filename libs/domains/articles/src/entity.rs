use chrono::{SecondsFormat, Utc};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the articles table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub summary: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub image: Option<String>,
    pub created: DateTimeWithTimeZone,
    pub modified: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Article {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            summary: model.summary,
            description: model.description.unwrap_or_default(),
            image: model.image.unwrap_or_default(),
            created: model.created.with_timezone(&Utc),
            modified: model.modified.map(|m| {
                m.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Secs, true)
            }),
        }
    }
}
