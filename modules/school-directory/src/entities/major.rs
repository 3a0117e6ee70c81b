use sea_orm::entity::prelude::*;

use rowscope_core::Privileged;
use rowscope_db::PrivilegeScopedEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "majors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub major_name: String,
    pub school_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school::Entity",
        from = "Column::SchoolId",
        to = "super::school::Column::Id"
    )]
    School,
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Privileged for Model {
    const KEY: &'static str = "major";
}

impl PrivilegeScopedEntity for Entity {
    fn privilege_col(field: &str) -> Option<Self::Column> {
        match field {
            "major_name" => Some(Column::MajorName),
            _ => None,
        }
    }
}
