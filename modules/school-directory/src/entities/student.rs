use sea_orm::entity::prelude::*;

use rowscope_core::Privileged;
use rowscope_db::PrivilegeScopedEntity;

/// Students carry no privilege descriptor: every principal sees all rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
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
    const KEY: &'static str = "student";
}

impl PrivilegeScopedEntity for Entity {
    fn privilege_col(_field: &str) -> Option<Self::Column> {
        None
    }
}
