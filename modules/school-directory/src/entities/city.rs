use sea_orm::entity::prelude::*;

use rowscope_core::Privileged;
use rowscope_db::PrivilegeScopedEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::school::Entity")]
    School,
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Privileged for Model {
    const KEY: &'static str = "city";
}

impl PrivilegeScopedEntity for Entity {
    fn privilege_col(field: &str) -> Option<Self::Column> {
        match field {
            "name" => Some(Column::Name),
            _ => None,
        }
    }
}
