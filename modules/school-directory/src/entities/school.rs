use sea_orm::entity::prelude::*;

use rowscope_core::Privileged;
use rowscope_db::PrivilegeScopedEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub school_name: String,
    pub city_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(has_many = "super::major::Entity")]
    Major,
    #[sea_orm(has_many = "super::student::Entity")]
    Student,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::major::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Major.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Privileged for Model {
    const KEY: &'static str = "school";
}

impl PrivilegeScopedEntity for Entity {
    fn privilege_col(field: &str) -> Option<Self::Column> {
        match field {
            "school_name" => Some(Column::SchoolName),
            _ => None,
        }
    }
}
