use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema, Set};
use uuid::Uuid;

use crate::entities::{city, major, school, student};

/// Identifiers of the seeded demo rows, for callers that need to reference
/// them after the one-time initialization.
#[derive(Debug, Clone, Copy)]
pub struct SeedIds {
    pub beijing: Uuid,
    pub shanghai: Uuid,
    pub beijing_school: Uuid,
    pub shanghai_school: Uuid,
    pub cs_major: Uuid,
    pub physics_major: Uuid,
}

/// Create the directory tables on a fresh database.
///
/// # Errors
/// Returns [`DbErr`] if statement execution fails.
pub async fn init_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    for statement in [
        schema.create_table_from_entity(city::Entity),
        schema.create_table_from_entity(school::Entity),
        schema.create_table_from_entity(major::Entity),
        schema.create_table_from_entity(student::Entity),
    ] {
        conn.execute(backend.build(&statement)).await?;
    }
    Ok(())
}

/// One-time demo data, inserted when the database is first created.
///
/// # Errors
/// Returns [`DbErr`] if an insert fails.
pub async fn seed_demo_data(conn: &DatabaseConnection) -> Result<SeedIds, DbErr> {
    let ids = SeedIds {
        beijing: Uuid::new_v4(),
        shanghai: Uuid::new_v4(),
        beijing_school: Uuid::new_v4(),
        shanghai_school: Uuid::new_v4(),
        cs_major: Uuid::new_v4(),
        physics_major: Uuid::new_v4(),
    };

    city::Entity::insert_many([
        city::ActiveModel {
            id: Set(ids.beijing),
            name: Set("Beijing".to_owned()),
        },
        city::ActiveModel {
            id: Set(ids.shanghai),
            name: Set("Shanghai".to_owned()),
        },
    ])
    .exec(conn)
    .await?;

    school::Entity::insert_many([
        school::ActiveModel {
            id: Set(ids.beijing_school),
            school_name: Set("Beijing No.1 High School".to_owned()),
            city_id: Set(ids.beijing),
        },
        school::ActiveModel {
            id: Set(ids.shanghai_school),
            school_name: Set("Shanghai Experimental School".to_owned()),
            city_id: Set(ids.shanghai),
        },
    ])
    .exec(conn)
    .await?;

    major::Entity::insert_many([
        major::ActiveModel {
            id: Set(ids.cs_major),
            major_name: Set("Computer Science".to_owned()),
            school_id: Set(ids.beijing_school),
        },
        major::ActiveModel {
            id: Set(ids.physics_major),
            major_name: Set("Physics".to_owned()),
            school_id: Set(ids.shanghai_school),
        },
    ])
    .exec(conn)
    .await?;

    student::Entity::insert_many([
        student::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Zhang San".to_owned()),
            school_id: Set(ids.beijing_school),
        },
        student::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Li Si".to_owned()),
            school_id: Set(ids.shanghai_school),
        },
    ])
    .exec(conn)
    .await?;

    Ok(ids)
}
