//! SeaORM adapter for students.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, QuerySelect, Set,
};

use crate::entities::{students, teachers};

#[derive(Debug, Clone)]
pub struct StudentCreate {
    pub name: String,
    pub marks: i32,
    pub teacher_id: i32,
}

pub async fn create_student<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StudentCreate,
) -> Result<students::Model, sea_orm::DbErr> {
    students::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        marks: Set(dto.marks),
        teacher_id: Set(dto.teacher_id),
    }
    .insert(conn)
    .await
}

pub async fn find_with_teacher<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<(students::Model, Option<teachers::Model>)>, sea_orm::DbErr> {
    students::Entity::find_by_id(id)
        .find_also_related(teachers::Entity)
        .one(conn)
        .await
}

/// Page of students ordered by id, each joined to its teacher.
pub async fn list_with_teacher<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<(students::Model, Option<teachers::Model>)>, sea_orm::DbErr> {
    students::Entity::find()
        .find_also_related(teachers::Entity)
        .order_by_asc(students::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = students::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
