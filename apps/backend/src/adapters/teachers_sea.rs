//! SeaORM adapter for teachers.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, LoaderTrait, ModelTrait, NotSet, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{students, teachers};

#[derive(Debug, Clone)]
pub struct TeacherCreate {
    pub name: String,
    pub subject: String,
}

pub async fn create_teacher<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TeacherCreate,
) -> Result<teachers::Model, sea_orm::DbErr> {
    teachers::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        subject: Set(dto.subject),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<teachers::Model>, sea_orm::DbErr> {
    teachers::Entity::find_by_id(id).one(conn).await
}

/// Page of teachers ordered by id, each with its students (ordered by id).
pub async fn list_with_students<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<(teachers::Model, Vec<students::Model>)>, sea_orm::DbErr> {
    // Page first, then batch-load children; a joined query would page over
    // student rows instead of teachers.
    let page = teachers::Entity::find()
        .order_by_asc(teachers::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await?;
    let children = page.load_many(students::Entity, conn).await?;

    Ok(page
        .into_iter()
        .zip(children)
        .map(|(teacher, mut students)| {
            students.sort_by_key(|s| s.id);
            (teacher, students)
        })
        .collect())
}

pub async fn students_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    teacher: &teachers::Model,
) -> Result<Vec<students::Model>, sea_orm::DbErr> {
    teacher
        .find_related(students::Entity)
        .order_by_asc(students::Column::Id)
        .all(conn)
        .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = teachers::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
