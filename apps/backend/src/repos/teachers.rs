use sea_orm::ConnectionTrait;

use crate::adapters::teachers_sea::{self as teachers_adapter, TeacherCreate};
use crate::entities::{students, teachers};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Student as listed under its teacher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: i32,
    pub name: String,
    pub marks: i32,
}

/// Teacher with the students assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: i32,
    pub name: String,
    pub subject: String,
    pub students: Vec<StudentSummary>,
}

pub async fn create_teacher<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    subject: &str,
) -> Result<Teacher, DomainError> {
    let model = teachers_adapter::create_teacher(
        conn,
        TeacherCreate {
            name: name.to_string(),
            subject: subject.to_string(),
        },
    )
    .await?;
    Ok(Teacher::from_parts(model, Vec::new()))
}

pub async fn list_teachers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<Teacher>, DomainError> {
    let rows = teachers_adapter::list_with_students(conn, skip, limit).await?;
    Ok(rows
        .into_iter()
        .map(|(teacher, students)| Teacher::from_parts(teacher, students))
        .collect())
}

/// Delete a teacher and return it as it was.
///
/// Refuses while students still reference the teacher.
pub async fn delete_teacher<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Teacher, DomainError> {
    let model = teachers_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(teacher_not_found)?;

    let students = teachers_adapter::students_of(conn, &model).await?;
    if !students.is_empty() {
        return Err(DomainError::conflict(
            ConflictKind::StillReferenced,
            format!(
                "Teacher {id} still has {} assigned student(s)",
                students.len()
            ),
        ));
    }

    if teachers_adapter::delete_by_id(conn, id).await? == 0 {
        return Err(teacher_not_found());
    }
    Ok(Teacher::from_parts(model, students))
}

fn teacher_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Teacher, "Teacher not found")
}

impl Teacher {
    fn from_parts(model: teachers::Model, students: Vec<students::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            subject: model.subject,
            students: students.into_iter().map(StudentSummary::from).collect(),
        }
    }
}

impl From<students::Model> for StudentSummary {
    fn from(model: students::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            marks: model.marks,
        }
    }
}
