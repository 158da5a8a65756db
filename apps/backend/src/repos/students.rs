use sea_orm::ConnectionTrait;

use crate::adapters::students_sea::{self as students_adapter, StudentCreate};
use crate::adapters::teachers_sea as teachers_adapter;
use crate::entities::{students, teachers};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Teacher fields shown alongside a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherSummary {
    pub name: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub marks: i32,
    pub teacher_id: i32,
    pub teacher: Option<TeacherSummary>,
}

/// Insert a student under an existing teacher.
pub async fn create_student<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    marks: i32,
    teacher_id: i32,
) -> Result<Student, DomainError> {
    let teacher = teachers_adapter::find_by_id(conn, teacher_id)
        .await?
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownTeacher,
                format!("Teacher {teacher_id} does not exist"),
            )
        })?;

    let model = students_adapter::create_student(
        conn,
        StudentCreate {
            name: name.to_string(),
            marks,
            teacher_id,
        },
    )
    .await?;
    Ok(Student::from_parts(model, Some(teacher)))
}

pub async fn list_students<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<Student>, DomainError> {
    let rows = students_adapter::list_with_teacher(conn, skip, limit).await?;
    Ok(rows
        .into_iter()
        .map(|(student, teacher)| Student::from_parts(student, teacher))
        .collect())
}

/// Delete a student and return it as it was.
pub async fn delete_student<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Student, DomainError> {
    let (model, teacher) = students_adapter::find_with_teacher(conn, id)
        .await?
        .ok_or_else(student_not_found)?;

    if students_adapter::delete_by_id(conn, id).await? == 0 {
        return Err(student_not_found());
    }
    Ok(Student::from_parts(model, teacher))
}

fn student_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Student, "Student not found")
}

impl Student {
    fn from_parts(model: students::Model, teacher: Option<teachers::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            marks: model.marks,
            teacher_id: model.teacher_id,
            teacher: teacher.map(|t| TeacherSummary {
                name: t.name,
                subject: t.subject,
            }),
        }
    }
}
