use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::pagination::Pagination;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::repos::students::{self, Student, TeacherSummary};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentCreateRequest {
    pub name: String,
    pub marks: i32,
    pub teacher_id: i32,
}

#[derive(Debug, Serialize)]
pub struct TeacherInStudent {
    pub name: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub marks: i32,
    pub teacher_id: i32,
    pub teacher: Option<TeacherInStudent>,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            marks: s.marks,
            teacher_id: s.teacher_id,
            teacher: s
                .teacher
                .map(|TeacherSummary { name, subject }| TeacherInStudent { name, subject }),
        }
    }
}

async fn create_student(
    _user: CurrentUser,
    body: web::Json<StudentCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Student name must not be empty",
        ));
    }

    let db = app_state.require_db()?;
    let student = students::create_student(db, name, body.marks, body.teacher_id).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

async fn list_students(
    _user: CurrentUser,
    query: web::Query<Pagination>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (skip, limit) = query.bounds();
    let db = app_state.require_db()?;
    let rows = students::list_students(db, skip, limit).await?;
    let body: Vec<StudentResponse> = rows.into_iter().map(StudentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn delete_student(
    _user: CurrentUser,
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let student = students::delete_student(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_student))
            .route(web::get().to(list_students)),
    )
    .service(web::resource("/{student_id}").route(web::delete().to(delete_student)));
}
