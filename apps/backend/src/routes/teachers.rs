use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::pagination::Pagination;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::repos::teachers::{self, StudentSummary, Teacher};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct TeacherCreateRequest {
    pub name: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct StudentInTeacher {
    pub id: i32,
    pub name: String,
    pub marks: i32,
}

#[derive(Debug, Serialize)]
pub struct TeacherResponse {
    pub id: i32,
    pub name: String,
    pub subject: String,
    pub students: Vec<StudentInTeacher>,
}

impl From<Teacher> for TeacherResponse {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            name: t.name,
            subject: t.subject,
            students: t
                .students
                .into_iter()
                .map(|StudentSummary { id, name, marks }| StudentInTeacher { id, name, marks })
                .collect(),
        }
    }
}

async fn create_teacher(
    _user: CurrentUser,
    body: web::Json<TeacherCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.name.trim();
    let subject = body.subject.trim();
    if name.is_empty() || subject.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Teacher name and subject must not be empty",
        ));
    }

    let db = app_state.require_db()?;
    let teacher = teachers::create_teacher(db, name, subject).await?;
    Ok(HttpResponse::Ok().json(TeacherResponse::from(teacher)))
}

async fn list_teachers(
    _user: CurrentUser,
    query: web::Query<Pagination>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (skip, limit) = query.bounds();
    let db = app_state.require_db()?;
    let rows = teachers::list_teachers(db, skip, limit).await?;
    let body: Vec<TeacherResponse> = rows.into_iter().map(TeacherResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn delete_teacher(
    _user: CurrentUser,
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let teacher = teachers::delete_teacher(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TeacherResponse::from(teacher)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_teacher))
            .route(web::get().to(list_teachers)),
    )
    .service(web::resource("/{teacher_id}").route(web::delete().to(delete_teacher)));
}
