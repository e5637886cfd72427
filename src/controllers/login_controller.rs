use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data, Form},
    HttpResponse,
};
use tracing::{error, info};
use validator::Validate;

use crate::dtos::auth::login_dto::{LoginUserDto, SeedUserDto};
use crate::middleware::establish_session;
use crate::models::service_result::ServiceResult;
use crate::services::db::Database;
use crate::utils::password;

/// Landing point for the redirect issued by the session guard.
#[get("")]
async fn login_page() -> HttpResponse {
    HttpResponse::Ok().json(ServiceResult::<()>::fail("يرجى تسجيل الدخول"))
}

#[post("")]
async fn login_user(
    db: Data<Database>,
    session: Session,
    body: Form<LoginUserDto>,
) -> HttpResponse {
    if body.validate().is_err() {
        return HttpResponse::BadRequest()
            .json(ServiceResult::<()>::fail("يرجى إدخال اسم المستخدم وكلمة المرور"));
    }

    let user = match db.get_user(&body.username).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "login lookup failed");
            return HttpResponse::InternalServerError()
                .json(ServiceResult::<()>::fail("حدث خطأ أثناء تسجيل الدخول"));
        }
    };

    let Some(user) = user else {
        return HttpResponse::Unauthorized()
            .json(ServiceResult::<()>::fail("اسم المستخدم غير صحيح"));
    };

    match password::verify(&body.password, &user.password) {
        Ok(true) => {
            if let Err(e) = establish_session(&session, &user.username) {
                error!(error = %e, "failed to write session");
                return HttpResponse::InternalServerError()
                    .json(ServiceResult::<()>::fail("حدث خطأ أثناء تسجيل الدخول"));
            }
            info!(username = %user.username, "user logged in");
            HttpResponse::Ok().json(ServiceResult::ok((), "تم تسجيل الدخول بنجاح"))
        }
        Ok(false) => HttpResponse::Unauthorized()
            .json(ServiceResult::<()>::fail("كلمة المرور غير صحيحة")),
        Err(e) => {
            error!(error = %e, "password verification failed");
            HttpResponse::InternalServerError()
                .json(ServiceResult::<()>::fail("حدث خطأ أثناء تسجيل الدخول"))
        }
    }
}

#[post("/logout")]
async fn logout_user(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish()
}

/// Inserts a user record; there is no self-service registration, accounts
/// are provisioned through this endpoint.
#[post("/seed")]
async fn seed_user(db: Data<Database>, body: Form<SeedUserDto>) -> HttpResponse {
    if let Err(errors) = body.validate() {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|e| e.iter())
            .filter_map(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .next()
            .unwrap_or_else(|| "بيانات غير صحيحة".to_string());
        return HttpResponse::BadRequest().json(ServiceResult::<()>::fail(message));
    }

    match db.get_user(&body.username).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict()
                .json(ServiceResult::<()>::fail("المستخدم موجود مسبقاً"));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "seed lookup failed");
            return HttpResponse::InternalServerError()
                .json(ServiceResult::<()>::fail("حدث خطأ أثناء إنشاء المستخدم"));
        }
    }

    let hashed = match password::hash(&body.password) {
        Ok(hashed) => hashed,
        Err(e) => {
            error!(error = %e, "password hashing failed");
            return HttpResponse::InternalServerError()
                .json(ServiceResult::<()>::fail("حدث خطأ أثناء إنشاء المستخدم"));
        }
    };

    match db.create_user(body.username.clone(), hashed).await {
        Ok(()) => HttpResponse::Ok().json(ServiceResult::ok((), "تم إنشاء المستخدم بنجاح")),
        Err(e) => {
            error!(error = %e, "user insert failed");
            HttpResponse::InternalServerError()
                .json(ServiceResult::<()>::fail("حدث خطأ أثناء إنشاء المستخدم"))
        }
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page);
    cfg.service(login_user);
    cfg.service(logout_user);
    cfg.service(seed_user);
}
