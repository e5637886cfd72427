use actix_session::SessionExt;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    Error, HttpResponse,
};

const LOGGED_IN_KEY: &str = "logged_in";

/// Route guard for the document and report scopes. Anything without an
/// authenticated session is bounced to the login page.
pub async fn require_login(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let logged_in = req
        .get_session()
        .get::<bool>(LOGGED_IN_KEY)
        .unwrap_or(None)
        .unwrap_or(false);

    if logged_in {
        return Ok(next.call(req).await?.map_into_boxed_body());
    }

    let (request, _) = req.into_parts();
    let redirect = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .finish();
    Ok(ServiceResponse::new(request, redirect).map_into_boxed_body())
}

/// Marks the session as authenticated after a successful login.
pub fn establish_session(
    session: &actix_session::Session,
    username: &str,
) -> Result<(), actix_session::SessionInsertError> {
    session.insert(LOGGED_IN_KEY, true)?;
    session.insert("username", username)?;
    Ok(())
}
