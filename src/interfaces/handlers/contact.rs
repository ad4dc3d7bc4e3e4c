use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact_form::ContactForm,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

#[instrument(skip(req, state, form))]
pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let origin = get_client_ip(&req, state.trust_forwarded_headers);

    let response = state.contact_handler
        .submit(&origin, form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
