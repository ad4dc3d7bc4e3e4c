use actix_web::web;

use crate::handlers::messages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/messages")
            .service(
                web::resource("")
                    .route(web::get().to(messages::list_messages))
                    .route(web::patch().to(messages::update_message_read))
                    .route(web::delete().to(messages::delete_message))
            )
            .service(
                web::resource("/stats")
                    .route(web::get().to(messages::message_stats))
            )
    );
}
