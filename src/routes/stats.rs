use actix_web::web;

use crate::handlers::player_stat_handler;

pub fn init_stat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stats")
            .service(
                web::resource(["", "/"])
                    .route(web::post().to(player_stat_handler::create_stat))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(player_stat_handler::get_stat))
                    .route(web::patch().to(player_stat_handler::update_stat))
                    .route(web::delete().to(player_stat_handler::delete_stat))
            )
    );
}
