use actix_web::web;

use crate::handlers::player_handler;

pub fn init_player_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/players")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(player_handler::list_players))
                    .route(web::post().to(player_handler::create_player))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(player_handler::get_player))
                    .route(web::patch().to(player_handler::update_player))
                    .route(web::delete().to(player_handler::delete_player))
            )
            .service(
                web::resource("/{id}/stats")
                    .route(web::get().to(player_handler::get_player_stats))
            )
    );
}
