use actix_web::web;

use crate::handlers::team_handler;

pub fn init_team_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teams")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(team_handler::list_teams))
                    .route(web::post().to(team_handler::create_team))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(team_handler::get_team))
                    .route(web::patch().to(team_handler::update_team))
                    .route(web::delete().to(team_handler::delete_team))
            )
    );
}
