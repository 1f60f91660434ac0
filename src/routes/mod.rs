use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod matches;
pub mod players;
pub mod registration;
pub mod stats;
pub mod teams;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::root)
        .service(backend_health::backend_health);

    cfg.service(
        web::scope("/auth")
            .service(registration::register)
            .service(auth::login)
            .service(auth::me)
    );

    cfg.configure(teams::init_team_routes)
        .configure(players::init_player_routes)
        .configure(matches::init_match_routes)
        .configure(stats::init_stat_routes);
}
