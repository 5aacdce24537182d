use actix_web::web;

pub mod endpoints;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(endpoints::hello::home))
        .route("/hello", web::get().to(endpoints::hello::hello))
        .route("/hello/{name}", web::get().to(endpoints::hello::hello_with_name))
        .route("/greet", web::get().to(endpoints::greet::greet));
}
