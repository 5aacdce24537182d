use actix_web::{web, Responder};

use crate::greeting;

pub async fn home() -> impl Responder {
    greeting::home()
}

pub async fn hello() -> impl Responder {
    greeting::hello()
}

pub async fn hello_with_name(name: web::Path<String>) -> impl Responder {
    greeting::hello_with_name(&name)
}
