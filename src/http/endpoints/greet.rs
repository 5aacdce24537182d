use actix_web::{web, Responder};

use crate::greeting;

/// Repeated `name` parameters are joined with commas.
pub async fn greet(query: web::Query<Vec<(String, String)>>) -> impl Responder {
    let names: Vec<&str> = query
        .iter()
        .filter(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str())
        .collect();
    let name = (!names.is_empty()).then(|| names.join(","));
    greeting::greet(name.as_deref())
}
