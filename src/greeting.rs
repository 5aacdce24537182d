/// Name substituted by `/greet` when the caller does not provide one.
pub const DEFAULT_NAME: &str = "World";

pub fn home() -> &'static str {
    "Hello World! Welcome to Spring Boot!"
}

pub fn hello() -> &'static str {
    "Hello World from Spring Boot!"
}

/// Greeting for `/hello/{name}`. The name is inserted verbatim, without escaping.
pub fn hello_with_name(name: &str) -> String {
    format!("Hello, {name}! Welcome to Spring Boot!")
}

/// Greeting for `/greet`. An absent or empty name falls back to [`DEFAULT_NAME`].
pub fn greet(name: Option<&str>) -> String {
    let name = name.filter(|name| !name.is_empty()).unwrap_or(DEFAULT_NAME);
    format!("Hello, {name}!")
}
