//! Print the OpenAPI document as JSON.

use playforge_backend::ApiDoc;
use utoipa::OpenApi;

fn main() {
    println!("{}", ApiDoc::openapi().to_json().unwrap());
}
