// Prints the OpenAPI schema: cargo run --bin openapi_export

use rho::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
    println!("{}", json);
    Ok(())
}
