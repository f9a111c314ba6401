//! Writes the request and response JSON Schemas to `schemas/`.
//!
//! Run with: `cargo run --example dump_schema`

use std::fs;

use zakat_engine::schema;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("schemas")?;

    write_schema("zakat_request", &schema::request_schema())?;
    write_schema("zakat_response", &schema::response_schema())?;

    println!("Schemas written to schemas/");
    Ok(())
}

fn write_schema(name: &str, schema: &schemars::schema::RootSchema) -> Result<(), Box<dyn std::error::Error>> {
    let path = format!("schemas/{}.json", name);
    fs::write(&path, serde_json::to_string_pretty(schema)?)?;
    println!("  {}", path);
    Ok(())
}
