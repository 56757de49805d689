use anyhow::Result;

fn main() -> Result<()> {
    println!("{}", idauth::api::openapi().to_pretty_json()?);

    Ok(())
}
